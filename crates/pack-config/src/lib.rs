//! Configuration handling for pack
//!
//! This crate reads and edits package manifests (pack.toml or pack.json),
//! derives the workspace layout from the PACK_PATH search path, and layers
//! user settings from defaults, the settings file, the environment and the
//! command line.

pub mod manifest;
pub mod paths;
pub mod settings;

// Re-export main types
pub use manifest::{
    add_dependency, find_manifest, load_manifest, parse_manifest, remove_dependency,
    serialize_manifest, validate_manifest, write_manifest, Manifest, ManifestFormat, Person,
    RepositoryInfo, Support,
};
pub use paths::{dir_exists, ensure_directory, Paths};
pub use settings::{Settings, SettingsFile, SettingsOverrides};

use pack_core::error::PackError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, PackError>;
