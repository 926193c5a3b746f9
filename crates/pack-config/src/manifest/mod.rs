//! pack.toml / pack.json manifest parsing and serialization

mod edit;

pub use edit::{add_dependency, remove_dependency};

use crate::ConfigResult;
use camino::{Utf8Path, Utf8PathBuf};
use pack_core::error::PackError;
use pack_core::types::{is_valid_name, Dependency, VcsScheme, Version};
use pack_core::utils::get_extension;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Manifest file names, in lookup order
pub const MANIFEST_FILES: [&str; 2] = ["pack.toml", "pack.json"];

/// Complete package manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    /// Display name, defaults to the last import path segment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Import path (required)
    pub import_path: String,

    /// Package version (required)
    pub version: Version,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// License identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Dependency lines such as `dep2 ~1.4.5-pre !=1.5.0`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subpackages: Vec<String>,

    /// Source repository
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryInfo>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub support: Option<Support>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Person>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Person>,
}

/// Source repository of a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    #[serde(rename = "type")]
    pub kind: VcsScheme,
    pub url: String,
}

/// Author or contributor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

/// Support channels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Support {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wiki: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<String>,
}

/// Document format of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Utf8Path) -> ConfigResult<Self> {
        match get_extension(path.as_std_path()).as_deref() {
            Some("toml") => Ok(ManifestFormat::Toml),
            Some("json") => Ok(ManifestFormat::Json),
            _ => Err(PackError::ConfigValidation {
                field: "manifest".to_string(),
                reason: format!("{path} is neither a .toml nor a .json file"),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestFormat::Toml => "TOML",
            ManifestFormat::Json => "JSON",
        }
    }
}

impl Manifest {
    /// Create a manifest with only the required fields
    pub fn new(import_path: impl Into<String>, version: Version) -> Self {
        Self {
            name: None,
            import_path: import_path.into(),
            version,
            summary: None,
            description: None,
            homepage: None,
            license: None,
            dependencies: Vec::new(),
            subpackages: Vec::new(),
            repository: None,
            support: None,
            authors: Vec::new(),
            contributors: Vec::new(),
        }
    }

    /// Name shown to users
    pub fn display_name(&self) -> &str {
        match self.name {
            Some(ref name) => name,
            None => self
                .import_path
                .rsplit('/')
                .find(|segment| !segment.is_empty())
                .unwrap_or(&self.import_path),
        }
    }

    /// Look up a dependency by name
    pub fn dependency(&self, name: &str) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| d.name() == name)
    }
}

/// Parse manifest text in the given format
pub fn parse_manifest(content: &str, format: ManifestFormat) -> ConfigResult<Manifest> {
    let manifest: Manifest = match format {
        ManifestFormat::Toml => toml::from_str(content).map_err(|e| {
            let (line, column) = e
                .span()
                .map(|span| line_column(content, span.start))
                .unwrap_or((0, 0));
            PackError::ManifestParse {
                format: format.as_str(),
                message: e.message().to_string(),
                line,
                column,
            }
        })?,
        ManifestFormat::Json => {
            serde_json::from_str(content).map_err(|e| {
                // Display appends the location, which is reported separately
                let message = e.to_string();
                let message = message.split(" at line ").next().unwrap_or_default();
                PackError::ManifestParse {
                    format: format.as_str(),
                    message: message.to_string(),
                    line: e.line(),
                    column: e.column(),
                }
            })?
        },
    };

    validate_manifest(&manifest)?;

    Ok(manifest)
}

/// Serialize a manifest in the given format
pub fn serialize_manifest(manifest: &Manifest, format: ManifestFormat) -> ConfigResult<String> {
    let serialized = match format {
        ManifestFormat::Toml => toml::to_string_pretty(manifest).map_err(|e| e.to_string()),
        ManifestFormat::Json => serde_json::to_string_pretty(manifest).map_err(|e| e.to_string()),
    };

    serialized.map_err(|reason| PackError::ConfigValidation {
        field: "manifest".to_string(),
        reason,
    })
}

/// Validate manifest completeness
pub fn validate_manifest(manifest: &Manifest) -> ConfigResult<()> {
    if manifest.import_path.trim().is_empty() {
        return Err(PackError::ConfigValidation {
            field: "import-path".to_string(),
            reason: "an import path is required".to_string(),
        });
    }

    if let Some(ref name) = manifest.name {
        if !is_valid_name(name) {
            return Err(PackError::ConfigValidation {
                field: "name".to_string(),
                reason: format!(
                    "'{name}' must start with a letter followed by letters, digits, - or _"
                ),
            });
        }
    }

    let mut seen = HashSet::new();
    for dependency in &manifest.dependencies {
        if !seen.insert(dependency.name()) {
            return Err(PackError::ConfigValidation {
                field: "dependencies".to_string(),
                reason: format!("'{}' is listed more than once", dependency.name()),
            });
        }
    }

    Ok(())
}

/// Load and parse a manifest from file
pub fn load_manifest(path: &Utf8Path) -> ConfigResult<Manifest> {
    let format = ManifestFormat::from_path(path)?;
    tracing::debug!("Loading {} manifest from {}", format.as_str(), path);

    let content = std::fs::read_to_string(path)
        .map_err(|e| PackError::io(format!("Failed to read {}", path), e))?;

    parse_manifest(&content, format).map_err(|e| match e {
        PackError::ConfigValidation { field, reason } => PackError::ConfigValidation {
            field,
            reason: format!("{reason} (in {path})"),
        },
        other => other,
    })
}

/// Validate and write a manifest, format chosen by extension
pub fn write_manifest(manifest: &Manifest, path: &Utf8Path) -> ConfigResult<()> {
    validate_manifest(manifest)?;
    let content = serialize_manifest(manifest, ManifestFormat::from_path(path)?)?;

    std::fs::write(path, content)
        .map_err(|e| PackError::io(format!("Failed to write {}", path), e))?;
    tracing::debug!("Wrote manifest {}", path);

    Ok(())
}

/// Find a manifest in `start` or its parent directories
pub fn find_manifest(start: &Utf8Path) -> ConfigResult<Utf8PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        for file in MANIFEST_FILES {
            let candidate = dir.join(file);
            if candidate.is_file() {
                tracing::debug!("Found manifest at {}", candidate);
                return Ok(candidate);
            }
        }
        current = dir.parent();
    }

    Err(PackError::ConfigValidation {
        field: "manifest".to_string(),
        reason: format!("no pack.toml or pack.json found in {start} or its parent directories"),
    })
}

// 1-based line and column of a byte offset
pub(crate) fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = content.get(..offset).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}
