//! Workspace layout derived from the PACK_PATH search path.
//!
//! The search path lists one or more workspace roots using the platform's
//! path-list syntax. The first root hosts the pack directory, which holds the
//! global settings file and one source tree per packset:
//!
//! ```text
//! <root>/pack/config.toml
//! <root>/pack/<packset>/src/<import path>
//! ```

use crate::ConfigResult;
use camino::{Utf8Path, Utf8PathBuf};
use pack_core::error::PackError;
use pack_core::utils::safe_join;

/// Environment variable holding the workspace search path
pub const PACK_PATH_VAR: &str = "PACK_PATH";

/// Resolved workspace paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    search_path: String,
    roots: Vec<Utf8PathBuf>,
    packset: String,
    pack_dir: Utf8PathBuf,
    packset_dir: Utf8PathBuf,
    combined_path: String,
}

impl Paths {
    /// Build the layout for `search_path` and `packset`
    pub fn new(search_path: &str, packset: &str) -> ConfigResult<Self> {
        let roots = std::env::split_paths(search_path)
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| {
                Utf8PathBuf::try_from(p).map_err(|e| PackError::ConfigValidation {
                    field: PACK_PATH_VAR.to_string(),
                    reason: format!("not valid UTF-8: {}", e.as_path().display()),
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;

        let first = roots.first().ok_or(PackError::WorkspaceNotSet {
            variable: PACK_PATH_VAR,
        })?;
        let pack_dir = first.join("pack");

        let mut paths = Self {
            search_path: search_path.to_string(),
            roots,
            packset: String::new(),
            pack_dir,
            packset_dir: Utf8PathBuf::new(),
            combined_path: String::new(),
        };
        paths.set_packset(packset)?;

        Ok(paths)
    }

    /// Build the layout from the PACK_PATH environment variable
    pub fn from_env(packset: &str) -> ConfigResult<Self> {
        let search_path = std::env::var(PACK_PATH_VAR).unwrap_or_default();
        Self::new(&search_path, packset)
    }

    /// Switch to another packset and recompute the dependent paths
    pub fn set_packset(&mut self, packset: &str) -> ConfigResult<()> {
        if packset.is_empty() || packset.contains(['/', '\\']) || packset == ".." {
            return Err(PackError::ConfigValidation {
                field: "packset".to_string(),
                reason: format!("'{packset}' must be a single directory name"),
            });
        }

        self.packset = packset.to_string();
        self.packset_dir = self.pack_dir.join(packset).join("src");

        self.combined_path = format!(
            "{}{}{}",
            self.search_path,
            list_separator(),
            self.packset_dir
        );

        tracing::debug!("Packset {} lives in {}", self.packset, self.packset_dir);
        Ok(())
    }

    pub fn search_path(&self) -> &str {
        &self.search_path
    }

    pub fn roots(&self) -> &[Utf8PathBuf] {
        &self.roots
    }

    pub fn packset(&self) -> &str {
        &self.packset
    }

    /// `<first root>/pack`
    pub fn pack_dir(&self) -> &Utf8Path {
        &self.pack_dir
    }

    /// Global settings file
    pub fn config_path(&self) -> Utf8PathBuf {
        self.pack_dir.join("config.toml")
    }

    /// Source tree of the active packset
    pub fn packset_dir(&self) -> &Utf8Path {
        &self.packset_dir
    }

    /// Search path followed by the packset source tree
    pub fn combined_path(&self) -> &str {
        &self.combined_path
    }

    /// Directory a package with this import path is fetched into
    pub fn package_dir(&self, import_path: &str) -> ConfigResult<Utf8PathBuf> {
        join_import(&self.packset_dir, import_path)
    }

    /// Find a package in the workspace roots, then in the packset
    pub fn package_exists(&self, import_path: &str) -> ConfigResult<Option<Utf8PathBuf>> {
        let sources = self.roots.iter().map(|root| root.join("src"));

        for base in sources.chain(std::iter::once(self.packset_dir.clone())) {
            let candidate = join_import(&base, import_path)?;
            if dir_exists(&candidate)? {
                tracing::debug!("Found {} at {}", import_path, candidate);
                return Ok(Some(candidate));
            }
        }

        Ok(None)
    }
}

fn list_separator() -> &'static str {
    if cfg!(windows) {
        ";"
    } else {
        ":"
    }
}

fn join_import(base: &Utf8Path, import_path: &str) -> ConfigResult<Utf8PathBuf> {
    let joined = safe_join(base.as_std_path(), import_path)?;
    Utf8PathBuf::try_from(joined).map_err(|e| PackError::ConfigValidation {
        field: "import path".to_string(),
        reason: format!("not valid UTF-8: {}", e.as_path().display()),
    })
}

/// Create `dir` and its parents if missing, returning whether anything was created
pub fn ensure_directory(dir: &Utf8Path) -> ConfigResult<bool> {
    if dir_exists(dir)? {
        return Ok(false);
    }

    std::fs::create_dir_all(dir)
        .map_err(|e| PackError::io(format!("Failed to create {}", dir), e))?;
    tracing::debug!("Created {}", dir);
    Ok(true)
}

/// Whether `dir` exists as a directory; a file at that path is an error
pub fn dir_exists(dir: &Utf8Path) -> ConfigResult<bool> {
    match std::fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(true),
        Ok(_) => Err(PackError::ConfigValidation {
            field: "directory".to_string(),
            reason: format!("{dir} exists but is not a directory"),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(PackError::io(format!("Failed to inspect {}", dir), e)),
    }
}
