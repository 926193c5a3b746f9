//! Settings layering, fallback logic, and environment overrides

use crate::manifest::line_column;
use crate::ConfigResult;
use camino::{Utf8Path, Utf8PathBuf};
use pack_core::error::PackError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Packset used when nothing else is configured
pub const DEFAULT_PACKSET: &str = "default";

/// Seconds a version-control command may run when nothing else is configured
pub const DEFAULT_VCS_TIMEOUT: u64 = 300;

/// Effective settings after layering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub packset: String,
    pub vcs_timeout: u64,
}

/// Contents of a settings file, every key optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_timeout: Option<u64>,
}

/// Command-line overrides (highest priority)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub packset: Option<String>,
    pub vcs_timeout: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            packset: DEFAULT_PACKSET.to_string(),
            vcs_timeout: DEFAULT_VCS_TIMEOUT,
        }
    }
}

impl Settings {
    /// Load settings from `config_path`, the environment and `overrides`
    ///
    /// A missing settings file is not an error; a malformed one is.
    pub fn load(config_path: &Utf8Path, overrides: &SettingsOverrides) -> ConfigResult<Self> {
        let file = read_settings_file(config_path)?;
        let env = collect_env_overrides();

        Self::layered(file, &env, overrides)
    }

    /// Merge the layers: defaults, file, environment, command line
    pub fn layered(
        file: Option<SettingsFile>,
        env: &HashMap<String, String>,
        overrides: &SettingsOverrides,
    ) -> ConfigResult<Self> {
        let mut settings = Settings::default();

        if let Some(file) = file {
            if let Some(packset) = file.packset {
                settings.packset = packset;
            }
            if let Some(timeout) = file.vcs_timeout {
                settings.vcs_timeout = timeout;
            }
        }

        for (key, value) in env {
            match key.as_str() {
                "PACK_PACKSET" => settings.packset = value.clone(),
                "PACK_VCS_TIMEOUT" => {
                    settings.vcs_timeout =
                        value.parse().map_err(|e| PackError::ConfigValidation {
                            field: key.clone(),
                            reason: format!("'{value}' is not a number of seconds: {e}"),
                        })?;
                },
                _ => {
                    // Unknown environment variable, ignore
                },
            }
        }

        if let Some(ref packset) = overrides.packset {
            settings.packset = packset.clone();
        }
        if let Some(timeout) = overrides.vcs_timeout {
            settings.vcs_timeout = timeout;
        }

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.packset.trim().is_empty() {
            return Err(PackError::ConfigValidation {
                field: "packset".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.vcs_timeout == 0 {
            return Err(PackError::ConfigValidation {
                field: "vcs-timeout".to_string(),
                reason: "must be at least one second".to_string(),
            });
        }
        Ok(())
    }
}

/// Settings file used when no workspace is configured
pub fn default_config_path() -> ConfigResult<Utf8PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| PackError::ConfigValidation {
        field: "config_dir".to_string(),
        reason: "Could not determine the user configuration directory".to_string(),
    })?;

    let config_dir = Utf8PathBuf::try_from(config_dir).map_err(|e| PackError::ConfigValidation {
        field: "config_dir".to_string(),
        reason: format!("Invalid configuration directory path: {}", e),
    })?;

    Ok(config_dir.join("pack").join("config.toml"))
}

/// Parse a settings file, `None` when it does not exist
pub fn read_settings_file(path: &Utf8Path) -> ConfigResult<Option<SettingsFile>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}", path);
            return Ok(None);
        },
        Err(e) => return Err(PackError::io(format!("Failed to read {}", path), e)),
    };

    let file = toml::from_str(&content).map_err(|e| {
        let location = e
            .span()
            .map(|span| line_column(&content, span.start))
            .map(|(line, column)| format!(" at line {line}, column {column}"))
            .unwrap_or_default();
        PackError::ConfigValidation {
            field: path.to_string(),
            reason: format!("{}{location}", e.message()),
        }
    })?;

    tracing::debug!("Loaded settings from {}", path);
    Ok(Some(file))
}

/// Collect the PACK_* environment variables
pub fn collect_env_overrides() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with("PACK_"))
        .collect()
}
