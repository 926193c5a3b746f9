//! Command implementations and dispatch logic.
//!
//! Every handler takes the shared [`CommandContext`] and reports failures as
//! [`PackError`] values, which `main` renders through the error formatter.

use camino::{Utf8Path, Utf8PathBuf};
use pack_config::manifest::find_manifest;
use pack_config::settings::{default_config_path, DEFAULT_PACKSET};
use pack_config::{Paths, Settings, SettingsOverrides};
use pack_core::error::{PackError, PackResult};
use std::time::Duration;
use tracing::debug;

pub mod add;
pub mod check;
pub mod fetch;
pub mod parse;
pub mod paths;
pub mod remove;
pub mod satisfies;
pub mod semver;
pub mod tags;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    /// Search path from `--path` or PACK_PATH
    pub search_path: Option<String>,
    pub overrides: SettingsOverrides,
}

impl CommandContext {
    pub fn new(search_path: Option<String>, overrides: SettingsOverrides) -> PackResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| PackError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| PackError::ConfigValidation {
            field: "current directory".to_string(),
            reason: format!("not valid UTF-8: {}", e.as_path().display()),
        })?;

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
            search_path,
            overrides,
        })
    }

    /// Workspace layout and the settings stored in it
    ///
    /// Fails with `WorkspaceNotSet` when no search path is configured.
    pub fn workspace(&self) -> PackResult<(Paths, Settings)> {
        let search_path = self.search_path.as_deref().unwrap_or_default();
        let mut paths = Paths::new(search_path, DEFAULT_PACKSET)?;

        let settings = Settings::load(&paths.config_path(), &self.overrides)?;
        paths.set_packset(&settings.packset)?;

        Ok((paths, settings))
    }

    /// Effective settings, read from the user config directory outside a workspace
    pub fn settings(&self) -> PackResult<Settings> {
        match self.workspace() {
            Ok((_, settings)) => Ok(settings),
            Err(PackError::WorkspaceNotSet { .. }) => {
                Settings::load(&default_config_path()?, &self.overrides)
            },
            Err(err) => Err(err),
        }
    }

    pub fn vcs_timeout(&self) -> PackResult<Duration> {
        Ok(Duration::from_secs(self.settings()?.vcs_timeout))
    }

    /// Resolve a path argument against the working directory
    pub fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// The manifest named on the command line, or the nearest one above the working directory
    pub fn manifest_path(&self, explicit: Option<&Utf8Path>) -> PackResult<Utf8PathBuf> {
        match explicit {
            Some(path) => Ok(self.resolve(path)),
            None => find_manifest(&self.cwd),
        }
    }
}

/// Dispatch a command to its handler
pub fn dispatch_command(command: Commands, ctx: &CommandContext) -> PackResult<()> {
    match command {
        Commands::Semver { literal, json } => {
            debug!("Parsing version: {}", literal);
            semver::execute(&literal, json, ctx)
        },
        Commands::Parse { line, json } => {
            debug!("Parsing dependency line: {}", line);
            parse::execute(&line, json, ctx)
        },
        Commands::Satisfies {
            version,
            constraints,
        } => {
            debug!("Checking {} against {:?}", version, constraints);
            satisfies::execute(&version, &constraints, ctx)
        },
        Commands::Tags { dir, vcs } => {
            debug!("Listing tags (dir: {:?}, vcs: {:?})", dir, vcs);
            tags::execute(dir.as_deref(), vcs, ctx)
        },
        Commands::Fetch { line } => {
            debug!("Fetching: {}", line);
            fetch::execute(&line, ctx)
        },
        Commands::Paths => paths::execute(ctx),
        Commands::Check { manifest } => {
            debug!("Checking manifest {:?}", manifest);
            check::execute(manifest.as_deref(), ctx)
        },
        Commands::Add { line, manifest } => {
            debug!("Adding dependency: {}", line);
            add::execute(&line, manifest.as_deref(), ctx)
        },
        Commands::Remove { name, manifest } => {
            debug!("Removing dependency: {}", name);
            remove::execute(&name, manifest.as_deref(), ctx)
        },
    }
}
