//! Working copies driven through the git, hg and bzr command-line tools.
//!
//! Each operation runs one external process with the repository's time limit.
//! The per-system commands are:
//!
//! | op       | git               | hg              | bzr                  |
//! |----------|-------------------|-----------------|----------------------|
//! | status   | `status`          | `status`        | `status`             |
//! | clone    | `clone SRC DIR`   | `clone SRC DIR` | `branch SRC DIR`     |
//! | update   | `fetch`           | `pull`          | `pull`               |
//! | checkout | `checkout REV`    | `checkout REV`  | `update -r tag:REV`  |
//! | tags     | `tag -l`          | `tags`          | `tags`               |
//! | current  | `describe --tags` | `identify`      | `tags -r -1`         |

use std::path::{Path, PathBuf};
use std::time::Duration;

use pack_core::error::{PackError, PackResult};
use pack_core::types::{VcsScheme, Version};

use crate::output::{parse_git_describe, parse_hg_identify, parse_tags, GIT_NO_TAGS};
use crate::process::CommandBuilder;
use crate::source::CloneSource;

/// Default time limit for a single version-control command
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// A working copy on disk
#[derive(Debug, Clone)]
pub struct Repository {
    scheme: VcsScheme,
    path: PathBuf,
    timeout: Duration,
}

impl Repository {
    pub fn new(scheme: VcsScheme, path: impl Into<PathBuf>) -> Self {
        Self {
            scheme,
            path: path.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Open an existing working copy, detecting its system from marker directories
    pub fn open(path: impl Into<PathBuf>) -> PackResult<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(PackError::RepositoryMissing {
                path: path.display().to_string(),
            });
        }

        let scheme = detect_scheme(&path).ok_or_else(|| PackError::ConfigValidation {
            field: "repository".to_string(),
            reason: format!("{} has no .git, .hg or .bzr directory", path.display()),
        })?;

        Ok(Self::new(scheme, path))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn scheme(&self) -> VcsScheme {
        self.scheme
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn command(&self) -> CommandBuilder {
        CommandBuilder::new(self.scheme.as_str())
            .cwd(&self.path)
            .timeout(self.timeout)
    }

    fn ensure_exists(&self) -> PackResult<()> {
        if self.path.is_dir() {
            Ok(())
        } else {
            Err(PackError::RepositoryMissing {
                path: self.path.display().to_string(),
            })
        }
    }

    /// Run the status command, proving the directory is a usable working copy
    pub fn status(&self) -> PackResult<String> {
        self.ensure_exists()?;
        let output = self.command().arg("status").exec_checked()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Clone `source` into this repository's path
    ///
    /// Returns `false` without running anything when the path already exists.
    pub fn clone_from(&self, source: &CloneSource) -> PackResult<bool> {
        if self.path.exists() {
            tracing::debug!("{} already exists, not cloning", self.path.display());
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PackError::io(format!("Failed to create {}", parent.display()), e)
            })?;
        }

        let verb = match self.scheme {
            VcsScheme::Git | VcsScheme::Hg => "clone",
            VcsScheme::Bzr => "branch",
        };

        tracing::info!("Cloning {} into {}", source, self.path.display());
        CommandBuilder::new(self.scheme.as_str())
            .arg(verb)
            .arg(source.as_arg())
            .arg(self.path.display().to_string())
            .timeout(self.timeout)
            .exec_checked()?;

        Ok(true)
    }

    /// Pull new history from the default remote
    pub fn update(&self) -> PackResult<()> {
        self.ensure_exists()?;

        let verb = match self.scheme {
            VcsScheme::Git => "fetch",
            VcsScheme::Hg | VcsScheme::Bzr => "pull",
        };

        tracing::info!("Updating {}", self.path.display());
        self.command().arg(verb).exec_checked()?;
        Ok(())
    }

    /// Switch the working copy to `revision`
    pub fn checkout(&self, revision: &str) -> PackResult<()> {
        self.ensure_exists()?;

        let command = match self.scheme {
            VcsScheme::Git | VcsScheme::Hg => self.command().args(["checkout", revision]),
            VcsScheme::Bzr => self.command().args(["update", "-r"]).arg(format!("tag:{revision}")),
        };

        tracing::info!("Checking out {} in {}", revision, self.path.display());
        command.exec_checked()?;
        Ok(())
    }

    /// Version-shaped tags, lowest precedence first
    pub fn tags(&self) -> PackResult<Vec<Version>> {
        self.ensure_exists()?;

        let command = match self.scheme {
            VcsScheme::Git => self.command().args(["tag", "-l"]),
            VcsScheme::Hg | VcsScheme::Bzr => self.command().arg("tags"),
        };

        let output = command.exec_checked()?;
        Ok(parse_tags(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Version tag of the working copy, `None` when it is not on one
    pub fn current_tag(&self) -> PackResult<Option<Version>> {
        self.ensure_exists()?;

        match self.scheme {
            VcsScheme::Git => {
                let command = self.command().args(["describe", "--tags"]);
                let output = command.exec()?;
                let stderr = String::from_utf8_lossy(&output.stderr);

                if output.status.success() {
                    Ok(parse_git_describe(&String::from_utf8_lossy(&output.stdout)))
                } else if stderr.contains(GIT_NO_TAGS) {
                    Ok(None)
                } else {
                    Err(PackError::VcsCommand {
                        program: command.program().to_string(),
                        args: command.display_args(),
                        stderr: stderr.trim().to_string(),
                    })
                }
            },
            VcsScheme::Hg => {
                let output = self.command().arg("identify").exec_checked()?;
                Ok(parse_hg_identify(&String::from_utf8_lossy(&output.stdout)))
            },
            VcsScheme::Bzr => {
                let output = self.command().args(["tags", "-r", "-1"]).exec_checked()?;
                Ok(parse_tags(&String::from_utf8_lossy(&output.stdout)).pop())
            },
        }
    }
}

/// Detect the version-control system of a working copy
pub fn detect_scheme(dir: &Path) -> Option<VcsScheme> {
    [
        (".git", VcsScheme::Git),
        (".hg", VcsScheme::Hg),
        (".bzr", VcsScheme::Bzr),
    ]
    .into_iter()
    .find(|(marker, _)| dir.join(marker).exists())
    .map(|(_, scheme)| scheme)
}
