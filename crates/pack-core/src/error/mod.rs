//! Error types and result aliases for pack operations.
//!
//! Every crate in the workspace reports failures through [`PackError`]. The
//! first group of variants are the validation failures produced by the
//! version and dependency parsers; the rest belong to the collaborators that
//! read manifests, locate workspaces and drive version-control binaries.

use crate::types::Grammar;
use thiserror::Error;

/// Unified error type for all pack operations
#[derive(Error, Debug)]
pub enum PackError {
    // Parse errors
    #[error("Input must not be empty")]
    EmptyInput,

    #[error("[{input}] must be in the form: {grammar}")]
    Format { grammar: Grammar, input: String },

    #[error("[{input}] {component} version does not fit in an unsigned 64-bit integer")]
    IntegerOverflow {
        component: &'static str,
        input: String,
    },

    #[error("[{operator}] is not a comparison operator, expected one of: =, !=, >, <, >=, <=, ~")]
    OperatorFormat { operator: String },

    // Manifest and configuration errors
    #[error("Failed to parse {format} manifest: {message} at line {line}, column {column}")]
    ManifestParse {
        format: &'static str,
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error("{variable} must be set to locate the workspace")]
    WorkspaceNotSet { variable: &'static str },

    // Version control errors
    #[error("Repository {path} does not exist")]
    RepositoryMissing { path: String },

    #[error("`{program} {args}` failed: {stderr}")]
    VcsCommand {
        program: String,
        args: String,
        stderr: String,
    },

    #[error("`{program}` did not finish within {seconds}s")]
    CommandTimeout { program: String, seconds: u64 },

    #[error("Expected \"{location}\" to be an absolute path or url: {reason}")]
    InvalidSource { location: String, reason: String },

    #[error("No version of {name} satisfies {constraints}")]
    Unsatisfied { name: String, constraints: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for pack operations
pub type PackResult<T> = Result<T, PackError>;

impl PackError {
    /// Create a format error for the given grammar
    pub fn format(grammar: Grammar, input: impl Into<String>) -> Self {
        Self::Format {
            grammar,
            input: input.into(),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Whether this error came from validating user input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PackError::EmptyInput
                | PackError::Format { .. }
                | PackError::IntegerOverflow { .. }
                | PackError::OperatorFormat { .. }
        )
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PackError::Io { .. } | PackError::CommandTimeout { .. } | PackError::VcsCommand { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            PackError::Format {
                grammar: Grammar::Version | Grammar::Release,
                ..
            } => Some("Versions look like 1.2.3 or 1.2.3-beta.2, without leading zeros"),
            PackError::Format {
                grammar: Grammar::Constraint,
                ..
            } => Some("Constraints are an optional operator followed by a version, e.g. >=1.2.0"),
            PackError::Format {
                grammar: Grammar::Locator,
                ..
            } => Some("Locators start with git, hg or bzr, e.g. git:https://example.com/repo"),
            PackError::WorkspaceNotSet { .. } => {
                Some("Export PACK_PATH or pass --path to point at your workspace")
            },
            PackError::RepositoryMissing { .. } => {
                Some("Run `pack fetch` for the dependency before using its repository")
            },
            PackError::CommandTimeout { .. } => {
                Some("Raise the limit with --timeout or PACK_VCS_TIMEOUT")
            },
            PackError::Unsatisfied { .. } => {
                Some("Relax the constraints or publish a matching tag")
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_names_expected_form() {
        let err = PackError::format(Grammar::Version, "4.2.01");
        let message = err.to_string();
        assert!(message.contains("[4.2.01]"));
        assert!(message.contains("major.minor.patch"));
    }

    #[test]
    fn test_validation_errors_are_not_recoverable() {
        let err = PackError::EmptyInput;
        assert!(err.is_validation());
        assert!(!err.is_recoverable());

        let err = PackError::CommandTimeout {
            program: "git".to_string(),
            seconds: 5,
        };
        assert!(!err.is_validation());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_suggestions() {
        assert!(PackError::format(Grammar::Locator, "svn:x").suggestion().is_some());
        assert!(PackError::WorkspaceNotSet { variable: "PACK_PATH" }
            .suggestion()
            .is_some());
        assert!(PackError::EmptyInput.suggestion().is_none());
    }
}
