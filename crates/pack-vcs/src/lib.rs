//! # pack-vcs
//!
//! Version-control plumbing for fetching dependencies.
//!
//! Every operation shells out to the system's `git`, `hg` or `bzr` binary,
//! one synchronous process per call, bounded by a time limit. The crate
//! provides:
//! - [`CommandBuilder`] for running external processes with a timeout
//! - [`Repository`] for cloning, updating, checking out and listing tags
//! - [`CloneSource`] for validating where a repository comes from
//! - [`fetch_dependency`] tying a parsed dependency line to a working copy

pub mod fetch;
pub mod output;
pub mod process;
pub mod repository;
pub mod source;

pub use fetch::{fetch_dependency, FetchOutcome};
pub use process::CommandBuilder;
pub use repository::{detect_scheme, Repository, DEFAULT_TIMEOUT};
pub use source::CloneSource;
