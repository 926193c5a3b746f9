//! # pack-core
//!
//! Core types and utilities shared across all pack crates.
//!
//! This crate provides:
//! - Version, Constraint and Dependency types with rkyv serialization support
//! - The precedence rules used to decide whether a version satisfies a constraint
//! - PackError enum for unified error handling
//! - Path helpers used when mapping import paths onto disk
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types and their text grammars
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers
//!
//! Every parser here is pure: it returns a fully validated value or a
//! [`PackError`] describing the rejected input.

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{PackError, PackResult};
pub use types::{
    compare_releases, is_valid_name, ComparisonOp, Constraint, Dependency, Grammar, Locator,
    TextForm, VcsScheme, Version,
};
