//! Core data types for pack dependency management.
//!
//! This module provides the value types every other crate builds on:
//! - Version literals and their precedence ordering
//! - Comparison operators and constraints
//! - Dependency lines with an optional version-control locator

pub mod constraint;
pub mod dependency;
pub mod grammar;
pub mod operator;
pub mod text;
pub mod version;

// Re-export all public types
pub use constraint::Constraint;
pub use dependency::{Dependency, Locator, VcsScheme};
pub use grammar::{is_valid_name, Grammar};
pub use operator::ComparisonOp;
pub use text::TextForm;
pub use version::{compare_identifiers, compare_releases, Version};
