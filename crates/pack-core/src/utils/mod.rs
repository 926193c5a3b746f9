//! Utility functions and helpers.
//!
//! Common functionality used across multiple pack crates.

pub mod path;

// Re-export commonly used utilities
pub use path::{get_extension, is_safe_path, normalize_path, safe_join};
