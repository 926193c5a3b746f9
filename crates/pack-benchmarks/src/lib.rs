//! pack benchmarking suite
//!
//! Criterion benchmarks for version, constraint and dependency parsing,
//! constraint satisfaction and manifest handling. Shared configuration and
//! input generators live in [`common`].

pub mod common;

pub use common::*;
