//! Common utilities for benchmarks

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

/// Configure criterion with flamegraph profiling support
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_secs(3))
        .measurement_time(std::time::Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Plain `major.minor.patch` literals
pub fn simple_versions(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{}.{}.{}", i % 10, (i / 10) % 10, (i / 100) % 10))
        .collect()
}

/// Literals mixing pre-release identifiers with plain versions
pub fn release_versions(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let core = format!("{}.{}.{}", i % 10, (i / 10) % 10, (i / 100) % 10);
            match i % 4 {
                0 => format!("{core}-alpha.{}", i % 5 + 1),
                1 => format!("{core}-beta.{}.x{}", i % 3 + 1, i % 7),
                2 => format!("{core}-rc{}", i % 2),
                _ => core,
            }
        })
        .collect()
}

/// Constraint tokens cycling through every operator
pub fn constraints(count: usize) -> Vec<String> {
    let operators = ["", "=", "!=", ">", "<", ">=", "<=", "~"];

    (0..count)
        .map(|i| {
            let operator = operators[i % operators.len()];
            format!("{}{}.{}.{}", operator, i % 10, (i / 10) % 10, (i / 100) % 10)
        })
        .collect()
}

/// Dependency lines with up to three constraints and an optional locator
pub fn dependency_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let mut line = format!("package-{i}");
            for c in 0..(i % 4) {
                line.push_str(&format!(" >={}.{}.0", c + 1, i % 10));
            }
            match i % 3 {
                0 => line.push_str(&format!(" git:github.com/bench/package-{i}")),
                1 => line.push_str(" hg"),
                _ => {},
            }
            line
        })
        .collect()
}

/// A pack.toml document with `dep_count` dependencies
pub fn toml_manifest(dep_count: usize) -> String {
    let mut content = String::from(
        r#"name = "bench"
import-path = "github.com/bench/bench"
version = "1.0.0"
summary = "A test package for benchmarking"
license = "MIT"
"#,
    );

    content.push_str("dependencies = [\n");
    for i in 0..dep_count {
        content.push_str(&format!(
            "    \"package-{} ~{}.{}.{} !={}.{}.9\",\n",
            i,
            i % 5 + 1,
            i % 10,
            i % 5,
            i % 5 + 1,
            i % 10
        ));
    }
    content.push_str("]\n");

    content.push_str("\n[repository]\ntype = \"git\"\nurl = \"https://github.com/bench/bench\"\n");
    content
}
