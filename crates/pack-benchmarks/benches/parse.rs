//! Parsing performance benchmarks
//!
//! Benchmarks version literals, single constraint tokens and complete
//! dependency lines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pack_benchmarks::{constraints, criterion_config, dependency_lines, release_versions, simple_versions};
use pack_core::types::{Constraint, Dependency, Version};

fn bench_version_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_parsing");

    for (label, versions) in [
        ("simple", simple_versions(1000)),
        ("release", release_versions(1000)),
    ] {
        group.bench_with_input(BenchmarkId::new("parse", label), &versions, |b, versions| {
            let mut index = 0;
            b.iter(|| {
                let version = &versions[index % versions.len()];
                index += 1;
                black_box(Version::parse(version))
            });
        });
    }

    group.bench_function("display", |b| {
        let version = Version::parse("12.40.7-beta.3.x7").unwrap();
        b.iter(|| black_box(version.to_string()));
    });

    group.finish();
}

fn bench_constraint_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("constraint_parsing");
    let tokens = constraints(1000);

    group.bench_function("parse", |b| {
        let mut index = 0;
        b.iter(|| {
            let token = &tokens[index % tokens.len()];
            index += 1;
            black_box(Constraint::parse(token))
        });
    });

    group.bench_function("malformed", |b| {
        b.iter(|| black_box(Constraint::parse(black_box("=>1.2.3"))));
    });

    group.finish();
}

fn bench_dependency_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_parsing");

    for count in [10, 100, 1000] {
        let lines = dependency_lines(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("lines", count), &lines, |b, lines| {
            b.iter(|| {
                for line in lines {
                    black_box(Dependency::parse(line).unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_version_parsing, bench_constraint_parsing, bench_dependency_parsing
}
criterion_main!(benches);
