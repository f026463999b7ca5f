//! Tree construction and requirement lookup benchmarks.
//!
//! Construction is measured on a mixed document and on progressively
//! smaller variants of it (one nested entry dropped per step). Lookups
//! cover a shallow hit, a deep hit, a whole-array hit, a miss that walks
//! the full tree, and a three-link chain. Every lookup appends to the
//! tree's requirement log, so lookups run against a fresh tree per batch
//! and the log never grows past one batch.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use serde_json::json;
use std::hint::black_box;
use treeprobe::{Requirement, Tree, Value};

fn document() -> Value {
    let amet: Value = [
        ("consectetur", Value::from("adipiscing")),
        ("maximus", Value::from(json!({"integer": "vehicula", "nisl": "in tempus"}))),
        (
            "elit",
            Value::from(json!(["donec", "hendrerit", "turpis", {"vel": "sem"}])),
        ),
        ("gravida", Value::Bool(true)),
        (
            "vestibulum",
            Value::Sequence(vec![
                Value::Float64(36954.02),
                Value::Bool(true),
                Value::Int64(72),
            ]),
        ),
        ("dictum", Value::from(vec!["mi", "eu", "ultrices", "imperdiet"])),
        ("fusce", Value::from(vec![1i64, 2, 4, 3])),
        ("nonQuam", Value::from(vec![5i64, 6, 7, 8])),
        ("sedQuam", Value::from(vec![9i32, 10, 12, 11])),
        ("rutrum", Value::from(vec![1.123f64, 2.123, 4.123, 3.123])),
        ("quisque", Value::from(vec![5.123f32, 6.123, 8.123, 7.123])),
        ("tristique", Value::from(vec![false, true, true, false, true])),
    ]
    .into_iter()
    .collect();

    [
        ("lorem", Value::from("ipsum")),
        ("dolor", Value::Int64(592)),
        ("amet", amet),
    ]
    .into_iter()
    .collect()
}

/// The document with its first `dropped` nested entries removed.
fn reduced(dropped: usize) -> Value {
    let mut doc = document();
    if let Value::Mapping(root) = &mut doc {
        if let Some(Value::Mapping(amet)) = root.get_mut("amet") {
            for _ in 0..dropped.min(amet.len()) {
                amet.shift_remove_index(0);
            }
        }
    }
    doc
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for dropped in [0usize, 3, 6, 9, 12] {
        let doc = reduced(dropped);
        group.bench_with_input(BenchmarkId::from_parameter(dropped), &doc, |b, doc| {
            b.iter(|| Tree::new(black_box(doc)))
        });
    }
    group.finish();
}

fn bench_require(c: &mut Criterion) {
    let doc = document();
    let fresh_tree = || Tree::new(&doc).expect("benchmark document is non-empty");

    let cases = [
        ("shallow_hit", Requirement::for_key("dolor").with_value(592i64)),
        ("deep_hit", Requirement::for_key("vel").with_value("sem")),
        ("whole_array", Requirement::for_value(vec![false, false, true, true, true])),
        ("insensitive", Requirement::for_value("IMPERDIET").case_insensitive()),
        ("miss", Requirement::for_key("foobar")),
    ];

    let mut group = c.benchmark_group("require");
    for (name, requirement) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), requirement, |b, r| {
            b.iter_batched_ref(
                fresh_tree,
                |tree| tree.require(black_box(r)).map(|node| node.id()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();

    let chain = [
        Requirement::for_key("amet"),
        Requirement::for_key("elit"),
        Requirement::for_value("turpis").within(1),
    ];
    c.bench_function("require_chain", |b| {
        b.iter_batched_ref(
            fresh_tree,
            |tree| tree.root().require_all(black_box(&chain)).map(|node| node.id()),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_build, bench_require);
criterion_main!(benches);
