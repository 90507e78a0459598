//! Benchmarks for QuadIndex insertion and pattern lookup

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quadstore_core::TermPattern::Any;
use quadstore_core::{QuadIndex, Triple, TriplePattern};

/// Deterministic pseudo-random test data: many subjects, few predicates,
/// moderate object fan-out, spread over a handful of contexts
fn generate_quads(count: usize) -> Vec<(Triple<String>, String)> {
    (0..count)
        .map(|i| {
            let triple = Triple::new(
                format!("subject-{}", (i * 7919) % 1000),
                format!("predicate-{}", (i * 104729) % 10),
                format!("object-{}", (i * 15485863) % 500),
            );
            (triple, format!("context-{}", i % 8))
        })
        .collect()
}

fn populated_index(count: usize) -> QuadIndex<String> {
    let mut index = QuadIndex::new();
    for (triple, context) in generate_quads(count) {
        index.insert(triple, context);
    }
    index
}

fn bench_insertions(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertions");

    for size in [100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let quads = generate_quads(size);
            b.iter(|| {
                let mut index = QuadIndex::new();
                for (triple, context) in &quads {
                    index.insert(black_box(triple.clone()), black_box(context.clone()));
                }
                index
            });
        });
    }

    group.finish();
}

fn bench_pattern_queries(c: &mut Criterion) {
    let index = populated_index(10000);
    let mut group = c.benchmark_group("pattern_queries");

    group.bench_function("bound_subject", |b| {
        let pattern = TriplePattern::new("subject-42".to_string(), Any, Any);
        b.iter(|| index.triples(black_box(&pattern), None));
    });

    group.bench_function("bound_predicate", |b| {
        let pattern = TriplePattern::new(Any, "predicate-3".to_string(), Any);
        b.iter(|| index.triples(black_box(&pattern), None));
    });

    group.bench_function("bound_subject_predicate", |b| {
        let pattern = TriplePattern::new("subject-42".to_string(), "predicate-3".to_string(), Any);
        b.iter(|| index.triples(black_box(&pattern), None));
    });

    group.bench_function("fully_bound", |b| {
        let pattern = TriplePattern::new(
            "subject-42".to_string(),
            "predicate-3".to_string(),
            "object-7".to_string(),
        );
        b.iter(|| index.triples(black_box(&pattern), None));
    });

    group.finish();
}

fn bench_scoped_vs_union(c: &mut Criterion) {
    let index = populated_index(10000);
    let context = "context-3".to_string();
    let pattern: TriplePattern<String> = TriplePattern::new(Any, "predicate-3".to_string(), Any);
    let mut group = c.benchmark_group("scoped_vs_union");

    group.bench_function("union", |b| {
        b.iter(|| index.triples(black_box(&pattern), None));
    });

    group.bench_function("scoped", |b| {
        b.iter(|| index.triples(black_box(&pattern), Some(&context)));
    });

    group.finish();
}

fn bench_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("removal");

    group.bench_function("remove_context", |b| {
        b.iter_batched(
            || populated_index(1000),
            |mut index| index.remove_context(black_box(&"context-3".to_string())),
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("remove_subject_slice", |b| {
        let pattern = TriplePattern::new("subject-42".to_string(), Any, Any);
        b.iter_batched(
            || populated_index(1000),
            |mut index| index.remove(black_box(&pattern), None),
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insertions,
    bench_pattern_queries,
    bench_scoped_vs_union,
    bench_removal
);
criterion_main!(benches);
