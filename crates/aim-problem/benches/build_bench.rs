//! Benchmarks for problem construction
//!
//! Run with: cargo bench -p aim-problem

use aim_problem::{EdgeList, GraphProblemAdapter, QumoBuilder};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use petgraph::graph::UnGraph;

/// Benchmark building dense QUMO problems term by term
fn bench_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder");

    for n in &[16_usize, 64, 256] {
        group.bench_with_input(BenchmarkId::new("dense", n), n, |b, &n| {
            b.iter(|| {
                let mut builder = QumoBuilder::new();
                for i in 0..n {
                    for j in i..n {
                        builder.add(black_box(0.5), i, Some(j)).unwrap();
                    }
                    builder.add(black_box(1.0), i, None).unwrap();
                }
                builder.build().unwrap()
            });
        });
    }

    group.finish();
}

/// Benchmark graph conversion on ring graphs
fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");

    for n in &[64_u32, 512] {
        let edges: Vec<(u32, u32)> = (0..*n).map(|i| (i, (i + 1) % n)).collect();
        let graph = UnGraph::<(), ()>::from_edges(&edges);
        group.bench_with_input(BenchmarkId::new("ring", n), &graph, |b, g| {
            b.iter(|| GraphProblemAdapter::from_graph(black_box(g)).unwrap());
        });
    }

    let text: String = std::iter::once("header".to_string())
        .chain((0..1000).map(|i| format!("{i} {} 1.5", (i + 1) % 1000)))
        .collect::<Vec<_>>()
        .join("\n");
    group.bench_function("parse_edgelist_1000", |b| {
        b.iter(|| EdgeList::parse(black_box(&text)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_builder, bench_graph);
criterion_main!(benches);
