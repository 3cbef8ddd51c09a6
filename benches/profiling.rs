use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use eda_report::execution::{analyze, AnalysisOptions};
use eda_report::profiling::{correlation_matrix, summarize};
use eda_report::types::{Column, Table, Value};

fn synthetic_table(n_rows: usize) -> Table {
    let cities = ["Moscow", "Kazan", "Omsk", "Perm", "Tver"];
    Table::new(vec![
        Column::new("id", (0..n_rows as i64).map(Value::Int64)),
        Column::new(
            "age",
            (0..n_rows).map(|i| if i % 17 == 0 { Value::Null } else { Value::Int64((i % 60) as i64 + 18) }),
        ),
        Column::new("score", (0..n_rows).map(|i| Value::Float64((i * 37 % 101) as f64 / 7.0))),
        Column::new("balance", (0..n_rows).map(|i| Value::Float64(if i % 3 == 0 { 0.0 } else { i as f64 * 1.5 }))),
        Column::new("city", (0..n_rows).map(|i| Value::text(cities[i % cities.len()]))),
        Column::new("email", (0..n_rows).map(|i| Value::text(format!("user{i}@example.com")))),
    ])
    .expect("synthetic columns share a length")
}

fn bench_profiling(c: &mut Criterion) {
    let mut group = c.benchmark_group("profiling");
    for n_rows in [1_000usize, 10_000, 100_000] {
        let table = synthetic_table(n_rows);

        group.bench_with_input(BenchmarkId::new("summarize", n_rows), &table, |b, t| {
            b.iter(|| summarize(black_box(t)))
        });
        group.bench_with_input(BenchmarkId::new("correlation_matrix", n_rows), &table, |b, t| {
            b.iter(|| correlation_matrix(black_box(t)))
        });

        let sequential = AnalysisOptions {
            parallel: false,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("analyze_sequential", n_rows), &table, |b, t| {
            b.iter(|| analyze(black_box(t), &sequential))
        });
        group.bench_with_input(BenchmarkId::new("analyze_parallel", n_rows), &table, |b, t| {
            b.iter(|| analyze(black_box(t), &AnalysisOptions::default()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_profiling);
criterion_main!(benches);
