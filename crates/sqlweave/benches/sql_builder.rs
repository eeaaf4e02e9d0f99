use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlweave::exp::{self, ExprExt};
use sqlweave::qb::{self, SelectQb};
use sqlweave::{Record, SqlQb};

#[derive(Clone, Record)]
struct Row {
    id: i64,
    name: String,
    score: f64,
}

/// SELECT col0, col1, ... FROM t WHERE col0 = $1 AND col1 = $2 ...
fn build_select(n: usize) -> SelectQb {
    let cols: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let preds: Vec<_> = (0..n).map(|i| exp::col(format!("col{i}")).eq(i as i64)).collect();
    qb::dialect("postgres").from(["t"]).select(cols).where_(preds)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/render");

    for n in [1, 5, 10, 50, 100] {
        let query = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(query.to_sql()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).to_sql()));
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let query = qb::dialect("mysql")
                    .from(["t"])
                    .where_([exp::col("id").is_in(values.clone())]);
                black_box(query.to_sql())
            });
        });
    }

    group.finish();
}

fn bench_insert_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/insert_records");

    for n in [1, 10, 100] {
        let rows: Vec<Row> = (0..n)
            .map(|i| Row {
                id: i,
                name: format!("row{i}"),
                score: i as f64,
            })
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| {
                let query = qb::dialect("postgres").insert("rows").records(rows.clone());
                black_box(query.to_sql())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render,
    bench_build_and_render,
    bench_in_list,
    bench_insert_records
);
criterion_main!(benches);
