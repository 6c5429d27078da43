//! Criterion benchmark harness: query battery latency for both workloads at
//! two fixture sizes, plus bulk population of the corpus workload.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rusqlite::Connection;
use std::time::Duration;
use wabench_sqlite::fixtures::{generate, FixtureParams, Fixtures};
use wabench_sqlite::query::run_battery;
use wabench_sqlite::schema::corpus::CorpusWorkload;
use wabench_sqlite::schema::features::FeatureWorkload;
use wabench_sqlite::schema::{configure_connection, Workload};

/// Fixture sizes to benchmark.
fn fixture_levels() -> Vec<(&'static str, FixtureParams)> {
    vec![
        (
            "small",
            FixtureParams {
                dictionary_words: 1_000,
                constants: 5_000,
                primes: 1_000,
                texts: 500,
            },
        ),
        ("std", FixtureParams::standard()),
    ]
}

/// Create an in-memory SQLite database, populate it, and return the connection.
fn setup_db(workload: &dyn Workload, fixtures: &Fixtures) -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to open in-memory SQLite");
    configure_connection(&conn).expect("Failed to configure connection");
    workload
        .create_tables(&conn)
        .expect("Failed to create tables");
    workload
        .populate(&conn, fixtures)
        .expect("Failed to populate");
    conn
}

fn bench_battery(c: &mut Criterion, workload: &dyn Workload) {
    let mut group = c.benchmark_group(format!("queries/{}", workload.name()));
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(30);

    for (label, params) in fixture_levels() {
        let fixtures = generate(&params, &workload.recipe());
        let conn = setup_db(workload, &fixtures);

        group.bench_with_input(BenchmarkId::from_parameter(label), &conn, |b, conn| {
            b.iter(|| run_battery(conn, workload.queries()));
        });
    }
    group.finish();
}

fn bench_queries_corpus(c: &mut Criterion) {
    bench_battery(c, &CorpusWorkload::new());
}

fn bench_queries_features(c: &mut Criterion) {
    bench_battery(c, &FeatureWorkload::new());
}

fn bench_populate_corpus(c: &mut Criterion) {
    let workload = CorpusWorkload::new();
    let (_, params) = &fixture_levels()[0];
    let fixtures = generate(params, &workload.recipe());

    let mut group = c.benchmark_group("populate/corpus");
    group.sample_size(10);
    group.bench_function("small", |b| {
        b.iter_batched(
            || {
                let conn = Connection::open_in_memory().expect("open");
                configure_connection(&conn).expect("configure");
                workload.create_tables(&conn).expect("create tables");
                conn
            },
            |conn| workload.populate(&conn, &fixtures).expect("populate"),
            BatchSize::PerIteration,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_queries_corpus,
    bench_queries_features,
    bench_populate_corpus
);
criterion_main!(benches);
