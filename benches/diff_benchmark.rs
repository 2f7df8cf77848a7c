//! Benchmark measuring row classification and end-to-end snapshot diffs.
//!
//! - **`diff_rows`**: in-memory classification of synthetic rows, with about
//!   10% of keys deleted and 10% inserted, under both row orders.
//! - **`diff_snapshots`**: the full pipeline over two in-memory SQLite
//!   databases, key resolution and statement rendering included.
#![allow(clippy::cast_precision_loss)] // Synthetic scores stay far below 2^52

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rusqlite::Connection;
use sqlite_data_diff::schema::{Column, PrimaryKey, TableSchema};
use sqlite_data_diff::{
    DiffConfig, KeyOrigin, Row, RowOrder, SqliteSnapshot, Value, diff_rows, diff_snapshots,
};

const SIZES: [i64; 3] = [1_000, 10_000, 50_000];

fn row(id: i64) -> Row {
    vec![
        Value::Integer(id),
        Value::Text(format!("user{id}@example.com")),
        Value::Real(id as f64 * 0.5),
        if id % 7 == 0 {
            Value::Null
        } else {
            Value::Blob(id.to_le_bytes().to_vec())
        },
    ]
}

/// Old rows are `0..n`, new rows are `n/10..n + n/10`, both in descending order.
fn fixture(n: i64) -> (Vec<Row>, Vec<Row>) {
    let shift = n / 10;
    let old = (0..n).rev().map(row).collect();
    let new = (shift..n + shift).rev().map(row).collect();
    (old, new)
}

fn schema() -> TableSchema {
    TableSchema::new(
        "users",
        vec![
            Column::new("id", "INTEGER").primary_key(1),
            Column::new("email", "TEXT"),
            Column::new("score", "REAL"),
            Column::new("avatar", "BLOB"),
        ],
    )
}

fn bench_diff_rows(c: &mut Criterion) {
    let schema = schema();
    let key = PrimaryKey::new(&schema, vec![0], KeyOrigin::Declared).unwrap();

    let mut group = c.benchmark_group("diff_rows");
    for n in SIZES {
        for order in [RowOrder::AsRetrieved, RowOrder::SortedByKey] {
            let (old, new) = fixture(n);
            group.bench_with_input(
                BenchmarkId::new(format!("{order:?}"), n),
                &(old, new),
                |b, (old, new)| {
                    b.iter_batched(
                        || (old.clone(), new.clone()),
                        |(old, new)| diff_rows("users", &key, old, new, order).unwrap(),
                        BatchSize::LargeInput,
                    );
                },
            );
        }
    }
    group.finish();
}

fn populated(n: i64, shift: i64) -> SqliteSnapshot {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT, score REAL, avatar BLOB);",
    )
    .unwrap();
    let tx = conn.transaction().unwrap();
    {
        let mut stmt = tx
            .prepare("INSERT INTO users VALUES (?1, ?2, ?3, ?4)")
            .unwrap();
        for id in shift..n + shift {
            let avatar = (id % 7 != 0).then(|| id.to_le_bytes().to_vec());
            stmt.execute(rusqlite::params![
                id,
                format!("user{id}@example.com"),
                id as f64 * 0.5,
                avatar
            ])
            .unwrap();
        }
    }
    tx.commit().unwrap();
    SqliteSnapshot::from_connection(conn, "bench")
}

fn bench_diff_snapshots(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_snapshots");
    group.sample_size(20);
    for n in SIZES {
        let old = populated(n, 0);
        let new = populated(n, n / 10);
        let config = DiffConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| diff_snapshots(&old, &new, &config).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_diff_rows, bench_diff_snapshots);
criterion_main!(benches);
