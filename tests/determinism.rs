//! Tests verifying that scripts do not depend on physical row order.

use rusqlite::Connection;
use sqlite_data_diff::{DiffConfig, RowOrder, SqliteSnapshot, diff_snapshots};

fn snapshot(label: &str, schema: &str, ids: &[i64]) -> SqliteSnapshot {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    conn.execute_batch(schema).unwrap();
    for id in ids {
        conn.execute(
            "INSERT INTO t (id, name) VALUES (?1, ?2)",
            rusqlite::params![id, format!("row {id}")],
        )
        .unwrap();
    }
    SqliteSnapshot::from_connection(conn, label)
}

const SCHEMA: &str = "CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT);";
// Without a rowid alias, rows come back in insertion order.
const HEAP_SCHEMA: &str = "CREATE TABLE t (id INTEGER, name TEXT);";

#[test]
fn test_insertion_order_does_not_change_sorted_script() {
    let old_a = snapshot("old", HEAP_SCHEMA, &[5, 1, 4, 2]);
    let new_a = snapshot("new", HEAP_SCHEMA, &[9, 1, 7, 2]);
    let old_b = snapshot("old", HEAP_SCHEMA, &[2, 4, 1, 5]);
    let new_b = snapshot("new", HEAP_SCHEMA, &[2, 7, 9, 1]);

    let config = DiffConfig::default();
    let a = diff_snapshots(&old_a, &new_a, &config).unwrap();
    let b = diff_snapshots(&old_b, &new_b, &config).unwrap();

    assert_eq!(a.script, b.script);
    assert_eq!(
        a.script.statements(),
        [
            "DELETE FROM t WHERE id=4;".to_string(),
            "DELETE FROM t WHERE id=5;".to_string(),
            "INSERT INTO t (id, name) VALUES (7, 'row 7');".to_string(),
            "INSERT INTO t (id, name) VALUES (9, 'row 9');".to_string(),
        ]
    );
}

#[test]
fn test_as_retrieved_follows_snapshot_order() {
    let old = snapshot("old", HEAP_SCHEMA, &[5, 1, 4]);
    let new = snapshot("new", HEAP_SCHEMA, &[1, 9, 7]);

    let config = DiffConfig::default().with_row_order(RowOrder::AsRetrieved);
    let report = diff_snapshots(&old, &new, &config).unwrap();
    assert_eq!(
        report.script.statements(),
        [
            "DELETE FROM t WHERE id=5;".to_string(),
            "DELETE FROM t WHERE id=4;".to_string(),
            "INSERT INTO t (id, name) VALUES (9, 'row 9');".to_string(),
            "INSERT INTO t (id, name) VALUES (7, 'row 7');".to_string(),
        ]
    );
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let old = snapshot("old", SCHEMA, &[1, 2, 3, 10, 11]);
    let new = snapshot("new", SCHEMA, &[2, 3, 12, 13]);
    let config = DiffConfig::default();

    let first = diff_snapshots(&old, &new, &config).unwrap().script.to_sql();
    for _ in 0..3 {
        assert_eq!(diff_snapshots(&old, &new, &config).unwrap().script.to_sql(), first);
    }
}
