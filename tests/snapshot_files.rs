//! Tests opening on-disk snapshots and writing scripts next to them.

use std::path::Path;

use rusqlite::Connection;
use sqlite_data_diff::{
    DiffConfig, Error, SqliteSnapshot, diff_snapshots, script_file_name, write_script,
};

fn create_db(path: &Path, sql: &str) {
    let conn = Connection::open(path).expect("Failed to create database");
    conn.execute_batch(sql).expect("Failed to seed database");
}

#[test]
fn test_diff_file_snapshots_and_write_script() {
    let dir = tempfile::tempdir().unwrap();
    let old_path = dir.path().join("contentsOrig.db3");
    let new_path = dir.path().join("contentsNew.db3");
    create_db(
        &old_path,
        "CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT);
         INSERT INTO items VALUES (1, 'sword'), (2, 'shield');",
    );
    create_db(
        &new_path,
        "CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT);
         INSERT INTO items VALUES (2, 'shield'), (3, 'bow');",
    );

    let old = SqliteSnapshot::open(&old_path).unwrap();
    let new = SqliteSnapshot::open(&new_path).unwrap();
    let report = diff_snapshots(&old, &new, &DiffConfig::default()).unwrap();

    let timestamp = chrono::NaiveDate::from_ymd_opt(2025, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    let script_path = dir
        .path()
        .join(script_file_name(&old_path, &new_path, timestamp));
    assert!(script_path.ends_with("contentsOrig_to_contentsNew_20250102_030405.sql"));

    write_script(&script_path, &report.script).unwrap();
    assert_eq!(
        std::fs::read_to_string(&script_path).unwrap(),
        "DELETE FROM items WHERE id=1;\nINSERT INTO items (id, label) VALUES (3, 'bow');\n"
    );
}

#[test]
fn test_snapshots_are_opened_read_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ro.db3");
    create_db(&path, "CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1);");

    let snapshot = SqliteSnapshot::open(&path).unwrap();
    assert!(
        snapshot
            .connection()
            .execute("INSERT INTO t VALUES (2)", [])
            .is_err()
    );
}

#[test]
fn test_missing_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SqliteSnapshot::open(dir.path().join("absent.db3")).unwrap_err();
    assert!(matches!(err, Error::Open { .. }), "{err:?}");
}

#[test]
fn test_non_database_file_is_an_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.db3");
    std::fs::write(&path, "this is definitely not an sqlite database file, just text").unwrap();

    let err = SqliteSnapshot::open(&path).unwrap_err();
    match err {
        Error::Open { snapshot, .. } => assert!(snapshot.ends_with("notes.db3")),
        other => panic!("unexpected error: {other:?}"),
    }
}
