use rusqlite::Connection;
use tracker_core::db::migrations::{latest_version, table_columns};
use tracker_core::db::{ensure_schema, open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "projects");
    assert_table_exists(&conn, "milestones");
    assert_table_exists(&conn, "resources");

    let columns = table_columns(&conn, "projects").unwrap();
    for column in [
        "id",
        "name",
        "product",
        "business_owner",
        "scrum_master",
        "platforms",
        "planned_go_live",
        "status",
        "delivery_month",
        "notes",
        "created_at",
    ] {
        assert!(columns.contains(&column.to_string()), "missing {column}");
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracker.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO projects (name, product) VALUES ('Alpha', 'ProductX');",
            [],
        )
        .unwrap();
    let columns_before = table_columns(&conn_first, "projects").unwrap();
    drop(conn_first);

    let mut conn_second = open_db(&path).unwrap();
    ensure_schema(&mut conn_second).unwrap();

    assert_eq!(schema_version(&conn_second), latest_version());
    assert_eq!(table_columns(&conn_second, "projects").unwrap(), columns_before);
    assert_eq!(row_count(&conn_second, "projects"), 1);
}

#[test]
fn legacy_schema_is_upgraded_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            product_squad TEXT,
            business_owner TEXT,
            planned_go_live DATE,
            status TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        INSERT INTO projects (name, product_squad, business_owner, planned_go_live, status)
        VALUES ('Legacy', 'Squad A', 'Dana', '2025-11-30', 'Go-Live');",
    )
    .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();

    let columns = table_columns(&conn, "projects").unwrap();
    assert!(columns.contains(&"product".to_string()));
    assert!(!columns.contains(&"product_squad".to_string()));
    for column in ["scrum_master", "platforms", "delivery_month", "notes"] {
        assert!(columns.contains(&column.to_string()), "missing {column}");
    }

    let (product, owner, notes): (String, String, Option<String>) = conn
        .query_row(
            "SELECT product, business_owner, notes FROM projects WHERE name = 'Legacy';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(product, "Squad A");
    assert_eq!(owner, "Dana");
    assert_eq!(notes, None);
    assert_table_exists(&conn, "milestones");
    assert_table_exists(&conn, "resources");
}

#[test]
fn legacy_schema_with_partial_columns_only_gains_missing_ones() {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            product TEXT,
            platforms TEXT,
            status TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        INSERT INTO projects (name, product, platforms) VALUES ('Beta', 'Y', 'Web');",
    )
    .unwrap();

    ensure_schema(&mut conn).unwrap();
    ensure_schema(&mut conn).unwrap();

    let columns = table_columns(&conn, "projects").unwrap();
    let platform_columns = columns.iter().filter(|c| c.as_str() == "platforms").count();
    assert_eq!(platform_columns, 1);
    assert!(columns.contains(&"scrum_master".to_string()));

    let platforms: String = conn
        .query_row("SELECT platforms FROM projects;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(platforms, "Web");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
