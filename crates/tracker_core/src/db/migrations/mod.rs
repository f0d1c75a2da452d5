//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically.
//! - Upgrade databases created by older tracker builds, whose `projects`
//!   table may still carry `product_squad` or lack the detail columns.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Every step is idempotent on its own: re-running a step against a schema
//!   it already produced changes nothing.
//! - Steps only create, rename or add; existing rows are never dropped.
//! - Applied migration version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Columns added to `projects` after the first tracker release.
const PROJECT_DETAIL_COLUMNS: &[&str] = &["scrum_master", "platforms", "delivery_month", "notes"];

#[derive(Debug, Clone, Copy)]
enum Step {
    Sql(&'static str),
    Apply(fn(&Connection) -> rusqlite::Result<()>),
}

/// One ordered schema change.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    step: Step,
}

impl Migration {
    /// Runs this step on `conn` without touching `user_version`.
    pub fn apply(&self, conn: &Connection) -> DbResult<()> {
        match self.step {
            Step::Sql(sql) => conn.execute_batch(sql)?,
            Step::Apply(apply) => apply(conn)?,
        }
        Ok(())
    }
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_core_tables",
        step: Step::Sql(include_str!("0001_create_core_tables.sql")),
    },
    Migration {
        version: 2,
        name: "rename_product_squad",
        step: Step::Apply(rename_product_squad),
    },
    Migration {
        version: 3,
        name: "add_project_detail_columns",
        step: Step::Apply(add_project_detail_columns),
    },
];

/// Returns the ordered migration registry.
pub fn migrations() -> &'static [Migration] {
    MIGRATIONS
}

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
///
/// Safe to call on every process start. An up-to-date database is left
/// untouched; a database newer than this binary is rejected.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        migration.apply(&tx)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }
    tx.commit()?;

    Ok(())
}

/// Lists column names of `table` in declaration order.
pub fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}

fn rename_product_squad(conn: &Connection) -> rusqlite::Result<()> {
    let columns = table_columns(conn, "projects")?;
    let has = |name: &str| columns.iter().any(|column| column == name);

    if has("product_squad") && !has("product") {
        conn.execute_batch("ALTER TABLE projects RENAME COLUMN product_squad TO product;")?;
    }
    Ok(())
}

fn add_project_detail_columns(conn: &Connection) -> rusqlite::Result<()> {
    let columns = table_columns(conn, "projects")?;
    for column in PROJECT_DETAIL_COLUMNS {
        if !columns.iter().any(|existing| existing == column) {
            conn.execute_batch(&format!("ALTER TABLE projects ADD COLUMN {column} TEXT;"))?;
        }
    }
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
