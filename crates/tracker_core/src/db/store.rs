//! Scoped connection acquisition.
//!
//! # Responsibility
//! - Hand a ready, migrated connection to exactly one unit of work.
//! - Release file connections on every exit path, including errors.
//!
//! # Invariants
//! - File stores open a fresh connection per call; nothing is held between
//!   calls.
//! - In-memory stores keep their single connection alive for the store
//!   lifetime, since closing it would discard the data.

use super::{open_db, open_db_in_memory, DbError, DbResult};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Storage location for tracker data.
#[derive(Debug)]
pub enum Store {
    File(PathBuf),
    Memory(Connection),
}

impl Store {
    /// Creates a file-backed store. The file is created and migrated lazily on
    /// first use.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Creates an in-memory store with the schema applied.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::Memory(open_db_in_memory()?))
    }

    /// Returns the backing file path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path.as_path()),
            Self::Memory(_) => None,
        }
    }

    /// Runs `work` against a ready connection.
    ///
    /// For file stores the connection is dropped when `work` returns, whether
    /// it succeeded or not. Any open transaction inside `work` that was not
    /// committed is rolled back by that drop.
    pub fn with_connection<T, E>(
        &self,
        work: impl FnOnce(&Connection) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<DbError>,
    {
        match self {
            Self::File(path) => {
                let conn = open_db(path)?;
                work(&conn)
            }
            Self::Memory(conn) => work(conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use crate::db::DbError;

    #[test]
    fn file_store_creates_database_on_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.db");
        let store = Store::file(&path);
        assert!(!path.exists());

        let count: i64 = store
            .with_connection(|conn| {
                conn.query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))
                    .map_err(DbError::from)
            })
            .unwrap();

        assert_eq!(count, 0);
        assert!(path.exists());
        assert_eq!(store.path(), Some(path.as_path()));
    }

    #[test]
    fn memory_store_keeps_data_between_calls() {
        let store = Store::in_memory().unwrap();
        store
            .with_connection(|conn| {
                conn.execute("INSERT INTO projects (name, product) VALUES ('A', 'B');", [])
                    .map_err(DbError::from)
            })
            .unwrap();

        let count: i64 = store
            .with_connection(|conn| {
                conn.query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))
                    .map_err(DbError::from)
            })
            .unwrap();
        assert_eq!(count, 1);
        assert!(store.path().is_none());
    }
}
