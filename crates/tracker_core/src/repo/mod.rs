//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Write paths validate input before any SQL mutation.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Every operation is a single statement or one immediate transaction.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::{RecordId, ValidationError};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod milestone_repo;
pub mod project_repo;
pub mod resource_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity kinds addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Project,
    Milestone,
    Resource,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Milestone => "milestone",
            Self::Resource => "resource",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "project" => Some(Self::Project),
            "milestone" => Some(Self::Milestone),
            "resource" => Some(Self::Resource),
            _ => None,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository error shared by project, milestone and resource storage.
///
/// Maps onto the caller-facing taxonomy: `Validation` aborts before any
/// write, `NotFound` is a no-op on a missing id, and `Db`/`InvalidData` are
/// storage failures whose transaction has been rolled back.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    NotFound { entity: EntityKind, id: RecordId },
    Db(DbError),
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn not_found(entity: EntityKind, id: RecordId) -> Self {
        Self::NotFound { entity, id }
    }

    /// Message suitable for an end user. Storage details are withheld.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::NotFound { entity, id } => format!("{entity} {id} no longer exists"),
            Self::Db(_) | Self::InvalidData(_) => {
                "the tracker database could not complete the request".to_string()
            }
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Rejects connections that skipped `open_db`/`ensure_schema`.
fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::InvalidData(format!(
            "connection schema version {actual_version} does not match expected {expected_version}"
        )));
    }
    Ok(())
}

fn project_exists(conn: &Connection, id: RecordId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM projects WHERE id = ?1);",
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
