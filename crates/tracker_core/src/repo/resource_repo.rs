//! Resource allocation repository contracts and SQLite implementation.
//!
//! # Invariants
//! - An allocation can only be created under an existing project.
//! - Lists always carry the owning project's name via a join.
//! - `end_rule` is filled by the column default on insert.

use super::{ensure_connection_ready, project_exists, EntityKind, RepoError, RepoResult};
use crate::model::resource::{
    NewResource, Phase, ResourceId, ResourceRecord, Role, DEFAULT_END_RULE,
};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

/// Repository interface for resource allocation operations.
pub trait ResourceRepository {
    fn create_resource(&self, resource: &NewResource) -> RepoResult<ResourceId>;
    /// Returns every allocation joined with its project name, newest first.
    fn list_all(&self) -> RepoResult<Vec<ResourceRecord>>;
    fn delete_resource(&self, id: ResourceId) -> RepoResult<()>;
}

/// SQLite-backed resource repository.
pub struct SqliteResourceRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteResourceRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ResourceRepository for SqliteResourceRepository<'_> {
    fn create_resource(&self, resource: &NewResource) -> RepoResult<ResourceId> {
        resource.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !project_exists(&tx, resource.project_id)? {
            return Err(RepoError::not_found(
                EntityKind::Project,
                resource.project_id,
            ));
        }

        tx.execute(
            "INSERT INTO resources (
                employee_name,
                role,
                project_id,
                phase,
                allocation_pct
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                resource.employee_name.trim(),
                resource.role.as_str(),
                resource.project_id,
                resource.phase.as_str(),
                resource.allocation_pct.get(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    fn list_all(&self) -> RepoResult<Vec<ResourceRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                r.id,
                r.employee_name,
                r.role,
                r.project_id,
                p.name AS project_name,
                r.phase,
                r.allocation_pct,
                r.end_rule,
                r.created_at
             FROM resources r
             JOIN projects p ON r.project_id = p.id
             ORDER BY r.created_at DESC, r.id DESC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut resources = Vec::new();

        while let Some(row) = rows.next()? {
            resources.push(parse_resource_row(row)?);
        }

        Ok(resources)
    }

    fn delete_resource(&self, id: ResourceId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM resources WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Resource, id));
        }

        Ok(())
    }
}

fn parse_resource_row(row: &Row<'_>) -> RepoResult<ResourceRecord> {
    let role_text: String = row.get("role")?;
    let role = Role::parse(&role_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid role `{role_text}` in resources.role"))
    })?;

    let phase_text: String = row.get("phase")?;
    let phase = Phase::parse(&phase_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid phase `{phase_text}` in resources.phase"))
    })?;

    let allocation_pct = match row.get::<_, Option<i64>>("allocation_pct")? {
        Some(value) => Some(
            u8::try_from(value)
                .ok()
                .filter(|pct| *pct <= 100)
                .ok_or_else(|| {
                    RepoError::InvalidData(format!(
                        "invalid allocation `{value}` in resources.allocation_pct"
                    ))
                })?,
        ),
        None => None,
    };

    Ok(ResourceRecord {
        id: row.get("id")?,
        employee_name: row.get("employee_name")?,
        role,
        project_id: row.get("project_id")?,
        project_name: row.get("project_name")?,
        phase,
        allocation_pct,
        end_rule: row
            .get::<_, Option<String>>("end_rule")?
            .unwrap_or_else(|| DEFAULT_END_RULE.to_string()),
        created_at: row.get("created_at")?,
    })
}
