//! Milestone repository contracts and SQLite implementation.
//!
//! # Invariants
//! - A milestone can only be created under an existing project.
//! - Per-project lists are ordered by `planned_date ASC, id ASC`; legacy
//!   rows without a planned date sort first and still load.

use super::{ensure_connection_ready, project_exists, EntityKind, RepoError, RepoResult};
use crate::model::milestone::{Milestone, MilestoneId, MilestoneType, NewMilestone};
use crate::model::project::ProjectId;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

/// Repository interface for milestone operations.
pub trait MilestoneRepository {
    fn create_milestone(&self, milestone: &NewMilestone) -> RepoResult<MilestoneId>;
    /// Returns an empty list for a project without milestones, including a
    /// project that no longer exists.
    fn list_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Milestone>>;
    fn delete_milestone(&self, id: MilestoneId) -> RepoResult<()>;
}

/// SQLite-backed milestone repository.
pub struct SqliteMilestoneRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMilestoneRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MilestoneRepository for SqliteMilestoneRepository<'_> {
    fn create_milestone(&self, milestone: &NewMilestone) -> RepoResult<MilestoneId> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !project_exists(&tx, milestone.project_id)? {
            return Err(RepoError::not_found(
                EntityKind::Project,
                milestone.project_id,
            ));
        }

        tx.execute(
            "INSERT INTO milestones (
                project_id,
                milestone_type,
                planned_date,
                revised_date,
                delay_reason
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                milestone.project_id,
                milestone.milestone_type.as_str(),
                milestone.planned_date,
                milestone.revised_date,
                milestone
                    .delay_reason
                    .as_deref()
                    .filter(|reason| !reason.trim().is_empty()),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(id)
    }

    fn list_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Milestone>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                project_id,
                milestone_type,
                planned_date,
                revised_date,
                delay_reason,
                created_at
             FROM milestones
             WHERE project_id = ?1
             ORDER BY planned_date ASC, id ASC;",
        )?;
        let mut rows = stmt.query([project_id])?;
        let mut milestones = Vec::new();

        while let Some(row) = rows.next()? {
            milestones.push(parse_milestone_row(row)?);
        }

        Ok(milestones)
    }

    fn delete_milestone(&self, id: MilestoneId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM milestones WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Milestone, id));
        }

        Ok(())
    }
}

fn parse_milestone_row(row: &Row<'_>) -> RepoResult<Milestone> {
    let type_text: String = row.get("milestone_type")?;
    let milestone_type = MilestoneType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid milestone type `{type_text}` in milestones.milestone_type"
        ))
    })?;

    Ok(Milestone {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        milestone_type,
        planned_date: row.get("planned_date")?,
        revised_date: row.get("revised_date")?,
        delay_reason: row.get("delay_reason")?,
        created_at: row.get("created_at")?,
    })
}
