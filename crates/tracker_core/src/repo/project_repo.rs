//! Project repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/filter/update/delete APIs over `projects`.
//! - Keep filter composition and SQL binding inside the persistence boundary.
//!
//! # Invariants
//! - `create_project` validates before the insert; a rejected input leaves
//!   the table untouched.
//! - List filters compose with AND; an empty filter does not constrain.
//! - Lists are ordered newest first (`created_at DESC, id DESC`).
//! - `delete_project` is a single `DELETE`; milestones and resources go with
//!   it through `ON DELETE CASCADE`.

use super::{ensure_connection_ready, EntityKind, RepoError, RepoResult};
use crate::model::project::{NewProject, Project, ProjectId, ProjectStatus};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    product,
    business_owner,
    scrum_master,
    platforms,
    planned_go_live,
    status,
    delivery_month,
    notes,
    created_at
FROM projects";

/// Filters for project lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectListQuery {
    /// Exact delivery month label, e.g. `Mar 2026`.
    pub delivery_month: Option<String>,
    /// Case-insensitive substring of `product`.
    pub product_contains: Option<String>,
    /// Status set membership; empty means any status.
    pub statuses: Vec<ProjectStatus>,
}

impl ProjectListQuery {
    pub fn for_month(delivery_month: impl Into<String>) -> Self {
        Self {
            delivery_month: Some(delivery_month.into()),
            ..Self::default()
        }
    }
}

/// Id/name pair for project selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectName {
    pub id: ProjectId,
    pub name: String,
}

/// Repository interface for project operations.
pub trait ProjectRepository {
    fn create_project(&self, project: &NewProject) -> RepoResult<ProjectId>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>>;
    /// Returns all projects ordered by name.
    fn list_project_names(&self) -> RepoResult<Vec<ProjectName>>;
    fn update_status(&self, id: ProjectId, status: ProjectStatus) -> RepoResult<()>;
    fn update_notes(&self, id: ProjectId, notes: Option<&str>) -> RepoResult<()>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &NewProject) -> RepoResult<ProjectId> {
        project.validate()?;
        let project = project.clone().normalized();

        self.conn.execute(
            "INSERT INTO projects (
                name,
                product,
                business_owner,
                scrum_master,
                platforms,
                planned_go_live,
                status,
                delivery_month,
                notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                project.name,
                project.product,
                project.business_owner,
                project.scrum_master,
                project.platforms,
                project.planned_go_live,
                project.status.as_str(),
                project.delivery_month,
                project.notes,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>> {
        let mut sql = format!("{PROJECT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(month) = query.delivery_month.as_deref().filter(|m| !m.is_empty()) {
            sql.push_str(" AND delivery_month = ?");
            bind_values.push(Value::Text(month.to_string()));
        }

        if let Some(product) = query.product_contains.as_deref().filter(|p| !p.is_empty()) {
            sql.push_str(" AND product LIKE ? ESCAPE '\\'");
            bind_values.push(Value::Text(format!("%{}%", escape_like(product))));
        }

        if !query.statuses.is_empty() {
            let placeholders = vec!["?"; query.statuses.len()].join(", ");
            sql.push_str(&format!(" AND status IN ({placeholders})"));
            bind_values.extend(
                query
                    .statuses
                    .iter()
                    .map(|status| Value::Text(status.as_str().to_string())),
            );
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn list_project_names(&self) -> RepoResult<Vec<ProjectName>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM projects ORDER BY name ASC, id ASC;")?;
        let names = stmt
            .query_map([], |row| {
                Ok(ProjectName {
                    id: row.get("id")?,
                    name: row.get("name")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn update_status(&self, id: ProjectId, status: ProjectStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE projects SET status = ?1 WHERE id = ?2;",
            params![status.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Project, id));
        }

        Ok(())
    }

    fn update_notes(&self, id: ProjectId, notes: Option<&str>) -> RepoResult<()> {
        let notes = notes.filter(|text| !text.trim().is_empty());
        let changed = self.conn.execute(
            "UPDATE projects SET notes = ?1 WHERE id = ?2;",
            params![notes, id],
        )?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Project, id));
        }

        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Project, id));
        }

        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    // Rows from older builds may carry a NULL status.
    let status = match row.get::<_, Option<String>>("status")? {
        Some(value) => ProjectStatus::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid status `{value}` in projects.status"))
        })?,
        None => ProjectStatus::default(),
    };

    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        product: row.get::<_, Option<String>>("product")?.unwrap_or_default(),
        business_owner: row.get("business_owner")?,
        scrum_master: row.get("scrum_master")?,
        platforms: row.get("platforms")?,
        planned_go_live: row.get("planned_go_live")?,
        status,
        delivery_month: row.get("delivery_month")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
