//! Management release view rows.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use serde::{Deserialize, Serialize};

/// Shown in place of empty optional fields.
pub const PLACEHOLDER: &str = "—";

/// One leadership-facing row for a delivery month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRow {
    pub project_id: ProjectId,
    pub month: String,
    pub project: String,
    pub stakeholders: String,
    pub scrum_master: String,
    pub platforms: String,
    pub status: ProjectStatus,
    pub delivery_date: String,
    pub notes: String,
}

impl From<&Project> for ReleaseRow {
    fn from(project: &Project) -> Self {
        Self {
            project_id: project.id,
            month: or_placeholder(project.delivery_month.as_deref()),
            project: project.name.clone(),
            stakeholders: or_placeholder(project.business_owner.as_deref()),
            scrum_master: or_placeholder(project.scrum_master.as_deref()),
            platforms: or_placeholder(project.platforms.as_deref()),
            status: project.status,
            delivery_date: project
                .planned_go_live
                .map_or_else(|| PLACEHOLDER.to_string(), |date| date.to_string()),
            notes: or_placeholder(project.notes.as_deref()),
        }
    }
}

pub fn release_rows(projects: &[Project]) -> Vec<ReleaseRow> {
    projects.iter().map(ReleaseRow::from).collect()
}

fn or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}
