//! Dashboard metrics over the current project list.
//!
//! # Invariants
//! - A project counts as delayed iff its status is `Delayed`; every other
//!   project counts as on time.
//! - Active statuses are In Development, Dev Completed, Handover to QA and
//!   QA End.
//! - Statuses outside the three phase buckets are not bucketed.

use crate::model::project::{Project, ProjectStatus};
use crate::model::resource::ResourceRecord;
use serde::{Deserialize, Serialize};

/// Number of projects listed under "recent" on the dashboard.
pub const RECENT_PROJECT_LIMIT: usize = 10;

/// Coarse delivery phase shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseBucket {
    #[serde(rename = "In Development")]
    InDevelopment,
    #[serde(rename = "In QA")]
    InQa,
    #[serde(rename = "Live")]
    Live,
}

impl PhaseBucket {
    pub fn label(self) -> &'static str {
        match self {
            Self::InDevelopment => "In Development",
            Self::InQa => "In QA",
            Self::Live => "Live",
        }
    }
}

/// Maps a status to its dashboard phase, if it has one.
pub fn phase_bucket(status: ProjectStatus) -> Option<PhaseBucket> {
    match status {
        ProjectStatus::InDevelopment | ProjectStatus::DevCompleted => {
            Some(PhaseBucket::InDevelopment)
        }
        ProjectStatus::HandoverToQa | ProjectStatus::QaEnd => Some(PhaseBucket::InQa),
        ProjectStatus::GoLive => Some(PhaseBucket::Live),
        _ => None,
    }
}

pub fn is_active(status: ProjectStatus) -> bool {
    matches!(
        status,
        ProjectStatus::InDevelopment
            | ProjectStatus::DevCompleted
            | ProjectStatus::HandoverToQa
            | ProjectStatus::QaEnd
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: ProjectStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseBreakdown {
    pub in_development: usize,
    pub in_qa: usize,
    pub live: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_projects: usize,
    pub total_resources: usize,
    /// Non-zero counts, largest first; ties keep intake-form status order.
    pub status_counts: Vec<StatusCount>,
    pub on_time: usize,
    pub delayed: usize,
    pub active: usize,
    pub phases: PhaseBreakdown,
    /// Leading projects of the input list, which is newest first.
    pub recent: Vec<Project>,
}

/// Counts projects per status.
pub fn count_by_status(projects: &[Project]) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = ProjectStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: projects.iter().filter(|p| p.status == status).count(),
        })
        .filter(|entry| entry.count > 0)
        .collect();
    // Stable sort keeps form order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

pub fn phase_breakdown(projects: &[Project]) -> PhaseBreakdown {
    let mut breakdown = PhaseBreakdown::default();
    for project in projects {
        match phase_bucket(project.status) {
            Some(PhaseBucket::InDevelopment) => breakdown.in_development += 1,
            Some(PhaseBucket::InQa) => breakdown.in_qa += 1,
            Some(PhaseBucket::Live) => breakdown.live += 1,
            None => {}
        }
    }
    breakdown
}

/// Builds dashboard metrics from already-filtered projects and all resources.
pub fn dashboard_metrics(projects: &[Project], resources: &[ResourceRecord]) -> DashboardMetrics {
    let delayed = projects.iter().filter(|p| p.is_delayed()).count();

    DashboardMetrics {
        total_projects: projects.len(),
        total_resources: resources.len(),
        status_counts: count_by_status(projects),
        on_time: projects.len() - delayed,
        delayed,
        active: projects.iter().filter(|p| is_active(p.status)).count(),
        phases: phase_breakdown(projects),
        recent: projects.iter().take(RECENT_PROJECT_LIMIT).cloned().collect(),
    }
}
