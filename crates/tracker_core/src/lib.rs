//! Core domain logic for the project tracker.
//! This crate is the single source of truth for delivery-tracking invariants;
//! presentation layers consume it through [`Tracker`].

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod views;

pub use config::{ConfigError, ConfigOverrides, TrackerConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::milestone::{Milestone, MilestoneId, MilestoneType, NewMilestone};
pub use model::project::{NewProject, Project, ProjectId, ProjectStatus};
pub use model::resource::{AllocationPct, NewResource, Phase, ResourceId, ResourceRecord, Role};
pub use model::{RecordId, ValidationError};
pub use repo::milestone_repo::{MilestoneRepository, SqliteMilestoneRepository};
pub use repo::project_repo::{
    ProjectListQuery, ProjectName, ProjectRepository, SqliteProjectRepository,
};
pub use repo::resource_repo::{ResourceRepository, SqliteResourceRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::confirmation::{ConfirmationToken, DeleteTarget, TokenParseError};
pub use service::milestone_service::{DelaySuggestion, MilestoneAdded, MilestoneService};
pub use service::project_service::ProjectService;
pub use service::resource_service::ResourceService;
pub use service::tracker::Tracker;
pub use views::dashboard::{DashboardMetrics, PhaseBucket};
pub use views::release::ReleaseRow;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
