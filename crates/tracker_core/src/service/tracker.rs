//! Store-backed facade used by presentation layers.
//!
//! # Responsibility
//! - Run every use case inside one scoped connection acquisition.
//! - Wire SQLite repositories into the use-case services.
//! - Assemble release and dashboard views from fresh reads.
//!
//! # Invariants
//! - No connection, transaction or view outlives a single call.

use crate::db::{DbResult, Store};
use crate::model::milestone::{Milestone, NewMilestone};
use crate::model::project::{NewProject, Project, ProjectId, ProjectStatus};
use crate::model::resource::{NewResource, ResourceId, ResourceRecord};
use crate::repo::milestone_repo::SqliteMilestoneRepository;
use crate::repo::project_repo::{ProjectListQuery, ProjectName, SqliteProjectRepository};
use crate::repo::resource_repo::SqliteResourceRepository;
use crate::repo::{EntityKind, RepoResult};
use crate::service::confirmation::{ConfirmationToken, DeleteTarget};
use crate::service::milestone_service::{DelaySuggestion, MilestoneAdded, MilestoneService};
use crate::service::project_service::ProjectService;
use crate::service::resource_service::ResourceService;
use crate::views::dashboard::{dashboard_metrics, DashboardMetrics};
use crate::views::release::{release_rows, ReleaseRow};
use rusqlite::Connection;
use std::path::PathBuf;

/// Entry point for all tracker operations.
#[derive(Debug)]
pub struct Tracker {
    store: Store,
}

impl Tracker {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Opens a file-backed tracker, creating and migrating the database now
    /// so that an unreachable or corrupt store fails at startup.
    pub fn open(path: impl Into<PathBuf>) -> DbResult<Self> {
        let store = Store::file(path);
        store.with_connection(|_| DbResult::Ok(()))?;
        Ok(Self::new(store))
    }

    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::new(Store::in_memory()?))
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn create_project(&self, project: &NewProject) -> RepoResult<ProjectId> {
        self.with_projects(|service| service.create_project(project))
    }

    pub fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.with_projects(|service| service.get_project(id))
    }

    pub fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>> {
        self.with_projects(|service| service.list_projects(query))
    }

    pub fn list_project_names(&self) -> RepoResult<Vec<ProjectName>> {
        self.with_projects(|service| service.list_project_names())
    }

    pub fn update_project_status(&self, id: ProjectId, status: ProjectStatus) -> RepoResult<()> {
        self.with_projects(|service| service.update_status(id, status))
    }

    pub fn update_project_notes(&self, id: ProjectId, notes: Option<&str>) -> RepoResult<()> {
        self.with_projects(|service| service.update_notes(id, notes))
    }

    pub fn add_milestone(&self, milestone: &NewMilestone) -> RepoResult<MilestoneAdded> {
        self.with_milestones(|service| service.add_milestone(milestone))
    }

    pub fn accept_delay_suggestion(&self, suggestion: &DelaySuggestion) -> RepoResult<()> {
        self.with_milestones(|service| service.accept_delay_suggestion(suggestion))
    }

    pub fn list_milestones(&self, project_id: ProjectId) -> RepoResult<Vec<Milestone>> {
        self.with_milestones(|service| service.list_for_project(project_id))
    }

    pub fn add_resource(&self, resource: &NewResource) -> RepoResult<ResourceId> {
        self.with_resources(|service| service.add_resource(resource))
    }

    pub fn list_resources(&self) -> RepoResult<Vec<ResourceRecord>> {
        self.with_resources(|service| service.list_all())
    }

    /// Starts a delete prompt for `target`.
    pub fn request_delete(&self, target: DeleteTarget) -> ConfirmationToken {
        ConfirmationToken::issue(target)
    }

    /// Performs the delete named by `token`.
    ///
    /// Any parseable token is accepted, including one this tracker never
    /// issued; the token confirms the caller's intent and is not checked
    /// against earlier `request_delete` calls. Project deletes cascade to
    /// milestones and resources.
    pub fn confirm_delete(&self, token: ConfirmationToken) -> RepoResult<DeleteTarget> {
        let target = token.target();
        match target.entity {
            EntityKind::Project => self.with_projects(|service| service.delete_project(target.id)),
            EntityKind::Milestone => {
                self.with_milestones(|service| service.delete_milestone(target.id))
            }
            EntityKind::Resource => {
                self.with_resources(|service| service.delete_resource(target.id))
            }
        }?;
        Ok(target)
    }

    /// Release view rows for one delivery month, newest first.
    pub fn release_view(&self, delivery_month: &str) -> RepoResult<Vec<ReleaseRow>> {
        let projects = self.list_projects(&ProjectListQuery::for_month(delivery_month))?;
        Ok(release_rows(&projects))
    }

    /// Dashboard metrics, optionally restricted to one delivery month.
    ///
    /// The resource total always covers every allocation.
    pub fn dashboard(&self, delivery_month: Option<&str>) -> RepoResult<DashboardMetrics> {
        let query = delivery_month
            .map(ProjectListQuery::for_month)
            .unwrap_or_default();
        self.store.with_connection(|conn| {
            let projects = SqliteProjectRepository::try_new(conn)?;
            let resources = SqliteResourceRepository::try_new(conn)?;
            let projects = ProjectService::new(projects).list_projects(&query)?;
            let resources = ResourceService::new(resources).list_all()?;
            Ok(dashboard_metrics(&projects, &resources))
        })
    }

    fn with_projects<T>(
        &self,
        work: impl FnOnce(&ProjectService<SqliteProjectRepository<'_>>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        self.store.with_connection(|conn: &Connection| {
            let service = ProjectService::new(SqliteProjectRepository::try_new(conn)?);
            work(&service)
        })
    }

    fn with_milestones<T>(
        &self,
        work: impl FnOnce(
            &MilestoneService<SqliteMilestoneRepository<'_>, SqliteProjectRepository<'_>>,
        ) -> RepoResult<T>,
    ) -> RepoResult<T> {
        self.store.with_connection(|conn: &Connection| {
            let service = MilestoneService::new(
                SqliteMilestoneRepository::try_new(conn)?,
                SqliteProjectRepository::try_new(conn)?,
            );
            work(&service)
        })
    }

    fn with_resources<T>(
        &self,
        work: impl FnOnce(&ResourceService<SqliteResourceRepository<'_>>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        self.store.with_connection(|conn: &Connection| {
            let service = ResourceService::new(SqliteResourceRepository::try_new(conn)?);
            work(&service)
        })
    }
}
