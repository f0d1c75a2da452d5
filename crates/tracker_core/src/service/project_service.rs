//! Project use-case service.
//!
//! # Responsibility
//! - Provide intake, status, notes and delete entry points for callers.
//! - Emit metadata-only log events for mutations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Status changes are unrestricted: any status may follow any other.

use crate::model::project::{NewProject, Project, ProjectId, ProjectStatus};
use crate::repo::project_repo::{ProjectListQuery, ProjectName, ProjectRepository};
use crate::repo::RepoResult;
use log::{info, warn};

/// Use-case service wrapper for project operations.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Saves an intake form submission and returns the new project id.
    pub fn create_project(&self, project: &NewProject) -> RepoResult<ProjectId> {
        match self.repo.create_project(project) {
            Ok(id) => {
                info!(
                    "event=project_create module=service status=ok project_id={id} project_status={}",
                    project.status
                );
                Ok(id)
            }
            Err(err) => {
                warn!("event=project_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    pub fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        self.repo.get_project(id)
    }

    pub fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>> {
        self.repo.list_projects(query)
    }

    pub fn list_project_names(&self) -> RepoResult<Vec<ProjectName>> {
        self.repo.list_project_names()
    }

    pub fn update_status(&self, id: ProjectId, status: ProjectStatus) -> RepoResult<()> {
        self.repo.update_status(id, status)?;
        info!(
            "event=project_status module=service status=ok project_id={id} project_status={status}"
        );
        Ok(())
    }

    /// Replaces project notes. Blank notes clear the field.
    pub fn update_notes(&self, id: ProjectId, notes: Option<&str>) -> RepoResult<()> {
        self.repo.update_notes(id, notes)?;
        info!("event=project_notes module=service status=ok project_id={id}");
        Ok(())
    }

    /// Deletes a project together with its milestones and resources.
    pub fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        self.repo.delete_project(id)?;
        info!("event=project_delete module=service status=ok project_id={id}");
        Ok(())
    }
}
