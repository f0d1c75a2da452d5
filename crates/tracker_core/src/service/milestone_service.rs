//! Milestone use-case service.
//!
//! # Responsibility
//! - Add and remove milestones.
//! - Offer the "mark project as Delayed" suggestion for slipping milestones.
//!
//! # Invariants
//! - A suggestion is offered only when the revised date is later than the
//!   planned date and the owning project is not already `Delayed`.
//! - Adding a milestone never changes project status by itself; the caller
//!   must accept the suggestion explicitly.

use crate::model::milestone::{Milestone, MilestoneId, NewMilestone};
use crate::model::project::{ProjectId, ProjectStatus};
use crate::repo::milestone_repo::MilestoneRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::RepoResult;
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

/// Offer to move a project to `Delayed` after a slipping milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelaySuggestion {
    pub project_id: ProjectId,
    pub milestone_id: MilestoneId,
    pub planned_date: NaiveDate,
    pub revised_date: NaiveDate,
}

/// Result of adding a milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneAdded {
    pub id: MilestoneId,
    pub delay_suggestion: Option<DelaySuggestion>,
}

/// Returns whether a milestone should prompt the Delayed suggestion for a
/// project currently in `current_status`.
pub fn should_suggest_delay(milestone: &NewMilestone, current_status: ProjectStatus) -> bool {
    milestone.is_slipping() && current_status != ProjectStatus::Delayed
}

/// Milestone service over milestone and project repositories.
pub struct MilestoneService<M: MilestoneRepository, P: ProjectRepository> {
    milestones: M,
    projects: P,
}

impl<M: MilestoneRepository, P: ProjectRepository> MilestoneService<M, P> {
    pub fn new(milestones: M, projects: P) -> Self {
        Self {
            milestones,
            projects,
        }
    }

    /// Adds a milestone and evaluates the Delayed suggestion.
    pub fn add_milestone(&self, milestone: &NewMilestone) -> RepoResult<MilestoneAdded> {
        let id = self.milestones.create_milestone(milestone)?;
        info!(
            "event=milestone_create module=service status=ok milestone_id={id} project_id={} milestone_type={}",
            milestone.project_id, milestone.milestone_type
        );

        let mut delay_suggestion = None;
        if let Some(revised_date) = milestone.revised_date {
            let project = self.projects.get_project(milestone.project_id)?;
            if project.is_some_and(|project| should_suggest_delay(milestone, project.status)) {
                delay_suggestion = Some(DelaySuggestion {
                    project_id: milestone.project_id,
                    milestone_id: id,
                    planned_date: milestone.planned_date,
                    revised_date,
                });
            }
        }

        Ok(MilestoneAdded {
            id,
            delay_suggestion,
        })
    }

    /// Applies an accepted suggestion by setting the project to `Delayed`.
    pub fn accept_delay_suggestion(&self, suggestion: &DelaySuggestion) -> RepoResult<()> {
        self.projects
            .update_status(suggestion.project_id, ProjectStatus::Delayed)?;
        info!(
            "event=delay_suggestion_accept module=service status=ok project_id={} milestone_id={}",
            suggestion.project_id, suggestion.milestone_id
        );
        Ok(())
    }

    pub fn list_for_project(&self, project_id: ProjectId) -> RepoResult<Vec<Milestone>> {
        self.milestones.list_for_project(project_id)
    }

    pub fn delete_milestone(&self, id: MilestoneId) -> RepoResult<()> {
        self.milestones.delete_milestone(id)?;
        info!("event=milestone_delete module=service status=ok milestone_id={id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::should_suggest_delay;
    use crate::model::milestone::{MilestoneType, NewMilestone};
    use crate::model::project::ProjectStatus;
    use chrono::NaiveDate;

    #[test]
    fn suggestion_depends_on_slip_and_current_status() {
        let planned = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let revised = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();
        let slipping =
            NewMilestone::new(1, MilestoneType::DevStart, planned).with_revision(revised, None);
        let on_plan = NewMilestone::new(1, MilestoneType::DevStart, planned);

        assert!(should_suggest_delay(&slipping, ProjectStatus::NewRequest));
        assert!(should_suggest_delay(&slipping, ProjectStatus::GoLive));
        assert!(!should_suggest_delay(&slipping, ProjectStatus::Delayed));
        assert!(!should_suggest_delay(&on_plan, ProjectStatus::NewRequest));
    }
}
