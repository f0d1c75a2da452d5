//! Project domain model.
//!
//! # Responsibility
//! - Define the tracked delivery initiative and its status lifecycle values.
//! - Validate intake form input before persistence.
//!
//! # Invariants
//! - `name` and `product` are non-empty at creation.
//! - `delivery_month` is a free-text label and is never derived from, or
//!   checked against, `planned_go_live`.
//! - Any status may be set to any other status; there is no state machine.

use super::{non_blank, require_text, RecordId, ValidationError};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type ProjectId = RecordId;

/// Delivery status of a project.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "New Request")]
    NewRequest,
    #[serde(rename = "Brainstorming")]
    Brainstorming,
    #[serde(rename = "Scope Ready")]
    ScopeReady,
    #[serde(rename = "In Development")]
    InDevelopment,
    #[serde(rename = "Dev Completed")]
    DevCompleted,
    #[serde(rename = "Handover to QA")]
    HandoverToQa,
    #[serde(rename = "QA End")]
    QaEnd,
    #[serde(rename = "Stakeholder Demo")]
    StakeholderDemo,
    #[serde(rename = "Go-Live")]
    GoLive,
    #[serde(rename = "Delayed")]
    Delayed,
}

impl ProjectStatus {
    /// All statuses in intake-form order.
    pub const ALL: [ProjectStatus; 10] = [
        Self::NewRequest,
        Self::Brainstorming,
        Self::ScopeReady,
        Self::InDevelopment,
        Self::DevCompleted,
        Self::HandoverToQa,
        Self::QaEnd,
        Self::StakeholderDemo,
        Self::GoLive,
        Self::Delayed,
    ];

    /// Stored and displayed label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewRequest => "New Request",
            Self::Brainstorming => "Brainstorming",
            Self::ScopeReady => "Scope Ready",
            Self::InDevelopment => "In Development",
            Self::DevCompleted => "Dev Completed",
            Self::HandoverToQa => "Handover to QA",
            Self::QaEnd => "QA End",
            Self::StakeholderDemo => "Stakeholder Demo",
            Self::GoLive => "Go-Live",
            Self::Delayed => "Delayed",
        }
    }

    /// Parses a stored label. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Persisted project row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub product: String,
    /// Stakeholders, free text.
    pub business_owner: Option<String>,
    pub scrum_master: Option<String>,
    /// Free-text platform list, e.g. `iOS, Android, Web`.
    pub platforms: Option<String>,
    /// Optional only because rows written by older builds may lack it.
    pub planned_go_live: Option<NaiveDate>,
    pub status: ProjectStatus,
    /// Scheduling label such as `Mar 2026`.
    pub delivery_month: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Project {
    pub fn is_delayed(&self) -> bool {
        self.status == ProjectStatus::Delayed
    }
}

/// Intake form input for a new project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub product: String,
    pub business_owner: Option<String>,
    pub scrum_master: Option<String>,
    pub platforms: Option<String>,
    pub planned_go_live: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub delivery_month: Option<String>,
    pub notes: Option<String>,
}

impl NewProject {
    /// Creates an input with the two required fields and defaults elsewhere.
    pub fn new(name: impl Into<String>, product: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            product: product.into(),
            ..Self::default()
        }
    }

    /// Validates required fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("project name", &self.name)?;
        require_text("product", &self.product)?;
        Ok(())
    }

    /// Trims required text and drops blank optional fields.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            product: self.product.trim().to_string(),
            business_owner: non_blank(self.business_owner),
            scrum_master: non_blank(self.scrum_master),
            platforms: non_blank(self.platforms),
            planned_go_live: self.planned_go_live,
            status: self.status,
            delivery_month: non_blank(self.delivery_month),
            notes: non_blank(self.notes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewProject, ProjectStatus};
    use crate::model::ValidationError;

    #[test]
    fn status_labels_parse_back() {
        for status in ProjectStatus::ALL {
            assert_eq!(ProjectStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ProjectStatus::parse("go-live"), None);
    }

    #[test]
    fn status_serializes_as_label() {
        let json = serde_json::to_string(&ProjectStatus::HandoverToQa).unwrap();
        assert_eq!(json, "\"Handover to QA\"");
    }

    #[test]
    fn default_status_is_new_request() {
        assert_eq!(NewProject::new("a", "b").status, ProjectStatus::NewRequest);
    }

    #[test]
    fn validate_rejects_blank_required_fields() {
        assert_eq!(
            NewProject::new("  ", "ProductX").validate(),
            Err(ValidationError::MissingField("project name"))
        );
        assert_eq!(
            NewProject::new("Alpha", "").validate(),
            Err(ValidationError::MissingField("product"))
        );
        assert!(NewProject::new("Alpha", "ProductX").validate().is_ok());
    }

    #[test]
    fn normalized_drops_blank_optionals() {
        let input = NewProject {
            notes: Some("   ".to_string()),
            scrum_master: Some("Sam".to_string()),
            ..NewProject::new(" Alpha ", "ProductX")
        };
        let normalized = input.normalized();
        assert_eq!(normalized.name, "Alpha");
        assert_eq!(normalized.notes, None);
        assert_eq!(normalized.scrum_master.as_deref(), Some("Sam"));
    }
}
