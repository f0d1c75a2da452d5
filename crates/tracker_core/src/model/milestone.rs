//! Milestone domain model.
//!
//! # Invariants
//! - A milestone belongs to exactly one project and is removed with it.
//! - `revised_date` later than `planned_date` marks a slipping milestone.

use super::project::ProjectId;
use super::{non_blank, RecordId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type MilestoneId = RecordId;

/// Delivery checkpoint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneType {
    DevStart,
    DevComplete,
    HandoverToQa,
    QaEnd,
    StakeholderDemo,
    GoLive,
}

impl MilestoneType {
    pub const ALL: [MilestoneType; 6] = [
        Self::DevStart,
        Self::DevComplete,
        Self::HandoverToQa,
        Self::QaEnd,
        Self::StakeholderDemo,
        Self::GoLive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DevStart => "DEV_START",
            Self::DevComplete => "DEV_COMPLETE",
            Self::HandoverToQa => "HANDOVER_TO_QA",
            Self::QaEnd => "QA_END",
            Self::StakeholderDemo => "STAKEHOLDER_DEMO",
            Self::GoLive => "GO_LIVE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl Display for MilestoneType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Persisted milestone row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub project_id: ProjectId,
    pub milestone_type: MilestoneType,
    /// `None` only for rows written before the date was mandatory.
    pub planned_date: Option<NaiveDate>,
    pub revised_date: Option<NaiveDate>,
    pub delay_reason: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Milestone {
    /// A milestone without a planned date is never slipping.
    pub fn is_slipping(&self) -> bool {
        self.planned_date
            .is_some_and(|planned| is_slipping(planned, self.revised_date))
    }
}

/// Form input for a new milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMilestone {
    pub project_id: ProjectId,
    pub milestone_type: MilestoneType,
    pub planned_date: NaiveDate,
    pub revised_date: Option<NaiveDate>,
    pub delay_reason: Option<String>,
}

impl NewMilestone {
    pub fn new(project_id: ProjectId, milestone_type: MilestoneType, planned_date: NaiveDate) -> Self {
        Self {
            project_id,
            milestone_type,
            planned_date,
            revised_date: None,
            delay_reason: None,
        }
    }

    pub fn with_revision(mut self, revised_date: NaiveDate, delay_reason: Option<String>) -> Self {
        self.revised_date = Some(revised_date);
        self.delay_reason = non_blank(delay_reason);
        self
    }

    pub fn is_slipping(&self) -> bool {
        is_slipping(self.planned_date, self.revised_date)
    }
}

fn is_slipping(planned: NaiveDate, revised: Option<NaiveDate>) -> bool {
    revised.is_some_and(|revised| revised > planned)
}

#[cfg(test)]
mod tests {
    use super::{MilestoneType, NewMilestone};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn type_labels_parse_back() {
        for kind in MilestoneType::ALL {
            assert_eq!(MilestoneType::parse(kind.as_str()), Some(kind));
        }
        let json = serde_json::to_string(&MilestoneType::StakeholderDemo).unwrap();
        assert_eq!(json, "\"STAKEHOLDER_DEMO\"");
    }

    #[test]
    fn slipping_requires_strictly_later_revision() {
        let planned = date(2026, 1, 10);
        let base = NewMilestone::new(1, MilestoneType::DevStart, planned);
        assert!(!base.is_slipping());
        assert!(!base.clone().with_revision(planned, None).is_slipping());
        assert!(!base.clone().with_revision(date(2026, 1, 5), None).is_slipping());
        assert!(base.with_revision(date(2026, 1, 20), None).is_slipping());
    }

    #[test]
    fn blank_delay_reason_is_dropped() {
        let milestone = NewMilestone::new(1, MilestoneType::QaEnd, date(2026, 3, 1))
            .with_revision(date(2026, 3, 8), Some(" ".to_string()));
        assert_eq!(milestone.delay_reason, None);
    }
}
