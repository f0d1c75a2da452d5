//! Resource allocation domain model.
//!
//! # Invariants
//! - A resource belongs to exactly one project and is removed with it.
//! - `AllocationPct` only holds values in `0..=100` that are multiples of
//!   `ALLOCATION_STEP`.

use super::project::ProjectId;
use super::{require_text, RecordId, ValidationError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type ResourceId = RecordId;

/// Granularity of allocation percentages accepted at the boundary.
pub const ALLOCATION_STEP: u8 = 5;
/// End rule applied to every new allocation.
pub const DEFAULT_END_RULE: &str = "Till Go-Live";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "FE")]
    Frontend,
    #[serde(rename = "BE")]
    Backend,
    #[serde(rename = "iOS")]
    Ios,
    #[serde(rename = "Android")]
    Android,
    #[serde(rename = "QA")]
    Qa,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Self::Frontend,
        Self::Backend,
        Self::Ios,
        Self::Android,
        Self::Qa,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "FE",
            Self::Backend => "BE",
            Self::Ios => "iOS",
            Self::Android => "Android",
            Self::Qa => "QA",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Delivery phase an allocation covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    Dev,
    Qa,
}

impl Phase {
    pub const ALL: [Phase; 2] = [Self::Dev, Self::Qa];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "DEV",
            Self::Qa => "QA",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|phase| phase.as_str() == value)
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Validated allocation percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AllocationPct(u8);

impl AllocationPct {
    pub const FULL: AllocationPct = AllocationPct(100);

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if value > 100 {
            return Err(ValidationError::AllocationOutOfRange(value));
        }
        if value % ALLOCATION_STEP != 0 {
            return Err(ValidationError::AllocationNotStepAligned(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for AllocationPct {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<u8> for AllocationPct {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AllocationPct> for u8 {
    fn from(value: AllocationPct) -> Self {
        value.0
    }
}

impl Display for AllocationPct {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Persisted allocation joined with the owning project's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: ResourceId,
    pub employee_name: String,
    pub role: Role,
    pub project_id: ProjectId,
    pub project_name: String,
    pub phase: Phase,
    /// `None` for legacy rows stored without a percentage.
    pub allocation_pct: Option<u8>,
    pub end_rule: String,
    pub created_at: NaiveDateTime,
}

/// Form input for a new allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResource {
    pub employee_name: String,
    pub role: Role,
    pub project_id: ProjectId,
    pub phase: Phase,
    pub allocation_pct: AllocationPct,
}

impl NewResource {
    pub fn new(
        employee_name: impl Into<String>,
        role: Role,
        project_id: ProjectId,
        phase: Phase,
        allocation_pct: AllocationPct,
    ) -> Self {
        Self {
            employee_name: employee_name.into(),
            role,
            project_id,
            phase,
            allocation_pct,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("employee name", &self.employee_name)
    }
}
