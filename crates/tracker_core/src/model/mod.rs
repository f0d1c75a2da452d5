//! Domain model for delivery tracking.
//!
//! # Responsibility
//! - Define projects, milestones and resource allocations as stored.
//! - Define creation inputs and their boundary validation.
//!
//! # Invariants
//! - Every record is identified by a store-assigned integer id.
//! - Milestones and resources always belong to exactly one project.
//! - After creation only `Project::status` and `Project::notes` change.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod milestone;
pub mod project;
pub mod resource;

/// Store-assigned row identifier shared by all tracker entities.
pub type RecordId = i64;

/// Boundary validation failure raised before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    MissingField(&'static str),
    /// Allocation is outside `0..=100`.
    AllocationOutOfRange(u8),
    /// Allocation is not a multiple of the UI step.
    AllocationNotStepAligned(u8),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::AllocationOutOfRange(value) => {
                write!(f, "allocation {value}% is outside 0..=100")
            }
            Self::AllocationNotStepAligned(value) => write!(
                f,
                "allocation {value}% must be a multiple of {}",
                resource::ALLOCATION_STEP
            ),
        }
    }
}

impl Error for ValidationError {}

/// Rejects empty or whitespace-only required text.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Maps blank optional text to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
