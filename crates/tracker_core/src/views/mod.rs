//! Derived read models.
//!
//! # Responsibility
//! - Compute dashboard metrics, release rows and month labels from
//!   repository reads.
//!
//! # Invariants
//! - Every function here is pure; nothing is cached or persisted.

pub mod dashboard;
pub mod months;
pub mod release;
