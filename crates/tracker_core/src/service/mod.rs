//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod confirmation;
pub mod milestone_service;
pub mod project_service;
pub mod resource_service;
pub mod tracker;
