//! fmr-pipeline - Lifecycle state machine for farm-to-market road proposals
//!
//! This library provides the core functionality for the fmr CLI, including:
//! - Schema definitions for projects, stage records and action payloads
//! - Rule tables for eligibility, scoring and engineering review
//! - Domain logic for statuses, validation and pure transitions
//! - Repository and object-store seams with in-memory and file-backed stores
//! - The pipeline service that runs one action end to end

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod rules;
pub mod schemas;
pub mod store;
pub mod workflow;

// Re-export commonly used types
pub use errors::{FmrError, Result};
pub use schemas::{Attachment, Config, Project, ProjectStatus, Stage};
pub use workflow::{PendingFile, Pipeline};
