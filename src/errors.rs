//! Error types for the FMR pipeline
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

use crate::schemas::ProjectStatus;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, FmrError>;

/// Main error type for all pipeline operations
#[derive(Debug, Error)]
pub enum FmrError {
    /// One or more required inputs are absent
    #[error("Missing required fields: {}", missing_fields.join(", "))]
    Validation { missing_fields: Vec<String> },

    /// Action attempted from a status that does not permit it
    #[error("Cannot {action} a project in status {from}")]
    IllegalTransition { from: ProjectStatus, action: String },

    /// Standard checklist items answered "No"
    #[error("Checklist items not satisfied: {}", items.join(", "))]
    ChecklistFailed { items: Vec<String> },

    /// Red-flag checklist items answered "Yes"
    #[error("Red flags raised: {}", items.join(", "))]
    RedFlag { items: Vec<String> },

    /// A score outside the criterion's range or for an unknown criterion
    #[error("Invalid score for {criterion}: {points} (max {max})")]
    InvalidScore {
        criterion: String,
        points: u32,
        max: u32,
    },

    /// Bid amount above the validated ABC
    #[error("Bid amount {bid:.2} exceeds validated ABC {ceiling:.2}")]
    BidExceedsCeiling { bid: f64, ceiling: f64 },

    /// Object store failure
    #[error("Upload failed: {0}")]
    Upload(String),

    /// Document store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Project changed since it was loaded
    #[error("Stale write for {id}: expected version {expected}, found {found}")]
    StaleWrite { id: String, expected: u64, found: u64 },

    /// Project not found in the repository
    #[error("Project not found: {0}")]
    NotFound(String),

    /// Could not allocate a free project ID
    #[error("Could not allocate a unique project ID after {0} attempts")]
    IdExhausted(u32),

    /// Workspace not found - no .fmr directory
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl FmrError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            FmrError::Validation { .. } => "VALIDATION",
            FmrError::IllegalTransition { .. } => "ILLEGAL_TRANSITION",
            FmrError::ChecklistFailed { .. } => "CHECKLIST_FAILED",
            FmrError::RedFlag { .. } => "RED_FLAG",
            FmrError::InvalidScore { .. } => "INVALID_SCORE",
            FmrError::BidExceedsCeiling { .. } => "BID_EXCEEDS_CEILING",
            FmrError::Upload(_) => "UPLOAD_ERROR",
            FmrError::Storage(_) => "STORAGE_ERROR",
            FmrError::StaleWrite { .. } => "STALE_WRITE",
            FmrError::NotFound(_) => "NOT_FOUND",
            FmrError::IdExhausted(_) => "ID_EXHAUSTED",
            FmrError::WorkspaceNotFound(_) => "WORKSPACE_NOT_FOUND",
            FmrError::InvalidJson(_) => "INVALID_JSON",
            FmrError::FileNotFound(_) => "FILE_NOT_FOUND",
            FmrError::ConfigError(_) => "CONFIG_ERROR",
            FmrError::Io(_) => "IO_ERROR",
            FmrError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Build a validation error from a list of field names
    pub fn missing<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FmrError::Validation {
            missing_fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Build an illegal-transition error
    pub fn illegal(from: ProjectStatus, action: impl Into<String>) -> Self {
        FmrError::IllegalTransition {
            from,
            action: action.into(),
        }
    }

    /// Whether the caller can fix the request and try again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FmrError::Validation { .. }
                | FmrError::ChecklistFailed { .. }
                | FmrError::InvalidScore { .. }
                | FmrError::BidExceedsCeiling { .. }
                | FmrError::StaleWrite { .. }
        )
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        FmrError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &FmrError) -> i32 {
    match error {
        FmrError::Validation { .. }
        | FmrError::ChecklistFailed { .. }
        | FmrError::RedFlag { .. }
        | FmrError::InvalidScore { .. }
        | FmrError::BidExceedsCeiling { .. } => 2,
        FmrError::IllegalTransition { .. } => 3,
        FmrError::StaleWrite { .. } => 4,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(FmrError::missing(["name"]).code(), "VALIDATION");
        assert_eq!(
            FmrError::illegal(ProjectStatus::Cleared, "award").code(),
            "ILLEGAL_TRANSITION"
        );
        assert_eq!(FmrError::Upload("x".into()).code(), "UPLOAD_ERROR");
        assert_eq!(FmrError::Storage("x".into()).code(), "STORAGE_ERROR");
        assert_eq!(
            FmrError::StaleWrite {
                id: "FMR-2026-0001".into(),
                expected: 1,
                found: 2
            }
            .code(),
            "STALE_WRITE"
        );
        assert_eq!(FmrError::NotFound("x".into()).code(), "NOT_FOUND");
        assert_eq!(FmrError::RedFlag { items: vec![] }.code(), "RED_FLAG");
    }

    #[test]
    fn test_validation_lists_every_field() {
        let err = FmrError::missing(["name", "road_length_km", "attachments.locationMap"]);
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("road_length_km"));
        assert!(msg.contains("attachments.locationMap"));
    }

    #[test]
    fn test_illegal_transition_message() {
        let err = FmrError::illegal(ProjectStatus::Cleared, "award");
        assert_eq!(err.to_string(), "Cannot award a project in status CLEARED");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(to_exit_code(&FmrError::missing(["x"])), 2);
        assert_eq!(to_exit_code(&FmrError::illegal(ProjectStatus::Scored, "award")), 3);
        assert_eq!(to_exit_code(&FmrError::Storage("disk".into())), 1);
    }

    #[test]
    fn test_recoverable() {
        assert!(FmrError::missing(["x"]).is_recoverable());
        assert!(!FmrError::RedFlag { items: vec!["x".into()] }.is_recoverable());
        assert!(!FmrError::illegal(ProjectStatus::Scored, "award").is_recoverable());
    }

    #[test]
    fn test_wrap_error() {
        let wrapped = FmrError::wrap("inner error", "outer context");
        assert_eq!(wrapped.code(), "WRAPPED_ERROR");
        assert!(wrapped.to_string().contains("outer context"));
        assert!(wrapped.to_string().contains("inner error"));
    }
}
