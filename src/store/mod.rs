//! Persistence seams
//!
//! The pipeline talks to two stores: a document repository holding project
//! records and an object store holding uploaded files. Both are async traits
//! so the service can run against the in-memory stores in tests and the
//! file-backed stores from the CLI.

mod file;
mod memory;

use async_trait::async_trait;

use crate::errors::{FmrError, Result};
use crate::schemas::{Attachment, Project};

pub use file::{JsonFileRepository, LocalObjectStore};
pub use memory::{InMemoryRepository, MemoryObjectStore};

/// Keyed store of project records with compare-and-swap writes
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Fetch one project.
    ///
    /// # Errors
    /// * `NotFound` - no record for `id`
    async fn get(&self, id: &str) -> Result<Project>;

    /// All projects, ordered by id.
    async fn list(&self) -> Result<Vec<Project>>;

    /// Insert or replace a project.
    ///
    /// The record's `version` must be exactly one past the stored version,
    /// or 1 when nothing is stored under its id.
    ///
    /// # Errors
    /// * `StaleWrite` - the version check failed
    /// * `Storage` - the backing store failed
    async fn upsert(&self, project: &Project) -> Result<()>;

    /// Whether a record exists for `id`.
    async fn exists(&self, id: &str) -> Result<bool> {
        match self.get(id).await {
            Ok(_) => Ok(true),
            Err(FmrError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Durable storage for uploaded files
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Store `bytes` under `file_name` and return a durable reference.
    ///
    /// `file_name` may carry a folder prefix separated by `/`.
    ///
    /// # Errors
    /// * `Upload` - the object could not be stored
    async fn store(&self, bytes: Vec<u8>, file_name: &str) -> Result<Attachment>;
}

/// Compare-and-swap check shared by repository implementations.
pub(crate) fn check_version(stored: Option<u64>, project: &Project) -> Result<()> {
    let expected = stored.map_or(1, |v| v + 1);
    if project.version != expected {
        return Err(FmrError::StaleWrite {
            id: project.id.clone(),
            expected,
            found: project.version,
        });
    }
    Ok(())
}

/// Split an object key into safe path components.
pub(crate) fn object_key_parts(file_name: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = file_name.split('/').collect();
    let unsafe_part = parts
        .iter()
        .any(|p| p.is_empty() || *p == "." || *p == ".." || p.contains('\\'));
    if parts.is_empty() || unsafe_part {
        return Err(FmrError::Upload(format!("Invalid object name: {:?}", file_name)));
    }
    Ok(parts)
}

/// Display name of an object: the last component of its key.
pub(crate) fn display_name(file_name: &str) -> &str {
    file_name.rsplit('/').next().unwrap_or(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::project::fixtures::sample_project;

    #[test]
    fn test_check_version_new_record() {
        let project = sample_project();
        assert!(check_version(None, &project).is_ok());

        let mut bumped = project.clone();
        bumped.version = 2;
        match check_version(None, &bumped).unwrap_err() {
            FmrError::StaleWrite { expected, found, .. } => {
                assert_eq!(expected, 1);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_check_version_existing_record() {
        let mut project = sample_project();
        project.version = 4;
        assert!(check_version(Some(3), &project).is_ok());
        assert!(check_version(Some(4), &project).is_err());
        assert!(check_version(Some(2), &project).is_err());
    }

    #[test]
    fn test_object_key_parts() {
        assert_eq!(
            object_key_parts("FMR-2026-0001/qto-quantities.xlsx").unwrap(),
            vec!["FMR-2026-0001", "qto-quantities.xlsx"]
        );
        assert!(object_key_parts("../etc/passwd").is_err());
        assert!(object_key_parts("a//b").is_err());
        assert!(object_key_parts("").is_err());
        assert!(object_key_parts("a\\b").is_err());
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("batch-1/map.pdf"), "map.pdf");
        assert_eq!(display_name("map.pdf"), "map.pdf");
    }
}
