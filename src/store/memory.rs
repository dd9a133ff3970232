//! In-memory stores

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::errors::{FmrError, Result};
use crate::schemas::{Attachment, Project};

use super::{check_version, display_name, object_key_parts, ProjectRepository, Uploader};

/// Project repository held in a map
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    projects: RwLock<BTreeMap<String, Project>>,
    writes: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-loaded with records, bypassing the version check
    pub fn seeded(projects: impl IntoIterator<Item = Project>) -> Self {
        let map = projects.into_iter().map(|p| (p.id.clone(), p)).collect();
        InMemoryRepository {
            projects: RwLock::new(map),
            writes: AtomicUsize::new(0),
        }
    }

    /// Number of accepted upserts
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryRepository {
    async fn get(&self, id: &str) -> Result<Project> {
        self.projects
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| FmrError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<Project>> {
        Ok(self.projects.read().await.values().cloned().collect())
    }

    async fn upsert(&self, project: &Project) -> Result<()> {
        let mut projects = self.projects.write().await;
        check_version(projects.get(&project.id).map(|p| p.version), project)?;
        projects.insert(project.id.clone(), project.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Object store held in a map, with optional failure injection
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    fail_on: Option<String>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects any object whose display name equals `file_name`
    pub fn failing_on(file_name: impl Into<String>) -> Self {
        MemoryObjectStore {
            objects: Mutex::new(BTreeMap::new()),
            fail_on: Some(file_name.into()),
        }
    }

    /// Keys of stored objects
    pub async fn keys(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }

    /// Contents of one object
    pub async fn bytes(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl Uploader for MemoryObjectStore {
    async fn store(&self, bytes: Vec<u8>, file_name: &str) -> Result<Attachment> {
        object_key_parts(file_name)?;
        let name = display_name(file_name);
        if self.fail_on.as_deref() == Some(name) {
            return Err(FmrError::Upload(format!("object store rejected {}", name)));
        }
        self.objects
            .lock()
            .await
            .insert(file_name.to_string(), bytes);
        Ok(Attachment::new(name, format!("memory://{}", file_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::project::fixtures::sample_project;
    use crate::schemas::ProjectStatus;

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = InMemoryRepository::new();
        let err = repo.get("FMR-2026-0404").await.unwrap_err();
        assert!(matches!(err, FmrError::NotFound(_)));
        assert!(!repo.exists("FMR-2026-0404").await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let repo = InMemoryRepository::new();
        let project = sample_project();
        repo.upsert(&project).await.unwrap();

        assert_eq!(repo.get(&project.id).await.unwrap(), project);
        assert!(repo.exists(&project.id).await.unwrap());
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn test_upsert_rejects_stale_version() {
        let repo = InMemoryRepository::new();
        let project = sample_project();
        repo.upsert(&project).await.unwrap();

        let next = project.clone().with_status(ProjectStatus::Cleared).next_revision();
        repo.upsert(&next).await.unwrap();

        // A second writer still holding the old revision
        let racing = project.with_status(ProjectStatus::OnHold).next_revision();
        let err = repo.upsert(&racing).await.unwrap_err();
        assert!(matches!(err, FmrError::StaleWrite { expected: 3, found: 2, .. }));
        assert_eq!(repo.get(&next.id).await.unwrap().status, ProjectStatus::Cleared);
        assert_eq!(repo.write_count(), 2);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let mut a = sample_project();
        a.id = "FMR-2026-0900".to_string();
        let mut b = sample_project();
        b.id = "FMR-2026-0100".to_string();
        let repo = InMemoryRepository::seeded([a, b]);

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["FMR-2026-0100", "FMR-2026-0900"]);
    }

    #[tokio::test]
    async fn test_object_store_records_bytes() {
        let store = MemoryObjectStore::new();
        let attachment = store.store(b"pdf".to_vec(), "batch/map.pdf").await.unwrap();
        assert_eq!(attachment.name, "map.pdf");
        assert_eq!(attachment.url, "memory://batch/map.pdf");
        assert_eq!(store.bytes("batch/map.pdf").await, Some(b"pdf".to_vec()));
    }

    #[tokio::test]
    async fn test_object_store_failure_injection() {
        let store = MemoryObjectStore::failing_on("abc.xlsx");
        assert!(store.store(vec![1], "p/qto.xlsx").await.is_ok());
        let err = store.store(vec![2], "p/abc.xlsx").await.unwrap_err();
        assert!(matches!(err, FmrError::Upload(_)));
        assert_eq!(store.keys().await, vec!["p/qto.xlsx".to_string()]);
    }
}
