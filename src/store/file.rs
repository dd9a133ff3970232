//! File-backed stores under `.fmr`

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::is_valid_project_id;
use crate::errors::{FmrError, Result};
use crate::fs;
use crate::schemas::{Attachment, Config, Project};

use super::{check_version, display_name, object_key_parts, ProjectRepository, Uploader};

/// One JSON document per project in the configured projects directory
#[derive(Debug)]
pub struct JsonFileRepository {
    root: PathBuf,
    config: Config,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        JsonFileRepository {
            root: root.into(),
            config,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl ProjectRepository for JsonFileRepository {
    /// IDs outside the `FMR-YYYY-NNNN` format never name a record file.
    async fn get(&self, id: &str) -> Result<Project> {
        if !is_valid_project_id(id) {
            return Err(FmrError::NotFound(id.to_string()));
        }
        fs::read_project(&self.root, &self.config, id)
    }

    async fn list(&self) -> Result<Vec<Project>> {
        let dir = fs::get_projects_dir(&self.root, &self.config);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut projects = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            projects.push(fs::read_json::<Project>(&path)?);
        }
        projects.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(projects)
    }

    async fn upsert(&self, project: &Project) -> Result<()> {
        if !is_valid_project_id(&project.id) {
            return Err(FmrError::missing(["id"]));
        }
        let _guard = self.write_lock.lock().await;
        let stored = match fs::read_project(&self.root, &self.config, &project.id) {
            Ok(existing) => Some(existing.version),
            Err(FmrError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };
        check_version(stored, project)?;
        fs::write_project(&self.root, &self.config, project)
            .map_err(|e| FmrError::Storage(format!("Failed to write {}: {}", project.id, e)))
    }
}

/// Uploaded files stored on local disk
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    dir: PathBuf,
    public_base_url: Option<String>,
}

impl LocalObjectStore {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
        LocalObjectStore {
            dir: dir.into(),
            public_base_url,
        }
    }

    /// Store rooted at the workspace's uploads directory
    pub fn for_workspace(root: &Path, config: &Config) -> Self {
        Self::new(
            fs::get_uploads_dir(root, config),
            config.public_base_url.clone(),
        )
    }

    fn url_for(&self, key: &str, path: &Path) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
            None => format!("file://{}", path.display()),
        }
    }
}

#[async_trait]
impl Uploader for LocalObjectStore {
    async fn store(&self, bytes: Vec<u8>, file_name: &str) -> Result<Attachment> {
        let parts = object_key_parts(file_name)?;
        let path = parts.iter().fold(self.dir.clone(), |acc, p| acc.join(p));

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FmrError::Upload(format!("{}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| FmrError::Upload(format!("{}: {}", path.display(), e)))?;

        Ok(Attachment::new(
            display_name(file_name),
            self.url_for(file_name, &path),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::project::fixtures::sample_project;
    use crate::schemas::ProjectStatus;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_empty_workspace() {
        let temp = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(temp.path(), Config::default());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_get_and_list() {
        let temp = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(temp.path(), Config::default());
        let project = sample_project();
        repo.upsert(&project).await.unwrap();

        let path = temp.path().join(".fmr/projects/FMR-2026-0001.json");
        assert!(path.exists());

        let read = repo.get(&project.id).await.unwrap();
        assert_eq!(read.id, project.id);
        assert_eq!(read.version, 1);

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_cas_on_disk() {
        let temp = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(temp.path(), Config::default());
        let project = sample_project();
        repo.upsert(&project).await.unwrap();

        let duplicate = repo.upsert(&project).await.unwrap_err();
        assert!(matches!(duplicate, FmrError::StaleWrite { expected: 2, found: 1, .. }));

        let next = project.with_status(ProjectStatus::Cleared).next_revision();
        repo.upsert(&next).await.unwrap();
        assert_eq!(repo.get(&next.id).await.unwrap().status, ProjectStatus::Cleared);
    }

    #[tokio::test]
    async fn test_malformed_ids_never_reach_disk() {
        let temp = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(temp.path(), Config::default());
        crate::fs::write_config(temp.path(), &Config::default()).unwrap();

        for id in ["../config", "FMR-2026-0001/../../config", ""] {
            let err = repo.get(id).await.unwrap_err();
            assert!(matches!(err, FmrError::NotFound(_)), "{}: {:?}", id, err);
        }

        let mut project = sample_project();
        project.id = "../escape".to_string();
        assert!(matches!(
            repo.upsert(&project).await.unwrap_err(),
            FmrError::Validation { .. }
        ));
        assert!(!temp.path().join(".fmr/escape.json").exists());
    }

    #[tokio::test]
    async fn test_list_skips_temp_files() {
        let temp = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(temp.path(), Config::default());
        repo.upsert(&sample_project()).await.unwrap();
        std::fs::write(
            temp.path().join(".fmr/projects/FMR-2026-0002.json.tmp"),
            "{",
        )
        .unwrap();

        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_local_object_store_writes_file() {
        let temp = TempDir::new().unwrap();
        let store = LocalObjectStore::new(temp.path().join("uploads"), None);

        let attachment = store
            .store(b"%PDF".to_vec(), "FMR-2026-0001/abc.pdf")
            .await
            .unwrap();
        let path = temp.path().join("uploads/FMR-2026-0001/abc.pdf");
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF");
        assert_eq!(attachment.name, "abc.pdf");
        assert!(attachment.url.starts_with("file://"));
    }

    #[tokio::test]
    async fn test_local_object_store_public_url() {
        let temp = TempDir::new().unwrap();
        let store = LocalObjectStore::new(
            temp.path(),
            Some("https://files.example.ph/fmr/".to_string()),
        );
        let attachment = store.store(vec![0], "batch-7/map.png").await.unwrap();
        assert_eq!(attachment.url, "https://files.example.ph/fmr/batch-7/map.png");
    }

    #[tokio::test]
    async fn test_local_object_store_rejects_traversal() {
        let temp = TempDir::new().unwrap();
        let store = LocalObjectStore::new(temp.path().join("uploads"), None);
        let err = store.store(vec![0], "../escape.txt").await.unwrap_err();
        assert!(matches!(err, FmrError::Upload(_)));
    }
}
