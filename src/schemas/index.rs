//! Index schema - Summary listing of projects

use serde::{Deserialize, Serialize};

use super::{Project, ProjectStatus, Stage};
use crate::domain::stage_of;

/// An entry in the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexItem {
    /// Project ID
    pub id: String,

    /// Project name
    pub name: String,

    /// Current status
    pub status: ProjectStatus,

    /// Stage derived from the status
    pub stage: Stage,

    /// ISO 8601 last update timestamp
    pub last_updated: String,
}

impl From<&Project> for IndexItem {
    fn from(project: &Project) -> Self {
        IndexItem {
            id: project.id.clone(),
            name: project.details.name.clone(),
            status: project.status,
            stage: stage_of(project.status),
            last_updated: project.last_updated.clone(),
        }
    }
}

/// Index of projects, sorted by ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Index {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// List of index entries
    pub items: Vec<IndexItem>,

    /// ISO 8601 timestamp when index was generated
    pub generated_at: String,
}

impl Index {
    /// Create a new empty index
    pub fn new() -> Self {
        Index {
            schema_version: 1,
            items: Vec::new(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Build an index from projects, optionally keeping one status
    pub fn from_projects(projects: &[Project], status: Option<ProjectStatus>) -> Self {
        let mut items: Vec<IndexItem> = projects
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .map(IndexItem::from)
            .collect();
        items.sort_by(|a, b| a.id.cmp(&b.id));
        Index {
            items,
            ..Index::new()
        }
    }
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}
