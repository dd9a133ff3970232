//! Config schema - Configuration for the FMR workspace

use serde::{Deserialize, Serialize};

/// Main configuration for an FMR workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Directory (relative to .fmr) holding project records
    #[serde(default = "default_projects_dir")]
    pub projects_dir: String,

    /// Directory (relative to .fmr) holding uploaded files
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,

    /// URL prefix for stored files; file:// URLs are used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_base_url: Option<String>,

    /// Attempts at drawing an unused project ID before giving up
    #[serde(default = "default_max_id_attempts")]
    pub max_id_attempts: u32,

    /// Uploads in flight at once for a single transition
    #[serde(default = "default_max_concurrent_uploads")]
    pub max_concurrent_uploads: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_projects_dir() -> String {
    "projects".to_string()
}

fn default_uploads_dir() -> String {
    "uploads".to_string()
}

fn default_max_id_attempts() -> u32 {
    20
}

fn default_max_concurrent_uploads() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: 1,
            projects_dir: default_projects_dir(),
            uploads_dir: default_uploads_dir(),
            public_base_url: None,
            max_id_attempts: 20,
            max_concurrent_uploads: 4,
        }
    }
}
