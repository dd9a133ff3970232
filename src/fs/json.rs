//! JSON file operations with schema validation
//!
//! Provides functions to read and write JSON files with serde validation.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{FmrError, Result};
use crate::schemas::{Config, Project};

use super::paths::{get_config_path, get_project_json_path};

/// Read and deserialize a JSON file.
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidJson` - If the file contains invalid JSON or does not match the schema
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FmrError::FileNotFound(format!("File not found: {}", path.display()))
        } else {
            FmrError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        FmrError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Write a value to a JSON file with pretty formatting.
///
/// Uses atomic write (write to temp file, then rename) to avoid partial writes.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| FmrError::InvalidJson(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the config.json file for a workspace.
///
/// Returns the default config if the file doesn't exist.
pub fn read_config(root: &Path) -> Result<Config> {
    let path = get_config_path(root);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

/// Write the config.json file for a workspace.
pub fn write_config(root: &Path, config: &Config) -> Result<()> {
    write_json(&get_config_path(root), config)
}

/// Read a project record.
///
/// # Errors
/// * `NotFound` - If no record exists for `id`
pub fn read_project(root: &Path, config: &Config, id: &str) -> Result<Project> {
    let path = get_project_json_path(root, config, id);
    match read_json(&path) {
        Err(FmrError::FileNotFound(_)) => Err(FmrError::NotFound(id.to_string())),
        other => other,
    }
}

/// Write a project record.
pub fn write_project(root: &Path, config: &Config, project: &Project) -> Result<()> {
    let path = get_project_json_path(root, config, &project.id);
    write_json(&path, project)
}
