//! Path resolution utilities for FMR workspaces
//!
//! Provides functions to locate the workspace root and construct paths
//! to the files and directories under `.fmr`.

use std::path::{Path, PathBuf};

use crate::errors::{FmrError, Result};
use crate::schemas::Config;

/// Name of the workspace metadata directory
pub const FMR_DIR: &str = ".fmr";

/// Find the workspace root containing a .fmr directory.
///
/// Walks up the directory tree from the starting directory.
///
/// # Errors
/// * `WorkspaceNotFound` - If no ancestor contains `.fmr`
pub fn find_workspace_root(start_cwd: &Path) -> Result<PathBuf> {
    let mut current = start_cwd
        .canonicalize()
        .map_err(|e| FmrError::WorkspaceNotFound(format!("Cannot resolve path: {}", e)))?;

    loop {
        if current.join(FMR_DIR).is_dir() {
            return Ok(current);
        }

        match current.parent() {
            Some(parent) if parent != current => {
                current = parent.to_path_buf();
            }
            _ => {
                return Err(FmrError::WorkspaceNotFound(
                    "Could not find a .fmr directory; run `fmr init` first".to_string(),
                ));
            }
        }
    }
}

/// Resolve the current working directory, optionally using an override.
pub fn resolve_cwd(cwd_option: Option<&Path>) -> PathBuf {
    match cwd_option {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Get the path to the .fmr directory.
pub fn get_fmr_dir(root: &Path) -> PathBuf {
    root.join(FMR_DIR)
}

/// Get the path to the config.json file.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_fmr_dir(root).join("config.json")
}

/// Get the path to the projects directory.
pub fn get_projects_dir(root: &Path, config: &Config) -> PathBuf {
    get_fmr_dir(root).join(&config.projects_dir)
}

/// Get the path to a project's JSON record.
pub fn get_project_json_path(root: &Path, config: &Config, id: &str) -> PathBuf {
    get_projects_dir(root, config).join(format!("{}.json", id))
}

/// Get the path to the uploads directory.
pub fn get_uploads_dir(root: &Path, config: &Config) -> PathBuf {
    get_fmr_dir(root).join(&config.uploads_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_workspace() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join(FMR_DIR)).unwrap();
        temp
    }

    #[test]
    fn test_find_workspace_root_from_root() {
        let temp = setup_workspace();
        let root = find_workspace_root(temp.path()).unwrap();
        assert_eq!(root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_workspace_root_from_subdir() {
        let temp = setup_workspace();
        let subdir = temp.path().join("region3").join("batch-a");
        std::fs::create_dir_all(&subdir).unwrap();

        let root = find_workspace_root(&subdir).unwrap();
        assert_eq!(root, temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_find_workspace_root_ignores_plain_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(FMR_DIR), "").unwrap();

        let result = find_workspace_root(temp.path());
        assert!(matches!(result, Err(FmrError::WorkspaceNotFound(_))));
    }

    #[test]
    fn test_find_workspace_root_not_found() {
        let temp = TempDir::new().unwrap();
        let result = find_workspace_root(temp.path());
        assert!(result.unwrap_err().to_string().contains("fmr init"));
    }

    #[test]
    fn test_workspace_paths() {
        let root = PathBuf::from("/ws");
        let config = Config::default();

        assert_eq!(get_fmr_dir(&root), PathBuf::from("/ws/.fmr"));
        assert_eq!(get_config_path(&root), PathBuf::from("/ws/.fmr/config.json"));
        assert_eq!(get_projects_dir(&root, &config), PathBuf::from("/ws/.fmr/projects"));
        assert_eq!(
            get_project_json_path(&root, &config, "FMR-2026-0001"),
            PathBuf::from("/ws/.fmr/projects/FMR-2026-0001.json")
        );
        assert_eq!(get_uploads_dir(&root, &config), PathBuf::from("/ws/.fmr/uploads"));
    }

    #[test]
    fn test_paths_follow_config() {
        let root = PathBuf::from("/ws");
        let config = Config {
            projects_dir: "records".to_string(),
            uploads_dir: "files".to_string(),
            ..Config::default()
        };
        assert_eq!(get_projects_dir(&root, &config), PathBuf::from("/ws/.fmr/records"));
        assert_eq!(get_uploads_dir(&root, &config), PathBuf::from("/ws/.fmr/files"));
    }

    #[test]
    fn test_resolve_cwd_with_override() {
        let path = PathBuf::from("/custom/path");
        assert_eq!(resolve_cwd(Some(&path)), path);
    }

    #[test]
    fn test_resolve_cwd_without_override() {
        assert!(!resolve_cwd(None).as_os_str().is_empty());
    }
}
