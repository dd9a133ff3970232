//! File system utilities for FMR workspaces
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{
    read_config, read_json, read_project, write_config, write_json, write_project,
};
pub use paths::{
    find_workspace_root, get_config_path, get_fmr_dir, get_project_json_path, get_projects_dir,
    get_uploads_dir, resolve_cwd, FMR_DIR,
};
