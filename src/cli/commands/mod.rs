//! CLI command implementations

pub mod actions;
pub mod init;
pub mod list;
pub mod rules;
pub mod show;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::config::load_config;
use crate::domain::{allowed_actions, stage_of};
use crate::errors::{FmrError, Result};
use crate::fs;
use crate::schemas::Project;
use crate::store::{JsonFileRepository, LocalObjectStore};
use crate::workflow::{PendingFile, Pipeline};

/// Pipeline over the workspace's file-backed stores
pub type WorkspacePipeline = Pipeline<JsonFileRepository, LocalObjectStore>;

/// Locate the workspace and build a pipeline over it.
pub fn open_pipeline(cwd: Option<&Path>, dry_run: bool) -> Result<WorkspacePipeline> {
    let root = fs::find_workspace_root(&fs::resolve_cwd(cwd))?;
    let config = load_config(&root)?;
    tracing::debug!(root = %root.display(), "opened workspace");
    Ok(Pipeline::new(
        JsonFileRepository::new(root.clone(), config.clone()),
        LocalObjectStore::for_workspace(&root, &config),
        config,
    )
    .with_dry_run(dry_run))
}

/// Read a JSON payload file.
pub fn read_payload<T: DeserializeOwned>(path: &Path) -> Result<T> {
    fs::read_json(path)
}

/// Split a `key=path` argument.
pub fn parse_doc_arg(arg: &str) -> Result<(String, PathBuf)> {
    match arg.split_once('=') {
        Some((key, path)) if !key.trim().is_empty() && !path.trim().is_empty() => {
            Ok((key.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(FmrError::wrap(
            format!("expected KEY=PATH, got {:?}", arg),
            "Invalid --doc argument",
        )),
    }
}

/// Read every `key=path` argument into pending uploads.
pub async fn read_docs(args: &[String]) -> Result<Vec<PendingFile>> {
    let mut files = Vec::with_capacity(args.len());
    for arg in args {
        let (key, path) = parse_doc_arg(arg)?;
        files.push(PendingFile::from_path(key, &path).await?);
    }
    Ok(files)
}

/// Print a project as JSON or as a short summary.
pub fn print_project(project: &Project, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(project)
            .map_err(|e| FmrError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}  {}", project.id, project.details.name);
    println!(
        "  status: {} ({}), version {}",
        project.status,
        stage_of(project.status),
        project.version
    );
    if let Some(info) = &project.return_info {
        println!(
            "  returned at {}: {}",
            info.stage,
            info.remarks.as_deref().unwrap_or("(no remarks)")
        );
    }
    let next: Vec<String> = allowed_actions(project.status)
        .iter()
        .map(|a| format!("{} ({})", a, a.role()))
        .collect();
    if next.is_empty() {
        println!("  no further actions");
    } else {
        println!("  next: {}", next.join(", "));
    }
    Ok(())
}
