//! List command - List projects with optional filtering

use std::path::Path;

use crate::errors::{FmrError, Result};
use crate::schemas::ProjectStatus;

use super::open_pipeline;

/// List projects, optionally restricted to one status
pub async fn run(cwd: Option<&Path>, json: bool, status: Option<ProjectStatus>) -> Result<()> {
    let pipeline = open_pipeline(cwd, false)?;
    let index = pipeline.index(status).await?;

    if json {
        let out = serde_json::to_string_pretty(&index)
            .map_err(|e| FmrError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    if index.items.is_empty() {
        println!("No projects found");
        return Ok(());
    }
    for item in &index.items {
        println!(
            "{:<15} {:<18} {:<7} {}",
            item.id,
            item.status.as_str(),
            item.stage.to_string(),
            item.name
        );
    }
    Ok(())
}
