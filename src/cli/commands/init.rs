//! Init command - Create a .fmr workspace

use std::path::Path;

use crate::errors::Result;
use crate::fs;
use crate::schemas::Config;

/// Initialize a workspace in the specified directory.
///
/// An existing config.json is kept unless `force` is set.
pub async fn run(cwd: Option<&Path>, force: bool, dry_run: bool) -> Result<()> {
    let root = fs::resolve_cwd(cwd);
    let config_path = fs::get_config_path(&root);
    let keep_config = config_path.exists() && !force;
    let config = if keep_config {
        fs::read_config(&root)?
    } else {
        Config::default()
    };

    let dirs = [
        fs::get_projects_dir(&root, &config),
        fs::get_uploads_dir(&root, &config),
    ];
    if dry_run {
        for dir in &dirs {
            tracing::info!("[DRY RUN] would create {}", dir.display());
        }
        if !keep_config {
            tracing::info!("[DRY RUN] would write {}", config_path.display());
        }
        return Ok(());
    }

    for dir in &dirs {
        std::fs::create_dir_all(dir)?;
    }
    if keep_config {
        tracing::info!("Keeping existing {}", config_path.display());
    } else {
        fs::write_config(&root, &config)?;
    }
    println!("Initialized FMR workspace at {}", fs::get_fmr_dir(&root).display());
    Ok(())
}
