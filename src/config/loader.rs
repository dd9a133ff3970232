//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{FmrError, Result};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the workspace, falling back to defaults.
///
/// If config.json exists, it is read and merged with per-field defaults.
/// If it doesn't exist, default configuration is returned.
///
/// # Errors
/// * `InvalidJson` - config.json is malformed
/// * `ConfigError` - a value is out of range
pub fn load_config(root: &Path) -> Result<Config> {
    let config = fs::read_config(root)?;
    validate_config(&config)?;
    Ok(config)
}

/// Reject settings the pipeline cannot run with.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.max_concurrent_uploads == 0 {
        return Err(FmrError::ConfigError(
            "max_concurrent_uploads must be at least 1".to_string(),
        ));
    }
    if config.max_id_attempts == 0 {
        return Err(FmrError::ConfigError(
            "max_id_attempts must be at least 1".to_string(),
        ));
    }
    for (key, dir) in [
        ("projects_dir", &config.projects_dir),
        ("uploads_dir", &config.uploads_dir),
    ] {
        let path = Path::new(dir);
        if dir.trim().is_empty() || path.is_absolute() || dir.contains("..") {
            return Err(FmrError::ConfigError(format!(
                "{} must be a relative directory inside .fmr, got {:?}",
                key, dir
            )));
        }
    }
    if config.projects_dir == config.uploads_dir {
        return Err(FmrError::ConfigError(
            "projects_dir and uploads_dir must differ".to_string(),
        ));
    }
    Ok(())
}
