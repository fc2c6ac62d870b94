//! CLI command implementations for Warden.

pub mod check;
pub mod hook;
pub mod show;

use std::path::{Path, PathBuf};

use warden_core::{ConfigError, WardenConfig};

/// Directory relative paths resolve against.
///
/// Falls back to `.` when the working directory cannot be determined.
pub fn working_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Cannot determine working directory, using '.'");
        PathBuf::from(".")
    })
}

/// Load configuration for a command.
pub fn load_config(explicit: Option<&Path>, base: &Path) -> Result<WardenConfig, ConfigError> {
    let config = WardenConfig::load(explicit, base)?;
    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

/// Logs directory: the `--log-dir` override, else the configured directory.
pub fn resolve_log_dir(override_dir: Option<&Path>, config: &WardenConfig, base: &Path) -> PathBuf {
    match override_dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => base.join(dir),
        None => config.audit.resolve_directory(base),
    }
}
