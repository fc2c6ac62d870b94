//! Audit logging configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for the per-session audit logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether invocation records are written at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory holding one log file per (session, stage).
    /// Relative paths resolve against the working directory.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl AuditConfig {
    /// Resolve the logs directory against a base directory.
    pub fn resolve_directory(&self, base: &Path) -> PathBuf {
        if self.directory.is_absolute() {
            self.directory.clone()
        } else {
            base.join(&self.directory)
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            directory: default_directory(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_directory() -> PathBuf {
    PathBuf::from(".claude").join("logs")
}
