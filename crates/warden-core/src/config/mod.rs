//! Configuration types for Warden.
//!
//! Configuration is optional. Without a file the built-in policy applies:
//! `.env` protection for the file and shell tools, the recursive-force `rm`
//! rule for the shell tool, and audit logs under `.claude/logs`.
//!
//! # Configuration Files
//!
//! - **--config / WARDEN_CONFIG**: explicit path, must exist
//! - **.claude/warden.yaml**: picked up from the working directory when present

pub mod audit;
pub mod guard;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use audit::AuditConfig;
pub use guard::GuardConfig;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = ".claude/warden.yaml";

/// Complete Warden configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WardenConfig {
    /// Audit log settings.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Guard rule settings.
    #[serde(default)]
    pub guard: GuardConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl WardenConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Pick the config file to load, if any.
    ///
    /// An explicit path is always returned (a missing file is then an error
    /// for the caller to report); otherwise the default file under `base`
    /// is used only when it exists.
    pub fn locate(explicit: Option<&Path>, base: &Path) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(if path.is_absolute() {
                path.to_path_buf()
            } else {
                base.join(path)
            });
        }
        let candidate = base.join(DEFAULT_CONFIG_FILE);
        candidate.is_file().then_some(candidate)
    }

    /// Locate and load configuration, falling back to defaults when no file
    /// applies.
    pub fn load(explicit: Option<&Path>, base: &Path) -> Result<Self, ConfigError> {
        match Self::locate(explicit, base) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
