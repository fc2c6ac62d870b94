//! Guard configuration.
//!
//! The defaults are the built-in policy; a config file only needs to name
//! the fields it changes.

use serde::{Deserialize, Serialize};

/// Tool names and markers the guard rules match against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Tools that execute shell text from a `command` parameter.
    #[serde(default = "default_shell_tools")]
    pub shell_tools: Vec<String>,

    /// Tools that read or write a `file_path` parameter.
    #[serde(default = "default_file_tools")]
    pub file_tools: Vec<String>,

    /// Substring that marks a credentials file.
    #[serde(default = "default_sensitive_marker")]
    pub sensitive_marker: String,

    /// Substrings that mark a safe template of the credentials file.
    #[serde(default = "default_safe_templates")]
    pub safe_templates: Vec<String>,

    /// Whether the recursive-force `rm` rule is active.
    #[serde(default = "default_true")]
    pub destructive_delete: bool,
}

impl GuardConfig {
    pub fn is_shell_tool(&self, tool: &str) -> bool {
        self.shell_tools.iter().any(|t| t == tool)
    }

    pub fn is_file_tool(&self, tool: &str) -> bool {
        self.file_tools.iter().any(|t| t == tool)
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            shell_tools: default_shell_tools(),
            file_tools: default_file_tools(),
            sensitive_marker: default_sensitive_marker(),
            safe_templates: default_safe_templates(),
            destructive_delete: true,
        }
    }
}

fn default_shell_tools() -> Vec<String> {
    vec!["Bash".to_string()]
}

fn default_file_tools() -> Vec<String> {
    ["Read", "Edit", "MultiEdit", "Write"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_sensitive_marker() -> String {
    ".env".to_string()
}

fn default_safe_templates() -> Vec<String> {
    vec![".env.sample".to_string(), ".env.example".to_string()]
}

fn default_true() -> bool {
    true
}
