//! Rule violation and guard construction errors.
//!
//! A [`RuleViolation`] is not a failure of the guard: it is the value a rule
//! returns when it fires, carrying the text shown to the agent.

use serde::Serialize;
use std::fmt;

/// A fired guard rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleViolation {
    /// The rule that fired.
    pub kind: RuleKind,
    /// Headline naming the violated policy.
    pub message: String,
    /// Follow-up lines: the offending command, a remediation hint.
    pub details: Vec<String>,
}

impl RuleViolation {
    /// Create a new violation.
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Append a detail line.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    // =========================================================================
    // SENSITIVE FILE ERRORS
    // =========================================================================

    /// Access to a credentials file was attempted.
    ///
    /// `template` names the safe variant to point the agent at, if any.
    pub fn sensitive_file_access(marker: &str, template: Option<&str>) -> Self {
        let violation = Self::new(
            RuleKind::SensitiveFile,
            format!("Access to {marker} files is blocked for security."),
        );
        match template {
            Some(template) => violation.with_detail(format!("Use {template} for templates.")),
            None => violation,
        }
    }

    // =========================================================================
    // DESTRUCTIVE COMMAND ERRORS
    // =========================================================================

    /// A recursive forced removal with a high blast radius was attempted.
    pub fn dangerous_rm(command: &str) -> Self {
        Self::new(RuleKind::DestructiveDelete, "Dangerous rm command blocked.")
            .with_detail(format!("Command: {command}"))
            .with_detail("This could delete important system files.")
    }

    /// All lines of the block reason, headline first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.message.as_str()).chain(self.details.iter().map(String::as_str))
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuleViolation {}

/// Guard rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Reads or writes of a credentials file.
    SensitiveFile,
    /// `rm` with recursive and force flags near a dangerous path.
    DestructiveDelete,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::SensitiveFile => "sensitive_file",
            RuleKind::DestructiveDelete => "destructive_delete",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors building a guard from configuration.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// A rule pattern failed to compile.
    #[error("invalid pattern for rule {rule}: {source}")]
    InvalidPattern {
        rule: RuleKind,
        #[source]
        source: regex::Error,
    },

    /// The sensitive marker is empty, which would match every path.
    #[error("sensitive_marker must not be empty")]
    EmptyMarker,
}
