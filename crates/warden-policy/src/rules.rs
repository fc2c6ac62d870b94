//! Guard rules.
//!
//! Each rule is an independent predicate over an invocation record:
//! - [`SensitiveFileRule`]: credentials file reads and writes
//! - [`DestructiveDeleteRule`]: `rm` with recursive and force flags near a
//!   dangerous path
//!
//! Both are text heuristics, not parsers, and can over-block.

use crate::error::{PolicyError, RuleKind, RuleViolation};
use regex::Regex;
use warden_core::{GuardConfig, InvocationRecord};

/// A single guard rule.
pub trait Rule: Send + Sync {
    /// Which rule this is.
    fn kind(&self) -> RuleKind;

    /// Return the violation if the rule fires for this record.
    fn check(&self, record: &InvocationRecord) -> Option<RuleViolation>;
}

// ============================================================================
// Sensitive file access
// ============================================================================

/// Blocks reads and writes of the credentials file.
///
/// File tools fire on the marker appearing anywhere in `file_path`. The shell
/// tool fires only when the command both mentions the marker and uses a
/// direct-access idiom (`cat`, `echo >`, `touch`, `cp`, `mv`). Paths and
/// commands naming a safe template are always allowed.
pub struct SensitiveFileRule {
    config: GuardConfig,
    access_patterns: Vec<Regex>,
}

impl SensitiveFileRule {
    pub fn new(config: &GuardConfig) -> Result<Self, PolicyError> {
        if config.sensitive_marker.is_empty() {
            return Err(PolicyError::EmptyMarker);
        }
        let marker = regex::escape(&config.sensitive_marker);
        let access_patterns = [
            format!(r"cat\s+{marker}"),
            format!(r"echo\s+.*>\s*{marker}"),
            format!(r"touch\s+{marker}"),
            format!(r"cp\s+.*{marker}"),
            format!(r"mv\s+.*{marker}"),
        ]
        .iter()
        .map(|pattern| Regex::new(pattern))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| PolicyError::InvalidPattern {
            rule: RuleKind::SensitiveFile,
            source,
        })?;

        Ok(Self {
            config: config.clone(),
            access_patterns,
        })
    }

    fn marker(&self) -> &str {
        &self.config.sensitive_marker
    }

    fn names_safe_template(&self, text: &str) -> bool {
        self.config
            .safe_templates
            .iter()
            .any(|template| text.contains(template.as_str()))
    }

    fn violation(&self) -> RuleViolation {
        RuleViolation::sensitive_file_access(
            self.marker(),
            self.config.safe_templates.first().map(String::as_str),
        )
    }
}

impl Rule for SensitiveFileRule {
    fn kind(&self) -> RuleKind {
        RuleKind::SensitiveFile
    }

    fn check(&self, record: &InvocationRecord) -> Option<RuleViolation> {
        let tool = record.tool();
        let is_shell = self.config.is_shell_tool(tool);
        if !is_shell && !self.config.is_file_tool(tool) {
            return None;
        }

        // A path naming the marker decides on its own, for every applicable tool.
        let path = record.file_path();
        if path.contains(self.marker()) {
            return (!self.names_safe_template(path)).then(|| self.violation());
        }

        if !is_shell {
            return None;
        }

        let command = record.command();
        if !command.contains(self.marker()) || self.names_safe_template(command) {
            return None;
        }

        self.access_patterns
            .iter()
            .any(|pattern| pattern.is_match(command))
            .then(|| self.violation())
    }
}

// ============================================================================
// Destructive delete
// ============================================================================

/// Path tokens that make a recursive forced removal dangerous. Matched as
/// plain substrings of the whole command.
const DANGEROUS_PATH_TOKENS: &[&str] = &["/", "/*", "~", "$HOME", "..", "*", "."];

/// `rm` invoked with both recursive and force flags, in either order.
const RECURSIVE_FORCE_PATTERNS: &[&str] = &[
    r"\brm\s+(-[a-zA-Z]*r[a-zA-Z]*f[a-zA-Z]*|--recursive\s+--force)",
    r"\brm\s+(-[a-zA-Z]*f[a-zA-Z]*r[a-zA-Z]*|--force\s+--recursive)",
    r"\brm\s+-[rR]f",
    r"\brm\s+-f[rR]",
];

/// `rm -rf` directly followed by a home, absolute or relative dot path.
const RF_ROOTED_TARGET_PATTERN: &str = r"\brm\s+-[rR]f\s+[~/.]";

/// Blocks `rm` with recursive and force flags when the command also mentions
/// a high blast radius path.
///
/// The path check is a co-occurrence test over the whole command text, not
/// a parse of the arguments actually removed. `rm -rf build/` is blocked
/// because of the trailing slash, while `rm -rf important_data` passes.
pub struct DestructiveDeleteRule {
    config: GuardConfig,
    recursive_force: Vec<Regex>,
    rooted_target: Regex,
}

impl DestructiveDeleteRule {
    pub fn new(config: &GuardConfig) -> Result<Self, PolicyError> {
        let invalid = |source| PolicyError::InvalidPattern {
            rule: RuleKind::DestructiveDelete,
            source,
        };
        let recursive_force = RECURSIVE_FORCE_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()
            .map_err(invalid)?;
        let rooted_target = Regex::new(RF_ROOTED_TARGET_PATTERN).map_err(invalid)?;

        Ok(Self {
            config: config.clone(),
            recursive_force,
            rooted_target,
        })
    }

    /// Whether the command text is a dangerous removal.
    pub fn is_dangerous(&self, command: &str) -> bool {
        let normalized = normalize_whitespace(command);

        let recursive_force = self
            .recursive_force
            .iter()
            .any(|pattern| pattern.is_match(&normalized));
        if recursive_force
            && DANGEROUS_PATH_TOKENS
                .iter()
                .any(|token| normalized.contains(token))
        {
            return true;
        }

        self.rooted_target.is_match(&normalized)
    }
}

impl Rule for DestructiveDeleteRule {
    fn kind(&self) -> RuleKind {
        RuleKind::DestructiveDelete
    }

    fn check(&self, record: &InvocationRecord) -> Option<RuleViolation> {
        if !self.config.is_shell_tool(record.tool()) {
            return None;
        }
        let command = record.command();
        self.is_dangerous(command)
            .then(|| RuleViolation::dangerous_rm(command))
    }
}

/// Collapse whitespace runs to single spaces and trim the ends.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bash(command: &str) -> InvocationRecord {
        InvocationRecord::from_value(json!({"tool": "Bash", "command": command})).unwrap()
    }

    fn file_tool(tool: &str, path: &str) -> InvocationRecord {
        InvocationRecord::from_value(json!({"tool": tool, "file_path": path})).unwrap()
    }

    fn sensitive() -> SensitiveFileRule {
        SensitiveFileRule::new(&GuardConfig::default()).unwrap()
    }

    fn destructive() -> DestructiveDeleteRule {
        DestructiveDeleteRule::new(&GuardConfig::default()).unwrap()
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  rm \t -rf\n  /  "), "rm -rf /");
    }

    // =========================================================================
    // Sensitive file rule
    // =========================================================================

    #[test]
    fn test_file_tools_block_env_path() {
        let rule = sensitive();
        for tool in ["Read", "Edit", "MultiEdit", "Write"] {
            assert!(rule.check(&file_tool(tool, ".env")).is_some(), "{tool}");
            assert!(rule.check(&file_tool(tool, "/app/config/.env.local")).is_some(), "{tool}");
        }
    }

    #[test]
    fn test_file_tools_allow_templates() {
        let rule = sensitive();
        assert!(rule.check(&file_tool("Edit", ".env.sample")).is_none());
        assert!(rule.check(&file_tool("Write", "app/.env.example")).is_none());
        assert!(rule.check(&file_tool("Edit", "src/main.rs")).is_none());
    }

    #[test]
    fn test_other_tools_ignored() {
        let rule = sensitive();
        assert!(rule.check(&file_tool("Glob", ".env")).is_none());
        assert!(rule.check(&file_tool("", ".env")).is_none());
    }

    #[test]
    fn test_camel_case_file_path_key() {
        let record =
            InvocationRecord::from_value(json!({"tool": "Edit", "filePath": ".env"})).unwrap();
        assert!(sensitive().check(&record).is_some());
    }

    #[test]
    fn test_shell_direct_access_blocked() {
        let rule = sensitive();
        for command in [
            "cat .env",
            "cat   .env.production",
            "echo SECRET=1 > .env",
            "echo x >.env",
            "touch .env",
            "cp .env /tmp/leak",
            "cp backup .env",
            "mv .env old.env",
        ] {
            assert!(rule.check(&bash(command)).is_some(), "{command}");
        }
    }

    #[test]
    fn test_shell_mentions_without_access_allowed() {
        let rule = sensitive();
        for command in [
            "echo hello",
            "grep -r API_KEY .env",
            "ls -la .env",
            "cat .env.sample",
            "cp .env.example .env",
            "cat README.md",
        ] {
            assert!(rule.check(&bash(command)).is_none(), "{command}");
        }
    }

    #[test]
    fn test_shell_file_path_decides_alone() {
        let record = InvocationRecord::from_value(json!({
            "tool": "Bash",
            "command": "cat .env",
            "file_path": ".env.sample"
        }))
        .unwrap();
        assert!(sensitive().check(&record).is_none());

        let record = InvocationRecord::from_value(json!({
            "tool": "Bash",
            "command": "echo hi",
            "file_path": ".env"
        }))
        .unwrap();
        assert!(sensitive().check(&record).is_some());
    }

    #[test]
    fn test_substring_heuristic_limits() {
        let rule = sensitive();
        assert!(rule.check(&file_tool("Edit", "myenv.config")).is_none());
        assert!(rule.check(&file_tool("Edit", "frontend.env.deploy.sh")).is_some());
    }

    #[test]
    fn test_custom_marker() {
        let config = GuardConfig {
            sensitive_marker: ".secrets".to_string(),
            safe_templates: vec![".secrets.template".to_string()],
            ..Default::default()
        };
        let rule = SensitiveFileRule::new(&config).unwrap();
        assert!(rule.check(&bash("cat .secrets")).is_some());
        assert!(rule.check(&bash("cat .secrets.template")).is_none());
        assert!(rule.check(&bash("cat .env")).is_none());

        let violation = rule.check(&file_tool("Read", ".secrets")).unwrap();
        assert_eq!(violation.details, vec!["Use .secrets.template for templates."]);
    }

    #[test]
    fn test_empty_marker_rejected() {
        let config = GuardConfig {
            sensitive_marker: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            SensitiveFileRule::new(&config),
            Err(PolicyError::EmptyMarker)
        ));
    }

    // =========================================================================
    // Destructive delete rule
    // =========================================================================

    #[test]
    fn test_dangerous_targets_blocked() {
        let rule = destructive();
        for command in [
            "rm -rf /",
            "rm -rf /*",
            "rm -rf ~",
            "rm -rf $HOME",
            "rm -rf ..",
            "rm -rf *",
            "rm -rf .",
            "rm -fr ~/projects",
            "rm -Rf /var",
            "rm   -rf    /",
            "rm --recursive --force /tmp",
            "rm --force --recursive ~",
            "sudo rm -rfv /opt",
            "cd /tmp && rm -rf build",
        ] {
            assert!(rule.is_dangerous(command), "{command}");
        }
    }

    #[test]
    fn test_ordinary_targets_allowed() {
        let rule = destructive();
        for command in [
            "rm -rf build",
            "rm -rf node_modules target",
            "rm -r tmp",
            "rm -f notes",
            "rm file",
            "ls -la /",
            "echo hello",
            "npm run farm -rf",
        ] {
            assert!(!rule.is_dangerous(command), "{command}");
        }
    }

    #[test]
    fn test_co_occurrence_over_blocks() {
        // The trailing slash alone counts as a dangerous path token.
        assert!(destructive().is_dangerous("rm -rf build/"));
        // No listed token anywhere: passes despite being a real deletion.
        assert!(!destructive().is_dangerous("rm -rf important_data"));
    }

    #[test]
    fn test_only_shell_tool_checked() {
        let rule = destructive();
        let record =
            InvocationRecord::from_value(json!({"tool": "Write", "command": "rm -rf /"})).unwrap();
        assert!(rule.check(&record).is_none());

        let violation = rule.check(&bash("rm  -rf   /")).unwrap();
        assert_eq!(violation.kind, RuleKind::DestructiveDelete);
        assert_eq!(violation.details[0], "Command: rm  -rf   /");
    }
}
