//! `warden check` command implementation.
//!
//! Evaluates a synthetic invocation against the guard without recording it.
//! Useful for trying out rules and config files:
//!
//! ```text
//! $ warden check --tool Bash --command 'rm -rf ~'
//! BLOCK [destructive_delete]: Dangerous rm command blocked.
//!   Command: rm -rf ~
//!   This could delete important system files.
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Map, Value};
use warden_core::InvocationRecord;
use warden_policy::{Decision, Guard};

use super::{load_config, working_dir};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Tool name, e.g. Bash, Read, Edit
    #[arg(long)]
    pub tool: String,

    /// Shell command text (for shell tools)
    #[arg(long)]
    pub command: Option<String>,

    /// Target file path (for file tools)
    #[arg(long = "file-path")]
    pub file_path: Option<String>,

    /// Print the decision as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Configuration file (default: .claude/warden.yaml when present)
    #[arg(long, env = "WARDEN_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CheckArgs {
    fn record(&self) -> InvocationRecord {
        let mut parameters = Map::new();
        if let Some(command) = &self.command {
            parameters.insert("command".to_string(), Value::String(command.clone()));
        }
        if let Some(file_path) = &self.file_path {
            parameters.insert("file_path".to_string(), Value::String(file_path.clone()));
        }
        InvocationRecord::new("check", self.tool.clone(), parameters)
    }
}

/// Evaluate and print the decision. Returns the hook exit status it maps to.
pub fn run(args: &CheckArgs, out: &mut impl Write) -> Result<u8> {
    let base = working_dir();
    let config =
        load_config(args.config.as_deref(), &base).context("Failed to load configuration")?;
    let guard = Guard::from_config(&config.guard).context("Failed to build guard rules")?;

    let decision = guard.evaluate(&args.record());
    print_decision(&decision, args.json, out)?;

    Ok(if decision.is_allow() {
        0
    } else {
        super::hook::BLOCK_EXIT_CODE
    })
}

fn print_decision(decision: &Decision, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(decision)?)?;
        return Ok(());
    }

    match decision {
        Decision::Allow => writeln!(out, "ALLOW")?,
        Decision::Block(violation) => {
            writeln!(out, "BLOCK [{}]: {}", violation.kind, violation.message)?;
            for detail in &violation.details {
                writeln!(out, "  {detail}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use warden_core::GuardConfig;

    fn args(tool: &str, command: Option<&str>, file_path: Option<&str>) -> CheckArgs {
        CheckArgs {
            tool: tool.to_string(),
            command: command.map(String::from),
            file_path: file_path.map(String::from),
            json: false,
            config: None,
        }
    }

    fn render(args: &CheckArgs, json: bool) -> String {
        let guard = Guard::from_config(&GuardConfig::default()).unwrap();
        let decision = guard.evaluate(&args.record());
        let mut out = Vec::new();
        print_decision(&decision, json, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_record_shape() {
        let record = args("Edit", None, Some(".env")).record();
        assert_eq!(record.session_id(), "check");
        assert_eq!(record.tool(), "Edit");
        assert_eq!(record.file_path(), ".env");
        assert_eq!(record.command(), "");
    }

    #[test]
    fn test_allow_output() {
        assert_eq!(render(&args("Bash", Some("ls -la"), None), false), "ALLOW\n");
    }

    #[test]
    fn test_block_output() {
        assert_eq!(
            render(&args("Bash", Some("rm -rf ~"), None), false),
            "BLOCK [destructive_delete]: Dangerous rm command blocked.\n  \
             Command: rm -rf ~\n  \
             This could delete important system files.\n"
        );
    }

    #[test]
    fn test_json_output() {
        let out = render(&args("Write", None, Some("config/.env")), true);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["decision"], "block");
        assert_eq!(value["kind"], "sensitive_file");
    }
}
