//! `warden show` command implementation.
//!
//! Prints the recorded invocations for one session and stage.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use warden_audit::{AuditLogHandle, AuditRecorder};
use warden_core::{Stage, WardenConfig};

use super::{load_config, resolve_log_dir, working_dir};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Session id whose log to print
    #[arg(long)]
    pub session: String,

    /// Which stage's log to print
    #[arg(long, default_value = "pre")]
    pub stage: Stage,

    /// Directory holding the audit logs (overrides audit.directory)
    #[arg(long = "log-dir")]
    pub log_dir: Option<PathBuf>,

    /// Configuration file (default: .claude/warden.yaml when present)
    #[arg(long, env = "WARDEN_CONFIG")]
    pub config: Option<PathBuf>,
}

pub fn run(args: &ShowArgs, out: &mut impl Write) -> Result<()> {
    let base = working_dir();
    let config =
        load_config(args.config.as_deref(), &base).context("Failed to load configuration")?;
    show(args, &config, &base, out)
}

fn show(args: &ShowArgs, config: &WardenConfig, base: &Path, out: &mut impl Write) -> Result<()> {
    let log_dir = resolve_log_dir(args.log_dir.as_deref(), config, base);
    let handle = AuditLogHandle::new(log_dir, &args.session, args.stage);

    let records = AuditRecorder::new(&config.audit)
        .read(&handle)
        .with_context(|| format!("Failed to read audit log for session '{}'", args.session))?;

    writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
    Ok(())
}
