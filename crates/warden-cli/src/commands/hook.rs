//! `warden pre` and `warden post` hook stages.
//!
//! Both stages read one JSON invocation record from stdin and append it to
//! the session's audit log. The pre stage then runs the guard and exits 2
//! when a rule fires; the post stage always exits 0.
//!
//! Nothing here may turn an internal failure into a block. Malformed input
//! and audit write errors end in exit 0. An unusable config falls back to
//! the default rules.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Args;
use warden_audit::{AuditLogHandle, AuditRecorder};
use warden_core::{GuardConfig, InvocationRecord, Stage, WardenConfig};
use warden_policy::{Guard, Verdict};

use super::{load_config, resolve_log_dir, working_dir};

/// Exit status telling the agent to abort the tool call.
pub const BLOCK_EXIT_CODE: u8 = 2;

/// Marker prefixed to the first line of a block reason.
const BLOCK_MARKER: &str = "❌ Error:";

/// Arguments shared by both hook stages.
#[derive(Args, Debug, Default)]
pub struct HookArgs {
    /// Configuration file (default: .claude/warden.yaml when present)
    #[arg(long, env = "WARDEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for the audit logs (overrides audit.directory)
    #[arg(long = "log-dir")]
    pub log_dir: Option<PathBuf>,
}

/// Everything a stage needs, resolved once per process.
pub struct HookContext {
    guard: Option<Guard>,
    recorder: AuditRecorder,
    log_dir: PathBuf,
}

impl HookContext {
    /// Resolve configuration, guard and logs directory.
    ///
    /// Failures are logged and replaced by defaults; a guard that cannot be
    /// built leaves the stage without rules.
    pub fn load(args: &HookArgs, base: &Path) -> Self {
        let config = load_config(args.config.as_deref(), base).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unusable configuration, using defaults");
            WardenConfig::default()
        });
        Self::from_config(&config, args.log_dir.as_deref(), base)
    }

    pub fn from_config(config: &WardenConfig, log_dir: Option<&Path>, base: &Path) -> Self {
        let guard = Guard::from_config(&config.guard)
            .or_else(|e| {
                tracing::warn!(error = %e, "Ignoring unusable guard configuration, using defaults");
                Guard::from_config(&GuardConfig::default())
            })
            .map_err(|e| tracing::warn!(error = %e, "Guard rules unavailable, allowing all calls"))
            .ok();
        Self {
            guard,
            recorder: AuditRecorder::new(&config.audit),
            log_dir: resolve_log_dir(log_dir, config, base),
        }
    }

    fn handle(&self, record: &InvocationRecord, stage: Stage) -> AuditLogHandle {
        AuditLogHandle::new(&self.log_dir, record.session_id(), stage)
    }
}

/// Pre stage: record, then evaluate.
pub fn pre_tool_use(ctx: &HookContext, input: &str) -> Verdict {
    let Some(record) = parse(input) else {
        return Verdict::Undecidable;
    };

    ctx.recorder.append(&ctx.handle(&record, Stage::Pre), &record);

    match &ctx.guard {
        Some(guard) => guard.evaluate(&record).into(),
        None => Verdict::Undecidable,
    }
}

/// Post stage: record only.
pub fn post_tool_use(ctx: &HookContext, input: &str) {
    if let Some(record) = parse(input) {
        ctx.recorder.append(&ctx.handle(&record, Stage::Post), &record);
    }
}

fn parse(input: &str) -> Option<InvocationRecord> {
    InvocationRecord::from_json(input)
        .map_err(|e| tracing::debug!(error = %e, "Skipping malformed hook input"))
        .ok()
}

/// Write the block reason for a verdict, if any.
pub fn report(verdict: &Verdict, out: &mut impl Write) -> io::Result<()> {
    let Some(violation) = verdict.violation() else {
        return Ok(());
    };
    let mut lines = violation.lines();
    if let Some(headline) = lines.next() {
        writeln!(out, "{BLOCK_MARKER} {headline}")?;
    }
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Process exit status for a verdict: 0 to proceed, 2 to block.
pub fn exit_status(verdict: &Verdict) -> u8 {
    if verdict.permits() { 0 } else { BLOCK_EXIT_CODE }
}

/// Run a hook stage against stdin.
pub fn run(stage: Stage, args: &HookArgs) -> ExitCode {
    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        tracing::debug!(error = %e, "Cannot read hook input");
        return ExitCode::SUCCESS;
    }

    let base = working_dir();
    let ctx = HookContext::load(args, &base);

    match stage {
        Stage::Pre => {
            let verdict = pre_tool_use(&ctx, &input);
            if let Err(e) = report(&verdict, &mut io::stderr().lock()) {
                tracing::warn!(error = %e, "Failed to write block reason");
            }
            ExitCode::from(exit_status(&verdict))
        }
        Stage::Post => {
            post_tool_use(&ctx, &input);
            ExitCode::SUCCESS
        }
    }
}
