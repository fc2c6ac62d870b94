use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;
use warden_core::Stage;

mod commands;

use commands::check::CheckArgs;
use commands::hook::HookArgs;
use commands::show::ShowArgs;

/// Environment variable holding the log filter, e.g. `WARDEN_LOG=debug`.
const LOG_ENV: &str = "WARDEN_LOG";

#[derive(Parser, Debug)]
#[command(name = "warden", version, about = "Guard and audit hooks for agent tool calls")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pre-tool-use hook: record the invocation from stdin, exit 2 to block it.
    Pre(HookArgs),

    /// Post-tool-use hook: record the completed invocation from stdin.
    Post(HookArgs),

    /// Evaluate a tool call against the guard rules without recording it.
    Check(CheckArgs),

    /// Print the recorded invocations of a session.
    Show(ShowArgs),
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Exit 2 means "block" to the agent; usage errors must not.
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match cli.cmd {
        Command::Pre(args) => commands::hook::run(Stage::Pre, &args),
        Command::Post(args) => commands::hook::run(Stage::Post, &args),
        Command::Check(args) => match commands::check::run(&args, &mut io::stdout().lock()) {
            Ok(status) => ExitCode::from(status),
            Err(e) => fail(e),
        },
        Command::Show(args) => match commands::show::run(&args, &mut io::stdout().lock()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => fail(e),
        },
    }
}

fn fail(e: anyhow::Error) -> ExitCode {
    eprintln!("Error: {e:#}");
    ExitCode::FAILURE
}

/// Diagnostics go to stderr; stdout is reserved for command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
