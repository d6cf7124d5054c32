use crate::common::config::Config;
use crate::common::exit_code::codes;
use crate::common::paths::resolve_base_dir;
use crate::dispatch::{Action, ComposeOrchestrator, DispatchReport, Dispatcher};
use crate::error::StackctlError;
use crate::logging;
use clap::error::ErrorKind;
use clap::Parser;
use colored::*;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const PROGRAM: &str = "stackctl";

#[derive(Debug, Parser)]
#[command(name = "stackctl", version)]
#[command(about = "Start, stop, restart or update the compose stack installed next to this binary", long_about = None)]
pub struct Cli {
    /// Lifecycle command: start (alias: run), stop, restart or update
    pub command: Option<String>,

    /// Ignored trailing arguments
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,

    /// Directory holding the compose file (defaults to the binary's directory)
    #[arg(long, env = "STACKCTL_BASE_DIR", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Configuration file (defaults to <base dir>/stackctl.toml, then the user config)
    #[arg(short, long, env = "STACKCTL_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the orchestrator calls without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse `args`, dispatch, and return the process exit code
pub async fn run_cli<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => return parse_failure(e),
    };

    logging::init(cli.verbose);

    match execute(cli).await {
        Ok(code) => code,
        Err(e) => {
            if let StackctlError::UnknownCommand(token) = &e {
                eprintln!("{} Unknown command '{}'", "✗".red(), token);
            } else if !e.is_usage() {
                eprintln!("{} {}", "✗".red(), e);
            }
            if e.is_usage() {
                eprintln!("{}", Action::usage(PROGRAM));
            }
            e.exit_code()
        }
    }
}

fn parse_failure(e: clap::Error) -> i32 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = e.print();
            codes::SUCCESS
        }
        kind => {
            eprintln!("{} {}", "✗".red(), kind);
            eprintln!("{}", Action::usage(PROGRAM));
            codes::USAGE
        }
    }
}

async fn execute(cli: Cli) -> Result<i32, StackctlError> {
    // The base directory must resolve before anything is dispatched
    let base_dir = resolve_base_dir(cli.base_dir.as_deref())?;
    debug!("Base directory: {:?}", base_dir);

    let action: Action = cli
        .command
        .as_deref()
        .ok_or(StackctlError::MissingCommand)?
        .parse()?;

    if !cli.extra.is_empty() {
        warn!("Ignoring extra arguments: {:?}", cli.extra);
    }

    let config = Config::load(cli.config.as_deref(), &base_dir)?;
    let orchestrator = ComposeOrchestrator::new(&config.compose, &base_dir);
    let dispatcher = Dispatcher::new(orchestrator, config.dispatch.on_failure);

    if cli.dry_run {
        println!("Would run in {}:", base_dir.display());
        for line in dispatcher.plan(action) {
            println!("  {}", line);
        }
        return Ok(codes::SUCCESS);
    }

    let report = dispatcher.dispatch(action).await?;
    print_report(&report);
    Ok(report.exit_code())
}

fn print_report(report: &DispatchReport) {
    match report.first_failure() {
        None => println!("{} {} completed", "✓".green(), report.action),
        Some((step, code)) => {
            let code = code
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            eprintln!(
                "{} {}: '{}' failed (exit code: {})",
                "✗".red(),
                report.action,
                step,
                code
            );
            if report.exit_code() == codes::SUCCESS {
                eprintln!("  {}", "later steps succeeded, exiting with 0".dimmed());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_command_is_usage_error() {
        assert_eq!(run_cli(["stackctl"]).await, 1);
    }

    #[tokio::test]
    async fn test_unknown_command_is_usage_error() {
        assert_eq!(run_cli(["stackctl", "status"]).await, 1);
        assert_eq!(run_cli(["stackctl", "--bogus"]).await, 1);
    }

    #[tokio::test]
    async fn test_help_and_version_succeed() {
        assert_eq!(run_cli(["stackctl", "--help"]).await, 0);
        assert_eq!(run_cli(["stackctl", "--version"]).await, 0);
    }

    #[tokio::test]
    async fn test_bad_base_dir_wins_over_usage() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let missing = missing.to_string_lossy().into_owned();
        assert_eq!(
            run_cli(["stackctl", "--base-dir", missing.as_str(), "status"]).await,
            1
        );
    }

    #[test]
    fn test_flag_like_extras_are_collected() {
        let cli = Cli::try_parse_from(["stackctl", "start", "-x", "--force"]).unwrap();
        assert_eq!(cli.command.as_deref(), Some("start"));
        assert_eq!(cli.extra, vec!["-x", "--force"]);
    }

    #[tokio::test]
    async fn test_dry_run_runs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("stackctl.toml"),
            "[compose]\nprogram = \"stackctl-no-such-orchestrator\"\n",
        )
        .unwrap();
        let base = dir.path().to_string_lossy().into_owned();
        assert_eq!(
            run_cli(["stackctl", "--base-dir", base.as_str(), "--dry-run", "update"]).await,
            0
        );
    }
}
