use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ganttflow_cli::commands::{Command, Context};
use ganttflow_cli::{CliError, CliResult};
use ganttflow_core::{LayoutConfig, parse_date_arg};

/// GanttFlow - Gantt timeline layout from the command line
#[derive(Parser)]
#[command(name = "gantt")]
#[command(version = "0.1.0")]
#[command(about = "Compute Gantt timeline layouts for a JSON task list", long_about = None)]
struct Args {
    /// Path to a layout config file (can also be set via GANTTFLOW_CONFIG env var)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Date to treat as today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Command,
}

/// Initialize logging from the RUST_LOG environment variable
///
/// Examples:
/// - `RUST_LOG=debug` - show layout and cache decisions
/// - `RUST_LOG=ganttflow_core=trace` - show everything from the engine
///
/// Defaults to `warn`. Logs go to stderr so command output stays parseable.
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

/// Resolve the layout configuration.
///
/// Priority:
/// 1. Command line --config argument
/// 2. GANTTFLOW_CONFIG environment variable (if non-empty)
/// 3. `<config_dir>/ganttflow/config.json`, if present
/// 4. Built-in defaults
fn resolve_config(cli_config: Option<PathBuf>) -> CliResult<LayoutConfig> {
    Ok(LayoutConfig::load_or(cli_config, LayoutConfig::default())?)
}

fn main() {
    init_logging();

    if let Err(e) = run_app() {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}

/// Main application logic - separated for testability
fn run_app() -> Result<(), CliError> {
    let args = Args::parse();
    let output = run_with_args(&args)?;
    println!("{}", output);
    Ok(())
}

/// Run the application with the given arguments
fn run_with_args(args: &Args) -> CliResult<String> {
    let config = resolve_config(args.config.clone())?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    debug!("Running with today = {}", today);

    let ctx = Context::new(config, today);
    args.command.execute(&ctx)
}
