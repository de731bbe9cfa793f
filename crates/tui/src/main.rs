//! Entry point for the GanttFlow TUI application.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;

use ganttflow_core::{LayoutConfig, ViewMode, parse_date_arg};
use ganttflow_tui::{App, TuiResult, load_tasks};

/// Browse a JSON task list as a Gantt chart in the terminal
#[derive(Parser)]
#[command(name = "gantt-tui")]
#[command(version = "0.1.0")]
#[command(about = "Terminal Gantt timeline for a JSON task list", long_about = None)]
struct Args {
    /// JSON task list to display
    file: PathBuf,

    /// Initial view mode (day, week or month)
    #[arg(short, long, default_value = "day")]
    view: ViewMode,

    /// Layout config file in terminal cells (defaults to the terminal preset)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Date to treat as today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> TuiResult<()> {
    let args = Args::parse();

    // Shared config files are in pixels; only an explicit file applies here
    let config = match &args.config {
        Some(path) => LayoutConfig::load(path)?,
        None => LayoutConfig::terminal(),
    };
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let tasks = load_tasks(&args.file).await?;

    let mut app = App::new(tasks, config, args.view, today);
    app.run().await
}
