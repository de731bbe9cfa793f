//! CLI commands for GanttFlow
//!
//! This module contains all subcommand implementations for the gantt CLI.
//! Every command reads a JSON task list, runs it through the layout engine
//! and renders the result as text or JSON.

pub mod bars;
pub mod frame;
pub mod headers;
pub mod layout;
pub mod range;

pub use bars::BarsCommand;
pub use frame::FrameCommand;
pub use headers::HeadersCommand;
pub use layout::LayoutCommand;
pub use range::RangeCommand;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use ganttflow_core::{
    DueWindow, LayoutConfig, Priority, SortBy, SortOrder, Status, Task, TaskFilter, TaskSort,
    ViewMode, parse_date_arg,
};
use std::path::PathBuf;
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::input::{load_tasks, parse_priority, parse_status};

/// Settings shared by every command invocation
#[derive(Debug, Clone)]
pub struct Context {
    pub config: LayoutConfig,
    /// The date treated as today for range fallback and the today marker
    pub today: NaiveDate,
}

impl Context {
    pub fn new(config: LayoutConfig, today: NaiveDate) -> Self {
        Self { config, today }
    }
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the padded calendar range for a task list
    Range(RangeCommand),
    /// Print month and week/day header cells
    Headers(HeadersCommand),
    /// Print positioned task bars
    Bars(BarsCommand),
    /// Print what a viewport at a scroll position would mount
    Frame(FrameCommand),
    /// Print the full layout as JSON
    Layout(LayoutCommand),
}

impl Command {
    /// Execute the command and return its rendered output.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the task file cannot be read or parsed, or if
    /// an argument is out of range.
    pub fn execute(&self, ctx: &Context) -> CliResult<String> {
        match self {
            Command::Range(cmd) => cmd.execute(ctx),
            Command::Headers(cmd) => cmd.execute(ctx),
            Command::Bars(cmd) => cmd.execute(ctx),
            Command::Frame(cmd) => cmd.execute(ctx),
            Command::Layout(cmd) => cmd.execute(ctx),
        }
    }
}

fn parse_due(s: &str) -> Result<DueWindow, String> {
    DueWindow::parse(s)
        .ok_or_else(|| format!("invalid due window '{}'. Valid values: overdue, today, week", s))
}

fn parse_sort(s: &str) -> Result<SortBy, String> {
    SortBy::parse(s)
        .ok_or_else(|| format!("invalid sort key '{}'. Valid values: created_at, due_date, title", s))
}

/// Task file, view mode and the filter/sort flags shared by the commands
#[derive(Debug, Clone, Args)]
pub struct TaskArgs {
    /// JSON file holding the task list
    pub file: PathBuf,

    /// Timeline scale
    #[arg(short, long, default_value = "day")]
    pub view: ViewMode,

    /// Filter by status (can be specified multiple times)
    #[arg(short, long = "status", value_parser = parse_status)]
    pub statuses: Vec<Status>,

    /// Filter by priority (can be specified multiple times)
    #[arg(short, long = "priority", value_parser = parse_priority)]
    pub priorities: Vec<Priority>,

    /// Only tasks assigned to this user id
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Only tasks due in a window: overdue, today or week
    #[arg(long, value_parser = parse_due)]
    pub due: Option<DueWindow>,

    /// Only tasks starting on or after this date (YYYY-MM-DD)
    #[arg(long = "from", value_parser = parse_date_arg)]
    pub start_from: Option<NaiveDate>,

    /// Only tasks starting on or before this date (YYYY-MM-DD)
    #[arg(long = "until", value_parser = parse_date_arg)]
    pub start_until: Option<NaiveDate>,

    /// Hide completed tasks
    #[arg(long)]
    pub hide_completed: bool,

    /// Sort rows by created_at, due_date or title
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortBy>,

    /// Sort in descending order
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

impl TaskArgs {
    /// Arguments for `file` with no filtering or sorting.
    pub fn for_file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            view: ViewMode::Day,
            statuses: vec![],
            priorities: vec![],
            assignee: None,
            due: None,
            start_from: None,
            start_until: None,
            hide_completed: false,
            sort: None,
            desc: false,
        }
    }

    /// Build a TaskFilter from the command options.
    pub fn build_filter(&self) -> TaskFilter {
        let mut filter = TaskFilter::new()
            .with_statuses(self.statuses.iter().copied())
            .with_priorities(self.priorities.iter().copied());

        if let Some(ref user) = self.assignee {
            filter = filter.assigned_to(user);
        }
        if let Some(window) = self.due {
            filter = filter.due_within(window);
        }
        if self.start_from.is_some() || self.start_until.is_some() {
            filter = filter.starting_between(self.start_from, self.start_until);
        }
        if self.hide_completed {
            filter = filter.hide_completed();
        }
        filter
    }

    /// The requested row order, if any.
    pub fn build_sort(&self) -> Option<TaskSort> {
        let order = if self.desc {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        self.sort.map(|by| TaskSort::new(by, order))
    }

    /// Load the task file, then filter and sort it.
    pub fn load(&self, ctx: &Context) -> CliResult<Vec<Task>> {
        if let (Some(from), Some(until)) = (self.start_from, self.start_until)
            && from > until
        {
            return Err(CliError::InvalidArgument {
                message: format!("--from {} is after --until {}", from, until),
            });
        }
        let all = load_tasks(&self.file)?;
        let filter = self.build_filter();
        let mut tasks = if filter.is_empty() {
            all
        } else {
            let kept = filter.apply(&all, ctx.today);
            debug!("Filter kept {} of {} tasks", kept.len(), all.len());
            kept
        };

        if let Some(sort) = self.build_sort() {
            sort.sort(&mut tasks);
        }
        Ok(tasks)
    }
}
