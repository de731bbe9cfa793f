//! Range command
//!
//! Implements `gantt range` to print the padded calendar window.

use clap::Args;
use ganttflow_core::compute_range;

use super::{Context, TaskArgs};
use crate::error::CliResult;
use crate::output::format_range;

/// Print the calendar range derived from a task list
#[derive(Debug, Args)]
pub struct RangeCommand {
    #[command(flatten)]
    pub tasks: TaskArgs,
}

impl RangeCommand {
    pub fn execute(&self, ctx: &Context) -> CliResult<String> {
        let tasks = self.tasks.load(ctx)?;
        let range = compute_range(&tasks, ctx.today);
        Ok(format_range(&range))
    }
}
