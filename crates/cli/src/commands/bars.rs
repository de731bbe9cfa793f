//! Bars command
//!
//! Implements `gantt bars` to print every task's bar geometry.

use clap::Args;
use ganttflow_core::compute_layout;

use super::{Context, TaskArgs};
use crate::error::CliResult;
use crate::output::format_bar_table;

/// Print positioned task bars
#[derive(Debug, Args)]
pub struct BarsCommand {
    #[command(flatten)]
    pub tasks: TaskArgs,
}

impl BarsCommand {
    pub fn execute(&self, ctx: &Context) -> CliResult<String> {
        let tasks = self.tasks.load(ctx)?;
        let layout = compute_layout(&tasks, self.tasks.view, &ctx.config, ctx.today);
        Ok(format_bar_table(&tasks, &layout.bars))
    }
}
