//! Headers command
//!
//! Implements `gantt headers` to print the month row and the week or day
//! row of the timeline header.

use clap::Args;
use ganttflow_core::compute_layout;

use super::{Context, TaskArgs};
use crate::error::CliResult;
use crate::output::format_headers;

/// Print header cells for the chosen view
#[derive(Debug, Args)]
pub struct HeadersCommand {
    #[command(flatten)]
    pub tasks: TaskArgs,
}

impl HeadersCommand {
    pub fn execute(&self, ctx: &Context) -> CliResult<String> {
        let tasks = self.tasks.load(ctx)?;
        let layout = compute_layout(&tasks, self.tasks.view, &ctx.config, ctx.today);
        Ok(format_headers(&layout))
    }
}
