//! Layout command
//!
//! Implements `gantt layout` to dump the complete layout as JSON.

use clap::Args;
use ganttflow_core::compute_layout;

use super::{Context, TaskArgs};
use crate::error::{CliError, CliResult};

/// Print the full layout as JSON
#[derive(Debug, Args)]
pub struct LayoutCommand {
    #[command(flatten)]
    pub tasks: TaskArgs,

    /// Emit compact JSON on a single line
    #[arg(long)]
    pub compact: bool,
}

impl LayoutCommand {
    pub fn execute(&self, ctx: &Context) -> CliResult<String> {
        let tasks = self.tasks.load(ctx)?;
        let layout = compute_layout(&tasks, self.tasks.view, &ctx.config, ctx.today);
        let json = if self.compact {
            serde_json::to_string(&layout)
        } else {
            serde_json::to_string_pretty(&layout)
        };
        json.map_err(CliError::Serialize)
    }
}
