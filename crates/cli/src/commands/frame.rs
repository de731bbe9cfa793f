//! Frame command
//!
//! Implements `gantt frame` to show what a viewport at a given scroll
//! position mounts: the visible column and row slices, the header cells
//! overlapping them and the bars that survive culling.

use clap::Args;
use ganttflow_core::{ColumnVirtualizer, TimelineFrame, Viewport, compute_layout, scroll_edge};
use tracing::debug;

use super::{Context, TaskArgs};
use crate::error::{CliError, CliResult};
use crate::output::format_frame;

/// Print the culled contents of one viewport
#[derive(Debug, Args)]
pub struct FrameCommand {
    #[command(flatten)]
    pub tasks: TaskArgs,

    /// Horizontal scroll offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub scroll_left: i64,

    /// Viewport width in pixels
    #[arg(long)]
    pub width: i64,

    /// Vertical scroll offset in pixels
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pub scroll_top: i64,

    /// Viewport height in pixels (defaults to every row)
    #[arg(long)]
    pub height: Option<i64>,

    /// Emit the frame as JSON
    #[arg(long)]
    pub json: bool,
}

impl FrameCommand {
    pub fn execute(&self, ctx: &Context) -> CliResult<String> {
        if self.width <= 0 {
            return Err(CliError::InvalidArgument {
                message: format!("--width must be positive, got {}", self.width),
            });
        }
        if let Some(height) = self.height
            && height < 0
        {
            return Err(CliError::InvalidArgument {
                message: format!("--height must not be negative, got {}", height),
            });
        }

        let tasks = self.tasks.load(ctx)?;
        let layout = compute_layout(&tasks, self.tasks.view, &ctx.config, ctx.today);

        let height = self.height.unwrap_or(layout.total_height);
        let mut viewport =
            Viewport::new(self.width, height).with_scroll(self.scroll_left, self.scroll_top);
        viewport.clamp_to(layout.total_width(), layout.total_height);
        if viewport.scroll_left != self.scroll_left || viewport.scroll_top != self.scroll_top {
            debug!(
                "Clamped scroll position ({}, {}) to ({}, {})",
                self.scroll_left, self.scroll_top, viewport.scroll_left, viewport.scroll_top
            );
        }

        let virtualizer = ColumnVirtualizer::new(ctx.config.overscan);
        let frame = TimelineFrame::compose(&layout, viewport, &virtualizer);

        if self.json {
            return serde_json::to_string_pretty(&frame).map_err(CliError::Serialize);
        }

        let edge = scroll_edge(
            viewport.scroll_left,
            layout.total_width(),
            viewport.width,
            i64::from(ctx.config.edge_threshold),
        );
        Ok(format_frame(&frame, &tasks, edge))
    }
}
