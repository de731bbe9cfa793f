//! UI rendering for the TUI.
//!
//! Provides layout and widget rendering using ratatui.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use ganttflow_core::TimelineFrame;

use crate::app::App;
use crate::task_list::render_task_list;
use crate::timeline::{HEADER_ROWS, TimelineContext, render_timeline_view};

/// Legend text for keyboard shortcuts.
const LEGEND: &str = " [j/k] Select  [h/l] Scroll  [H/L] Page  [Tab] View  [t] Today  [q] Quit ";

/// Draw the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = create_main_layout(frame.area());
    // Too short for the panels; the legend alone is drawn
    let [list, timeline, legend] = chunks[..] else {
        if let Some(&legend) = chunks.last() {
            draw_legend(frame, legend);
        }
        return;
    };

    render_task_list(frame, list, app.tasks(), app.selected(), app.first_row());
    draw_timeline(frame, timeline, app);
    draw_legend(frame, legend);
}

/// Create the main three-part layout: task list, timeline, legend.
fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Task list + timeline
            Constraint::Length(1), // Legend bar
        ])
        .split(area)
        .iter()
        .flat_map(|&chunk| {
            if chunk.height > 1 {
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Percentage(25), // Task list
                        Constraint::Percentage(75), // Timeline
                    ])
                    .split(chunk)
                    .to_vec()
            } else {
                vec![chunk]
            }
        })
        .collect()
}

/// Size of the timeline's scrollable area for a terminal of `area`.
///
/// Excludes the panel borders and the header rows.
pub fn timeline_viewport_size(area: Rect) -> (i64, i64) {
    let chunks = create_main_layout(area);
    let [_, timeline, _] = chunks[..] else {
        return (0, 0);
    };
    let width = timeline.width.saturating_sub(2);
    let height = timeline.height.saturating_sub(2 + HEADER_ROWS);
    (i64::from(width), i64::from(height))
}

/// Draw the timeline panel from the app's current layout.
fn draw_timeline(frame: &mut Frame, area: Rect, app: &App) {
    let Some(layout) = app.layout() else {
        return;
    };

    let view = TimelineFrame::compose(layout, app.viewport(), app.virtualizer());
    let ctx = TimelineContext {
        tasks: app.tasks(),
        groups: app.groups(),
        selected: app.selected(),
        view_mode: app.view_mode(),
        row_height: layout.row_height,
        is_focused: true,
    };
    render_timeline_view(frame, area, &view, &ctx);
}

/// Draw the legend bar at the bottom.
fn draw_legend(frame: &mut Frame, area: Rect) {
    let legend = Paragraph::new(LEGEND).style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(legend, area);
}
