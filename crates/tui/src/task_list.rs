//! Task list panel.
//!
//! Shows one line per task, aligned with the timeline rows on the right.

use ganttflow_core::{Status, Task, TaskKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::timeline::{HEADER_ROWS, get_status_color};

/// Status indicator shown before a task title.
fn status_indicator(status: Status) -> &'static str {
    match status {
        Status::Completed => "[x]",
        Status::InProgress => "[>]",
        Status::OnHold => "[-]",
        Status::NotStarted => "[ ]",
    }
}

/// Render the task list panel.
///
/// `first_row` is the first task row visible in the timeline so both
/// panels scroll together.
pub fn render_task_list(
    frame: &mut Frame,
    area: Rect,
    tasks: &[Task],
    selected: usize,
    first_row: usize,
) {
    let block = Block::default()
        .title(" Tasks ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if tasks.is_empty() {
        let paragraph = Paragraph::new("No tasks found")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_rows = area.height.saturating_sub(2 + HEADER_ROWS) as usize;
    let lines = build_list_lines(tasks, selected, first_row, visible_rows);
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Header padding followed by the task lines in view.
pub fn build_list_lines(
    tasks: &[Task],
    selected: usize,
    first_row: usize,
    visible_rows: usize,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = vec![Line::from(""); HEADER_ROWS as usize];
    lines.extend(
        tasks
            .iter()
            .enumerate()
            .skip(first_row)
            .take(visible_rows)
            .map(|(i, task)| render_task_line(task, i == selected)),
    );
    lines
}

/// Render a single task as a styled line.
fn render_task_line(task: &Task, is_selected: bool) -> Line<'static> {
    let marker = if is_selected { "> " } else { "  " };
    let kind = match task.kind {
        TaskKind::Milestone => "\u{25C6} ",
        TaskKind::Task => "",
    };
    let text = format!("{}{} {}{}", marker, status_indicator(task.status), kind, task.title);

    let style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
            .bg(Color::DarkGray)
    } else {
        Style::default().fg(get_status_color(task.status))
    };

    Line::from(Span::styled(text, style))
}
