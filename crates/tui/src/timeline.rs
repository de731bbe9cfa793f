//! Timeline view rendering.
//!
//! Paints a [`TimelineFrame`] into terminal cells. One layout pixel is one
//! terminal column, so the geometry from the engine is used as-is and only
//! translated by the viewport's scroll position.

use std::collections::HashMap;

use ganttflow_core::{Status, Task, TaskBar, TaskKind, TimelineFrame, ViewMode};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Header rows drawn above the task rows: months, then days or weeks.
pub const HEADER_ROWS: u16 = 2;

/// Glyph for a completed task's bar
const DONE_BAR: char = '\u{2588}';

/// Glyph for any other task's bar
const OPEN_BAR: char = '\u{2592}';

const MILESTONE: char = '\u{25C6}';

const TODAY_MARKER: char = '\u{2502}';

/// Color palette for dependency groups (8 distinct colors).
/// Groups cycle through these colors if there are more than 8 groups.
const DEPENDENCY_GROUP_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Magenta,
    Color::Blue,
    Color::LightRed,
    Color::LightGreen,
    Color::LightBlue,
    Color::LightYellow,
    Color::White,
];

/// Get the color for a dependency group ID.
fn get_dependency_group_color(group_id: usize) -> Color {
    DEPENDENCY_GROUP_COLORS[group_id % DEPENDENCY_GROUP_COLORS.len()]
}

/// Get the color for a task status.
pub fn get_status_color(status: Status) -> Color {
    match status {
        Status::Completed => Color::Green,
        Status::InProgress => Color::Yellow,
        Status::NotStarted => Color::Gray,
        Status::OnHold => Color::DarkGray,
    }
}

/// Everything the timeline panel needs besides the frame itself.
pub struct TimelineContext<'a> {
    pub tasks: &'a [Task],
    /// Dependency group of each linked task
    pub groups: &'a HashMap<String, usize>,
    pub selected: usize,
    pub view_mode: ViewMode,
    /// Terminal lines per task row
    pub row_height: i64,
    pub is_focused: bool,
}

/// Render the timeline panel.
pub fn render_timeline_view(
    frame: &mut Frame,
    area: Rect,
    view: &TimelineFrame<'_>,
    ctx: &TimelineContext<'_>,
) {
    let border_color = if ctx.is_focused {
        Color::Yellow
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .title(format!(" Timeline ({}) ", ctx.view_mode))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if ctx.tasks.is_empty() {
        let paragraph = Paragraph::new("No tasks found")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let paragraph = Paragraph::new(build_lines(view, ctx)).block(block);
    frame.render_widget(paragraph, area);
}

/// Build the header rows followed by one line per visible task row.
pub fn build_lines(view: &TimelineFrame<'_>, ctx: &TimelineContext<'_>) -> Vec<Line<'static>> {
    let width = view.viewport.width.max(0) as usize;
    let height = view.viewport.height.max(0) as usize;

    let mut lines = Vec::with_capacity(height + HEADER_ROWS as usize);
    lines.push(build_month_header(view, width));
    lines.push(build_sub_header(view, width));

    let bars_by_row: HashMap<usize, &TaskBar> =
        view.bars.iter().map(|bar| (bar.row_index, *bar)).collect();

    // Mounted rows include overscan; keep only those landing on screen
    let mut rows: Vec<Option<usize>> = vec![None; height];
    for row in view.rows.indices() {
        let y = row as i64 * ctx.row_height.max(1) - view.viewport.scroll_top;
        if let Ok(y) = usize::try_from(y)
            && y < height
        {
            rows[y] = Some(row);
        }
    }

    for row in rows {
        let bar = row.and_then(|r| bars_by_row.get(&r).copied());
        let task = row.and_then(|r| ctx.tasks.get(r));
        let is_selected = ctx.is_focused && row == Some(ctx.selected);
        lines.push(build_task_line(view, width, bar, task, ctx.groups, is_selected));
    }

    lines
}

/// One styled terminal cell.
type Cell = (char, Style);

fn blank_cells(width: usize) -> Vec<Cell> {
    vec![(' ', Style::default()); width]
}

/// Translate a layout x coordinate into a screen column, if on screen.
fn screen_x(view: &TimelineFrame<'_>, x: i64, width: usize) -> Option<usize> {
    let col = x - view.viewport.scroll_left;
    usize::try_from(col).ok().filter(|c| *c < width)
}

/// Fill `[left, left + span)` in layout coordinates, clipped to the screen.
fn fill(cells: &mut [Cell], view: &TimelineFrame<'_>, left: i64, span: i64, cell: Cell) {
    let width = cells.len() as i64;
    let start = (left - view.viewport.scroll_left).max(0);
    let end = (left + span - view.viewport.scroll_left).min(width);
    for col in start..end {
        cells[col as usize] = cell;
    }
}

/// Write `label` starting at layout x `left`, never past `left + span`.
fn write_label(
    cells: &mut [Cell],
    view: &TimelineFrame<'_>,
    left: i64,
    span: i64,
    label: &str,
    style: Style,
) {
    let visible_left = left.max(view.viewport.scroll_left);
    let room = (left + span - visible_left).max(0) as usize;
    // Leave the boundary marker at the cell's first column alone
    let skip = usize::from(visible_left == left);
    for (i, c) in label.chars().take(room.saturating_sub(skip)).enumerate() {
        if let Some(col) = screen_x(view, visible_left + (skip + i) as i64, cells.len()) {
            cells[col] = (c, style);
        }
    }
}

/// Merge runs of equally styled cells into spans.
fn cells_to_line(cells: &[Cell]) -> Line<'static> {
    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();

    for &(c, style) in cells {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }

    Line::from(spans)
}

/// Month names, with a boundary marker where each month starts.
pub fn build_month_header(view: &TimelineFrame<'_>, width: usize) -> Line<'static> {
    let mut cells = blank_cells(width);
    let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let rule = Style::default().fg(Color::DarkGray);

    for month in &view.months {
        if let Some(col) = screen_x(view, month.pixel_offset, width) {
            cells[col] = ('\u{250A}', rule);
        }
        write_label(
            &mut cells,
            view,
            month.pixel_offset,
            month.pixel_width,
            &month.display_name,
            style,
        );
    }

    cells_to_line(&cells)
}

/// Day numbers or week labels; blank in month view.
pub fn build_sub_header(view: &TimelineFrame<'_>, width: usize) -> Line<'static> {
    let mut cells = blank_cells(width);
    let style = Style::default().fg(Color::DarkGray);

    for sub in &view.sub_headers {
        let label_width = sub.label.chars().count() as i64;
        // Too narrow to read; skip rather than truncate digits
        if label_width > sub.pixel_width {
            continue;
        }
        let visible_left = sub.pixel_offset.max(view.viewport.scroll_left);
        if sub.pixel_offset + sub.pixel_width - visible_left < label_width {
            continue;
        }
        for (i, c) in sub.label.chars().enumerate() {
            if let Some(col) = screen_x(view, visible_left + i as i64, width) {
                cells[col] = (c, style);
            }
        }
    }

    cells_to_line(&cells)
}

/// One task row: today marker underneath, bar or milestone on top.
fn build_task_line(
    view: &TimelineFrame<'_>,
    width: usize,
    bar: Option<&TaskBar>,
    task: Option<&Task>,
    groups: &HashMap<String, usize>,
    is_selected: bool,
) -> Line<'static> {
    let mut cells = blank_cells(width);

    if let Some(today) = view.today_offset
        && let Some(col) = screen_x(view, today, width)
    {
        cells[col] = (TODAY_MARKER, Style::default().fg(Color::Red));
    }

    if let (Some(bar), Some(task)) = (bar, task) {
        let color = match groups.get(&task.id) {
            Some(&group) => get_dependency_group_color(group),
            None => get_status_color(task.status),
        };
        let style = if is_selected {
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else if task.status == Status::InProgress || groups.contains_key(&task.id) {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };

        match bar.kind {
            TaskKind::Milestone => {
                let centre = bar.pixel_left + bar.pixel_width / 2;
                if let Some(col) = screen_x(view, centre, width) {
                    cells[col] = (MILESTONE, style);
                }
            }
            TaskKind::Task => {
                let glyph = if task.is_completed() { DONE_BAR } else { OPEN_BAR };
                fill(&mut cells, view, bar.pixel_left, bar.pixel_width, (glyph, style));
            }
        }
    }

    cells_to_line(&cells)
}
