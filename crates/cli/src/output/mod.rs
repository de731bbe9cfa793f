//! Output formatting module for GanttFlow
//!
//! Provides table formatting and display utilities for CLI output.

use ganttflow_core::{DateRange, ScrollEdge, Task, TaskBar, TimelineFrame, TimelineLayout};

/// Maximum width for the title column before truncation
const MAX_TITLE_WIDTH: usize = 30;

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    let len = s.chars().count();
    if len <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{}...", head)
    }
}

/// Format rows into an aligned table with a dashed separator under the headers.
///
/// ```text
/// Key      Month       Offset  Width
/// -------  ----------  ------  -----
/// 2024-03  March 2024       0   1550
/// ```
///
/// Numeric-looking cells are right-aligned.
fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            rows.iter()
                .map(|row| row.get(col).map_or(0, |c| c.chars().count()))
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(
        headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:<w$}", h, w = w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(
            row.iter()
                .zip(&widths)
                .map(|(cell, w)| {
                    if is_numeric(cell) {
                        format!("{:>w$}", cell, w = w)
                    } else {
                        format!("{:<w$}", cell, w = w)
                    }
                })
                .collect::<Vec<_>>()
                .join("  "),
        );
    }

    lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.parse::<i64>().is_ok()
}

/// Format the calendar range with its day count.
pub fn format_range(range: &DateRange) -> String {
    format!(
        "Start  {}\nEnd    {}\nDays   {}",
        range.start,
        range.end,
        range.day_count()
    )
}

/// Format both header rows: months, then week or day buckets if the view has them.
pub fn format_headers(layout: &TimelineLayout) -> String {
    let month_rows: Vec<Vec<String>> = layout
        .months()
        .iter()
        .map(|m| {
            vec![
                m.year_month_key.clone(),
                m.display_name.clone(),
                m.pixel_offset.to_string(),
                m.pixel_width.to_string(),
            ]
        })
        .collect();
    let mut output = format_table(&["Key", "Month", "Offset", "Width"], &month_rows);

    if !layout.sub_headers().is_empty() {
        let sub_rows: Vec<Vec<String>> = layout
            .sub_headers()
            .iter()
            .map(|s| {
                vec![
                    s.key.clone(),
                    s.label.clone(),
                    s.pixel_offset.to_string(),
                    s.pixel_width.to_string(),
                ]
            })
            .collect();
        output.push_str("\n\n");
        output.push_str(&format_table(&["Key", "Label", "Offset", "Width"], &sub_rows));
    }

    output
}

/// Format positioned bars alongside the tasks they belong to.
///
/// `tasks` must be the list the bars were positioned from; each bar's row
/// index selects its task.
pub fn format_bar_table<'a>(tasks: &[Task], bars: impl IntoIterator<Item = &'a TaskBar>) -> String {
    let rows: Vec<Vec<String>> = bars
        .into_iter()
        .filter_map(|bar| tasks.get(bar.row_index).map(|task| (bar, task)))
        .map(|(bar, task)| {
            vec![
                bar.row_index.to_string(),
                bar.task_id.clone(),
                bar.kind.to_string(),
                task.start_date.to_string(),
                task.end_date.to_string(),
                bar.pixel_left.to_string(),
                bar.pixel_width.to_string(),
                truncate(&task.title, MAX_TITLE_WIDTH),
            ]
        })
        .collect();

    if rows.is_empty() {
        return "No tasks found.".to_string();
    }

    format_table(
        &["Row", "ID", "Kind", "Start", "End", "Left", "Width", "Title"],
        &rows,
    )
}

fn format_edge(edge: Option<ScrollEdge>) -> &'static str {
    match edge {
        Some(ScrollEdge::Leading) => "leading",
        Some(ScrollEdge::Trailing) => "trailing",
        None => "none",
    }
}

/// Format a viewport frame: the mounted slice followed by its bars.
pub fn format_frame(frame: &TimelineFrame<'_>, tasks: &[Task], edge: Option<ScrollEdge>) -> String {
    let viewport = frame.viewport;
    let mut output = format!(
        "Viewport  left {}, top {}, {}x{}\n",
        viewport.scroll_left, viewport.scroll_top, viewport.width, viewport.height
    );

    let dates = match (frame.days.first(), frame.days.last()) {
        (Some(first), Some(last)) => format!(" ({} to {})", first.date, last.date),
        _ => String::new(),
    };
    output.push_str(&format!(
        "Columns   {}..{}{}\n",
        frame.columns.start, frame.columns.end, dates
    ));
    output.push_str(&format!("Rows      {}..{}\n", frame.rows.start, frame.rows.end));

    let months: Vec<&str> = frame.months.iter().map(|m| m.display_name.as_str()).collect();
    output.push_str(&format!("Months    {}\n", months.join(", ")));

    let today = frame
        .today_offset
        .map_or_else(|| "-".to_string(), |x| x.to_string());
    output.push_str(&format!("Today     {}\n", today));
    output.push_str(&format!("Edge      {}\n\n", format_edge(edge)));

    output.push_str(&format_bar_table(tasks, frame.bars.iter().copied()));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ganttflow_core::{
        ColumnVirtualizer, LayoutConfig, TaskKind, ViewMode, Viewport, compute_layout,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("a1", "Design review", date(2024, 6, 10), date(2024, 6, 12)),
            Task::new("m1", "Launch", date(2024, 6, 20), date(2024, 6, 20))
                .with_kind(TaskKind::Milestone),
        ]
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("this is a very long title", 10), "this is...");
    }

    #[test]
    fn test_truncate_very_short_max() {
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Planificación del año", 8), "Plani...");
    }

    #[test]
    fn test_format_table_alignment() {
        let rows = vec![
            vec!["x".to_string(), "5".to_string()],
            vec!["longer".to_string(), "1234".to_string()],
        ];
        let table = format_table(&["Name", "N"], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Name    N");
        assert_eq!(lines[1], "------  ----");
        assert_eq!(lines[2], "x          5");
        assert_eq!(lines[3], "longer  1234");
    }

    #[test]
    fn test_format_range() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 10, 31));
        assert_eq!(
            format_range(&range),
            "Start  2024-03-01\nEnd    2024-10-31\nDays   245"
        );
    }

    #[test]
    fn test_format_headers_month_view_has_no_sub_table() {
        let layout = compute_layout(&tasks(), ViewMode::Month, &LayoutConfig::default(), date(2024, 6, 1));
        let output = format_headers(&layout);
        assert!(output.starts_with("Key"));
        assert!(output.contains("June 2024"));
        assert!(!output.contains("Label"));
    }

    #[test]
    fn test_format_headers_week_view_lists_weeks() {
        let layout = compute_layout(&tasks(), ViewMode::Week, &LayoutConfig::default(), date(2024, 6, 1));
        let output = format_headers(&layout);
        assert!(output.contains("Label"));
        assert!(output.contains("2024-W24"));
    }

    #[test]
    fn test_format_bar_table() {
        let tasks = tasks();
        let layout = compute_layout(&tasks, ViewMode::Day, &LayoutConfig::default(), date(2024, 6, 1));
        let output = format_bar_table(&tasks, &layout.bars);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Row  ID"));
        assert!(lines[2].contains("a1"));
        assert!(lines[2].contains("5050"));
        assert!(lines[2].contains("145"));
        assert!(lines[3].contains("milestone"));
    }

    #[test]
    fn test_format_bar_table_empty() {
        assert_eq!(format_bar_table(&[], &[]), "No tasks found.");
    }

    #[test]
    fn test_format_frame() {
        let tasks = tasks();
        let layout = compute_layout(&tasks, ViewMode::Day, &LayoutConfig::default(), date(2024, 6, 11));
        let viewport = Viewport::new(500, 100).with_scroll(5050, 0);
        let frame = TimelineFrame::compose(&layout, viewport, &ColumnVirtualizer::new(0));
        let output = format_frame(&frame, &tasks, None);

        assert!(output.contains("Columns   101..111 (2024-06-10 to 2024-06-19)"));
        assert!(output.contains("Months    June 2024"));
        assert!(output.contains("Today     5100"));
        assert!(output.contains("Edge      none"));
        assert!(output.contains("Design review"));
        assert!(!output.contains("Launch"));
    }
}
