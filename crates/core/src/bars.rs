//! Task bar geometry.
//!
//! Maps each task's calendar dates onto horizontal pixel offsets within the
//! grid. Geometry is never clamped: a task outside the calendar range gets
//! a negative or past-the-end offset, and culling is left to the renderer.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::ScaleConfig;
use crate::models::{Task, TaskKind};

/// Positioned rectangle for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskBar {
    pub task_id: String,
    pub pixel_left: i64,
    pub pixel_width: i64,
    pub pixel_top: i64,
    pub row_index: usize,
    pub kind: TaskKind,
}

impl TaskBar {
    pub fn pixel_right(&self) -> i64 {
        self.pixel_left + self.pixel_width
    }

    /// Whether the bar overlaps the horizontal span `[left, right)`.
    pub fn intersects(&self, left: i64, right: i64) -> bool {
        self.pixel_width > 0 && self.pixel_left < right && self.pixel_right() > left
    }
}

/// Whole calendar days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Positions task bars against a calendar starting at `calendar_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskBarPositioner {
    calendar_start: NaiveDate,
    cell_width: i64,
    gap: i64,
    row_height: i64,
}

impl TaskBarPositioner {
    pub fn new(calendar_start: NaiveDate, scale: ScaleConfig, row_height: u32) -> Self {
        Self {
            calendar_start,
            cell_width: i64::from(scale.cell_width),
            gap: i64::from(scale.gap),
            row_height: i64::from(row_height),
        }
    }

    /// Horizontal offset of the column holding `date`.
    pub fn offset_of(&self, date: NaiveDate) -> i64 {
        days_between(self.calendar_start, date) * self.cell_width
    }

    /// Position one task in row `row_index`.
    ///
    /// Duration bars span every day of the task minus the gap; milestones
    /// take exactly one cell at their start date.
    pub fn position(&self, task: &Task, row_index: usize) -> TaskBar {
        let pixel_width = match task.kind {
            TaskKind::Task => {
                (days_between(task.start_date, task.end_date) + 1) * self.cell_width - self.gap
            }
            TaskKind::Milestone => self.cell_width,
        };

        TaskBar {
            task_id: task.id.clone(),
            pixel_left: self.offset_of(task.start_date),
            pixel_width,
            pixel_top: row_index as i64 * self.row_height,
            row_index,
            kind: task.kind,
        }
    }

    /// Position every task, one row per task in list order.
    pub fn position_all(&self, tasks: &[Task]) -> Vec<TaskBar> {
        tasks
            .iter()
            .enumerate()
            .map(|(row, task)| self.position(task, row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn positioner() -> TaskBarPositioner {
        TaskBarPositioner::new(date(2024, 3, 1), ScaleConfig::new(50, 5), 50)
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 3, 1), date(2024, 6, 10)), 101);
        assert_eq!(days_between(date(2024, 6, 10), date(2024, 6, 10)), 0);
        assert_eq!(days_between(date(2024, 6, 10), date(2024, 6, 8)), -2);
    }

    #[test]
    fn test_bar_geometry() {
        let task = Task::new("t", "Three days", date(2024, 6, 10), date(2024, 6, 12));
        let bar = positioner().position(&task, 0);
        assert_eq!(bar.pixel_left, 101 * 50);
        assert_eq!(bar.pixel_width, 145);
    }

    #[test]
    fn test_single_day_task_width() {
        let task = Task::new("t", "One day", date(2024, 3, 1), date(2024, 3, 1));
        let bar = positioner().position(&task, 0);
        assert_eq!(bar.pixel_left, 0);
        assert_eq!(bar.pixel_width, 45);
    }

    #[test]
    fn test_milestone_takes_one_cell() {
        let task = Task::new("m", "Launch", date(2024, 3, 5), date(2024, 3, 9))
            .with_kind(TaskKind::Milestone);
        let bar = positioner().position(&task, 2);
        assert_eq!(bar.pixel_left, 200);
        assert_eq!(bar.pixel_width, 50);
        assert_eq!(bar.kind, TaskKind::Milestone);
    }

    #[test]
    fn test_task_before_calendar_is_not_clamped() {
        let task = Task::new("t", "Early", date(2024, 2, 20), date(2024, 2, 21));
        let bar = positioner().position(&task, 0);
        assert_eq!(bar.pixel_left, -10 * 50);
        assert_eq!(bar.pixel_width, 95);
    }

    #[test]
    fn test_rows_follow_list_order_without_packing() {
        let tasks = vec![
            Task::new("a", "A", date(2024, 3, 1), date(2024, 3, 3)),
            Task::new("b", "B", date(2024, 3, 2), date(2024, 3, 4)),
            Task::new("c", "C", date(2024, 3, 10), date(2024, 3, 11)),
        ];
        let bars = positioner().position_all(&tasks);
        let rows: Vec<usize> = bars.iter().map(|b| b.row_index).collect();
        assert_eq!(rows, vec![0, 1, 2]);
        assert_eq!(bars[1].pixel_top, 50);
        assert_eq!(bars[2].pixel_top, 100);
    }

    #[test]
    fn test_reversed_task_does_not_panic() {
        let task = Task::new("r", "Reversed", date(2024, 3, 10), date(2024, 3, 5));
        let bar = positioner().position(&task, 0);
        assert_eq!(bar.pixel_left, 450);
        assert!(bar.pixel_width < 0);
        assert!(!bar.intersects(0, 10_000));
    }

    #[test]
    fn test_intersects() {
        let task = Task::new("t", "T", date(2024, 3, 3), date(2024, 3, 4));
        let bar = positioner().position(&task, 0);
        // Spans [100, 195)
        assert!(bar.intersects(0, 101));
        assert!(!bar.intersects(0, 100));
        assert!(bar.intersects(194, 300));
        assert!(!bar.intersects(195, 300));
    }
}
