//! Calendar window derivation.
//!
//! Computes the padded, month-aligned date range the timeline renders for a
//! task list, and grows that range when the viewport nears an edge.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::Task;

/// Months of padding added around the tasks' extent.
pub const PAD_MONTHS: i32 = 3;

/// An inclusive calendar window.
///
/// A window with `start > end` is degenerate and contains no days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days in the window, zero when degenerate.
    pub fn day_count(&self) -> usize {
        if self.start > self.end {
            return 0;
        }
        ((self.end - self.start).num_days() + 1) as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// January 1st through December 31st of `today`'s year.
    pub fn year_of(today: NaiveDate) -> Self {
        let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
        Self { start, end }
    }
}

/// Compute the calendar window for a task list.
///
/// Starts on the first day of the month [`PAD_MONTHS`] before the earliest
/// task date and ends on the last day of the month `PAD_MONTHS + 1` after
/// the latest one. An empty list yields the whole current year.
///
/// Reversed task intervals are not rejected: both endpoints of every task
/// feed the min and max, so the result is always a valid window.
pub fn compute_range(tasks: &[Task], today: NaiveDate) -> DateRange {
    let endpoints = tasks.iter().flat_map(|t| [t.start_date, t.end_date]);

    let (Some(min), Some(max)) = (endpoints.clone().min(), endpoints.max()) else {
        return DateRange::year_of(today);
    };

    DateRange {
        start: first_of_month(min, -PAD_MONTHS),
        end: last_of_month(max, PAD_MONTHS + 1),
    }
}

/// First day of the month `months` away from `date`'s month.
pub fn first_of_month(date: NaiveDate, months: i32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Last day of the month `months` away from `date`'s month.
pub fn last_of_month(date: NaiveDate, months: i32) -> NaiveDate {
    let next = first_of_month(date, months + 1);
    if next <= date && months >= 0 {
        // Out of chrono's representable range
        return date;
    }
    next.pred_opt().unwrap_or(next)
}

/// The side of the timeline a viewport is approaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEdge {
    /// Near the earliest dates
    Leading,
    /// Near the latest dates
    Trailing,
}

/// Grow `range` by [`PAD_MONTHS`] whole months at `edge`.
pub fn extend_range(range: DateRange, edge: ScrollEdge) -> DateRange {
    match edge {
        ScrollEdge::Leading => DateRange {
            start: first_of_month(range.start, -PAD_MONTHS),
            end: range.end,
        },
        ScrollEdge::Trailing => DateRange {
            start: range.start,
            end: last_of_month(range.end, PAD_MONTHS),
        },
    }
}

/// Report which edge, if any, the viewport is within `threshold` of.
///
/// The leading edge is checked first.
pub fn scroll_edge(
    scroll_left: i64,
    scroll_width: i64,
    client_width: i64,
    threshold: i64,
) -> Option<ScrollEdge> {
    if scroll_left < threshold {
        Some(ScrollEdge::Leading)
    } else if scroll_width - scroll_left - client_width < threshold {
        Some(ScrollEdge::Trailing)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, start: NaiveDate, end: NaiveDate) -> Task {
        Task::new(id, id, start, end)
    }

    #[test]
    fn test_range_pads_around_tasks() {
        let tasks = vec![task("a", date(2024, 6, 10), date(2024, 6, 20))];
        let range = compute_range(&tasks, date(2030, 1, 1));
        assert_eq!(range.start, date(2024, 3, 1));
        assert_eq!(range.end, date(2024, 10, 31));
    }

    #[test]
    fn test_empty_tasks_cover_current_year() {
        let range = compute_range(&[], date(2025, 8, 14));
        assert_eq!(range.start, date(2025, 1, 1));
        assert_eq!(range.end, date(2025, 12, 31));
        assert_eq!(range.day_count(), 365);
    }

    #[test]
    fn test_single_task_still_padded() {
        let tasks = vec![task("a", date(2024, 2, 29), date(2024, 2, 29))];
        let range = compute_range(&tasks, date(2024, 1, 1));
        assert_eq!(range.start, date(2023, 11, 1));
        assert_eq!(range.end, date(2024, 6, 30));
    }

    #[test]
    fn test_range_spans_min_and_max_across_tasks() {
        let tasks = vec![
            task("late", date(2025, 1, 5), date(2025, 2, 1)),
            task("early", date(2024, 11, 20), date(2024, 12, 2)),
        ];
        let range = compute_range(&tasks, date(2024, 1, 1));
        assert_eq!(range.start, date(2024, 8, 1));
        assert_eq!(range.end, date(2025, 6, 30));
    }

    #[test]
    fn test_reversed_task_still_yields_valid_range() {
        let tasks = vec![task("rev", date(2026, 3, 10), date(2020, 1, 15))];
        let range = compute_range(&tasks, date(2024, 1, 1));
        assert!(range.start <= range.end);
        assert_eq!(range.start, date(2019, 10, 1));
        assert_eq!(range.end, date(2026, 7, 31));
    }

    #[test]
    fn test_month_offsets_cross_year_boundaries() {
        assert_eq!(first_of_month(date(2024, 1, 15), -3), date(2023, 10, 1));
        assert_eq!(first_of_month(date(2024, 11, 15), 3), date(2025, 2, 1));
        assert_eq!(last_of_month(date(2024, 11, 15), 3), date(2025, 2, 28));
        assert_eq!(last_of_month(date(2023, 12, 31), 2), date(2024, 2, 29));
    }

    #[test]
    fn test_day_count_of_degenerate_range_is_zero() {
        let range = DateRange::new(date(2024, 5, 2), date(2024, 5, 1));
        assert_eq!(range.day_count(), 0);
        assert!(!range.contains(date(2024, 5, 1)));
    }

    #[test]
    fn test_extend_leading_edge() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 10, 31));
        let extended = extend_range(range, ScrollEdge::Leading);
        assert_eq!(extended.start, date(2023, 12, 1));
        assert_eq!(extended.end, range.end);
    }

    #[test]
    fn test_extend_trailing_edge() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 10, 31));
        let extended = extend_range(range, ScrollEdge::Trailing);
        assert_eq!(extended.start, range.start);
        assert_eq!(extended.end, date(2025, 1, 31));
    }

    #[test]
    fn test_scroll_edge_detection() {
        assert_eq!(scroll_edge(100, 10_000, 1_000, 500), Some(ScrollEdge::Leading));
        assert_eq!(
            scroll_edge(8_700, 10_000, 1_000, 500),
            Some(ScrollEdge::Trailing)
        );
        assert_eq!(scroll_edge(4_000, 10_000, 1_000, 500), None);
    }

    #[test]
    fn test_scroll_edge_prefers_leading_when_both_apply() {
        assert_eq!(scroll_edge(0, 800, 1_000, 500), Some(ScrollEdge::Leading));
    }
}
