//! Calendar grid construction.
//!
//! Expands a [`DateRange`] into one column per day and groups those columns
//! into header runs: months for the top row, and days or ISO weeks for the
//! second row depending on the view mode.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::ViewMode;
use crate::range::DateRange;

/// One day column of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub column_index: usize,
}

/// A run of consecutive days in the same calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthHeader {
    /// `YYYY-MM`
    pub year_month_key: String,
    /// e.g. `March 2024`
    pub display_name: String,
    pub pixel_offset: i64,
    pub pixel_width: i64,
}

impl MonthHeader {
    pub fn pixel_right(&self) -> i64 {
        self.pixel_offset + self.pixel_width
    }
}

/// A cell of the second header row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubHeader {
    pub key: String,
    pub label: String,
    pub pixel_offset: i64,
    pub pixel_width: i64,
}

impl SubHeader {
    pub fn pixel_right(&self) -> i64 {
        self.pixel_offset + self.pixel_width
    }
}

/// Day columns plus both header rows for one range and cell width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarGrid {
    pub days: Vec<CalendarDay>,
    pub months: Vec<MonthHeader>,
    pub sub_headers: Vec<SubHeader>,
    pub cell_width: i64,
    pub total_width: i64,
}

impl CalendarGrid {
    /// Build the grid for `range`.
    ///
    /// A degenerate range (`start > end`) produces an empty grid.
    pub fn build(range: DateRange, view_mode: ViewMode, cell_width: i64) -> Self {
        let days = build_days(range);
        let months = group_months(&days, cell_width);
        let sub_headers = build_sub_headers(&days, view_mode, cell_width);
        let total_width = days.len() as i64 * cell_width;

        Self {
            days,
            months,
            sub_headers,
            cell_width,
            total_width,
        }
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Column index of `date`, if it lies inside the grid.
    pub fn column_of(&self, date: NaiveDate) -> Option<usize> {
        let first = self.days.first()?;
        let offset = (date - first.date).num_days();
        if offset < 0 || offset as usize >= self.days.len() {
            return None;
        }
        Some(offset as usize)
    }
}

/// Every day from `range.start` to `range.end`, inclusive.
pub fn build_days(range: DateRange) -> Vec<CalendarDay> {
    if range.start > range.end {
        return Vec::new();
    }

    range
        .start
        .iter_days()
        .take(range.day_count())
        .enumerate()
        .map(|(column_index, date)| CalendarDay { date, column_index })
        .collect()
}

/// A maximal run of days sharing one grouping key.
struct Run<K> {
    key: K,
    first: NaiveDate,
    len: usize,
}

/// Run-length encode `days` by `key`, preserving encounter order.
fn runs<K: PartialEq>(days: &[CalendarDay], key: impl Fn(NaiveDate) -> K) -> Vec<Run<K>> {
    let mut out: Vec<Run<K>> = Vec::new();
    for day in days {
        let k = key(day.date);
        match out.last_mut() {
            Some(run) if run.key == k => run.len += 1,
            _ => out.push(Run {
                key: k,
                first: day.date,
                len: 1,
            }),
        }
    }
    out
}

/// Group days into month headers with running pixel offsets.
pub fn group_months(days: &[CalendarDay], cell_width: i64) -> Vec<MonthHeader> {
    let mut offset = 0;
    runs(days, |d| (d.year(), d.month()))
        .into_iter()
        .map(|run| {
            let pixel_width = run.len as i64 * cell_width;
            let header = MonthHeader {
                year_month_key: run.first.format("%Y-%m").to_string(),
                display_name: run.first.format("%B %Y").to_string(),
                pixel_offset: offset,
                pixel_width,
            };
            offset += pixel_width;
            header
        })
        .collect()
}

/// Build the second header row for a view mode.
///
/// Day view labels every column with its day of month. Week view groups
/// days by ISO week, with partial weeks at either end of the range. Month
/// view has no second row.
pub fn build_sub_headers(
    days: &[CalendarDay],
    view_mode: ViewMode,
    cell_width: i64,
) -> Vec<SubHeader> {
    match view_mode {
        ViewMode::Day => days
            .iter()
            .map(|day| SubHeader {
                key: day.date.format("%Y-%m-%d").to_string(),
                label: day.date.day().to_string(),
                pixel_offset: day.column_index as i64 * cell_width,
                pixel_width: cell_width,
            })
            .collect(),
        ViewMode::Week => {
            let mut offset = 0;
            runs(days, |d| {
                let week = d.iso_week();
                (week.year(), week.week())
            })
            .into_iter()
            .map(|run| {
                let (iso_year, week) = run.key;
                let pixel_width = run.len as i64 * cell_width;
                let header = SubHeader {
                    key: format!("{}-W{:02}", iso_year, week),
                    label: format!("W{}", week),
                    pixel_offset: offset,
                    pixel_width,
                };
                offset += pixel_width;
                header
            })
            .collect()
        }
        ViewMode::Month => Vec::new(),
    }
}
