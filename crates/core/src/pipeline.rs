//! Layout pipeline and memoization.
//!
//! [`compute_layout`] chains range derivation, grid construction and bar
//! positioning into one [`TimelineLayout`]. [`LayoutCache`] memoizes the
//! most recent layout under an explicit content fingerprint instead of
//! relying on the identity of the task list.

use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::bars::{TaskBar, TaskBarPositioner, days_between};
use crate::config::LayoutConfig;
use crate::dependency::{DependencyArrow, route_arrows};
use crate::grid::{CalendarDay, CalendarGrid, MonthHeader, SubHeader};
use crate::models::{Task, ViewMode};
use crate::range::{DateRange, compute_range};

/// Complete geometry for one task list, view mode and range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineLayout {
    pub view_mode: ViewMode,
    pub range: DateRange,
    pub grid: CalendarGrid,
    pub bars: Vec<TaskBar>,
    pub arrows: Vec<DependencyArrow>,
    pub row_height: i64,
    pub total_height: i64,
    /// Offset of today's column, when today lies inside the range
    pub today_offset: Option<i64>,
}

impl TimelineLayout {
    pub fn days(&self) -> &[CalendarDay] {
        &self.grid.days
    }

    pub fn months(&self) -> &[MonthHeader] {
        &self.grid.months
    }

    pub fn sub_headers(&self) -> &[SubHeader] {
        &self.grid.sub_headers
    }

    pub fn cell_width(&self) -> i64 {
        self.grid.cell_width
    }

    pub fn total_width(&self) -> i64 {
        self.grid.total_width
    }

    pub fn day_count(&self) -> usize {
        self.grid.day_count()
    }

    /// Bar for a task id.
    pub fn bar(&self, task_id: &str) -> Option<&TaskBar> {
        self.bars.iter().find(|b| b.task_id == task_id)
    }
}

/// Run the full pipeline with a range derived from the tasks.
pub fn compute_layout(
    tasks: &[Task],
    view_mode: ViewMode,
    config: &LayoutConfig,
    today: NaiveDate,
) -> TimelineLayout {
    let range = compute_range(tasks, today);
    layout_for_range(tasks, range, view_mode, config, today)
}

/// Run the pipeline against an explicit range (e.g. after extending it).
pub fn layout_for_range(
    tasks: &[Task],
    range: DateRange,
    view_mode: ViewMode,
    config: &LayoutConfig,
    today: NaiveDate,
) -> TimelineLayout {
    let scale = config.scale(view_mode);
    let cell_width = i64::from(scale.cell_width);
    let row_height = i64::from(config.row_height);

    let grid = CalendarGrid::build(range, view_mode, cell_width);
    let positioner = TaskBarPositioner::new(range.start, scale, config.row_height);
    let bars = positioner.position_all(tasks);
    let arrows = if config.dependency_arrows {
        route_arrows(tasks, &bars, cell_width, row_height)
    } else {
        Vec::new()
    };

    let today_offset = range
        .contains(today)
        .then(|| days_between(range.start, today) * cell_width);

    debug!(
        "Computed {} layout: {} days, {} months, {} bars, {} arrows",
        view_mode,
        grid.day_count(),
        grid.months.len(),
        bars.len(),
        arrows.len()
    );

    TimelineLayout {
        view_mode,
        range,
        grid,
        total_height: tasks.len() as i64 * row_height,
        bars,
        arrows,
        row_height,
        today_offset,
    }
}

/// SHA-256 fingerprint of every input that affects geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutKey([u8; 32]);

impl LayoutKey {
    /// Fingerprint a pipeline invocation.
    ///
    /// Titles, statuses and other display-only fields are excluded, so
    /// renaming a task does not invalidate the geometry.
    pub fn new(
        tasks: &[Task],
        range: Option<DateRange>,
        view_mode: ViewMode,
        config: &LayoutConfig,
        today: NaiveDate,
    ) -> Self {
        let mut hasher = Sha256::new();

        hasher.update((tasks.len() as u64).to_le_bytes());
        for task in tasks {
            hasher.update(task.id.as_bytes());
            hasher.update([0u8]);
            hasher.update(task.start_date.to_string().as_bytes());
            hasher.update(task.end_date.to_string().as_bytes());
            hasher.update(task.kind.as_str().as_bytes());
            hasher.update((task.dependencies.len() as u64).to_le_bytes());
            for dep in &task.dependencies {
                hasher.update(dep.as_bytes());
                hasher.update([0u8]);
            }
        }

        match range {
            Some(r) => {
                hasher.update([1u8]);
                hasher.update(r.start.to_string().as_bytes());
                hasher.update(r.end.to_string().as_bytes());
            }
            None => hasher.update([0u8]),
        }

        hasher.update(view_mode.as_str().as_bytes());
        let scale = config.scale(view_mode);
        hasher.update(scale.cell_width.to_le_bytes());
        hasher.update(scale.gap.to_le_bytes());
        hasher.update(config.row_height.to_le_bytes());
        hasher.update([u8::from(config.dependency_arrows)]);
        hasher.update(today.to_string().as_bytes());

        Self(hasher.finalize().into())
    }

    /// Hex form of the fingerprint, for diagnostics.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Single-entry memo of the most recently computed layout.
///
/// A request with a different key replaces the entry, so a stale layout is
/// dropped as soon as a newer task list arrives.
#[derive(Debug, Default)]
pub struct LayoutCache {
    entry: Option<(LayoutKey, TimelineLayout)>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layout for tasks with a derived range, computed only on a key change.
    pub fn get_or_compute(
        &mut self,
        tasks: &[Task],
        view_mode: ViewMode,
        config: &LayoutConfig,
        today: NaiveDate,
    ) -> &TimelineLayout {
        let key = LayoutKey::new(tasks, None, view_mode, config, today);
        self.lookup(key, || compute_layout(tasks, view_mode, config, today))
    }

    /// Layout for tasks against an explicit range.
    pub fn get_or_compute_for_range(
        &mut self,
        tasks: &[Task],
        range: DateRange,
        view_mode: ViewMode,
        config: &LayoutConfig,
        today: NaiveDate,
    ) -> &TimelineLayout {
        let key = LayoutKey::new(tasks, Some(range), view_mode, config, today);
        self.lookup(key, || {
            layout_for_range(tasks, range, view_mode, config, today)
        })
    }

    fn lookup(
        &mut self,
        key: LayoutKey,
        compute: impl FnOnce() -> TimelineLayout,
    ) -> &TimelineLayout {
        let fresh = matches!(&self.entry, Some((cached, _)) if *cached == key);
        if fresh {
            self.hits += 1;
            trace!("Layout cache hit for {}", key.to_hex());
        } else {
            self.misses += 1;
            debug!("Layout cache miss for {}", key.to_hex());
            self.entry = None;
        }

        let (_, layout) = self.entry.get_or_insert_with(|| (key, compute()));
        layout
    }

    /// The cached layout, if any.
    pub fn current(&self) -> Option<&TimelineLayout> {
        self.entry.as_ref().map(|(_, layout)| layout)
    }

    /// Drop the cached layout.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
