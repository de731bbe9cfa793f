//! Column and row virtualization.
//!
//! Wide ranges produce thousands of day columns; only the slice under the
//! viewport (plus an overscan margin) needs to be mounted. The math lives
//! behind [`Windowing`] so renderers and tests do not depend on any UI
//! framework's windowing primitive.

use serde::Serialize;
use std::ops::Range;

/// Default number of extra items mounted on each side of the viewport.
pub const DEFAULT_OVERSCAN: usize = 3;

/// A half-open `[start, end)` slice of item indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Computes which items of a uniformly sized list must be mounted.
pub trait Windowing {
    /// Visible slice for a scroll position.
    ///
    /// Implementations must return indices within `[0, item_count)` for any
    /// input, including negative offsets and offsets past the end.
    fn visible_range(
        &self,
        scroll_offset: i64,
        viewport_size: i64,
        item_size: i64,
        item_count: usize,
    ) -> VisibleRange;
}

/// Fixed-overscan windowing in constant time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnVirtualizer {
    overscan: usize,
}

impl ColumnVirtualizer {
    pub fn new(overscan: usize) -> Self {
        Self { overscan }
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }
}

impl Default for ColumnVirtualizer {
    fn default() -> Self {
        Self::new(DEFAULT_OVERSCAN)
    }
}

impl Windowing for ColumnVirtualizer {
    fn visible_range(
        &self,
        scroll_offset: i64,
        viewport_size: i64,
        item_size: i64,
        item_count: usize,
    ) -> VisibleRange {
        if item_count == 0 {
            return VisibleRange::empty();
        }

        let item_size = item_size.max(1);
        let viewport_size = viewport_size.max(0);
        let count = i64::try_from(item_count).unwrap_or(i64::MAX);
        let content_size = count.saturating_mul(item_size);

        // Scroll containers never rest outside [0, max_scroll]
        let max_scroll = content_size.saturating_sub(viewport_size).max(0);
        let offset = scroll_offset.clamp(0, max_scroll);

        let first = offset / item_size;
        let visible_end = offset.saturating_add(viewport_size).min(content_size);
        let last_exclusive = visible_end.saturating_add(item_size - 1) / item_size;
        let last_exclusive = last_exclusive.max(first + 1);

        let overscan = i64::try_from(self.overscan).unwrap_or(i64::MAX);
        let start = first.saturating_sub(overscan).max(0);
        let end = last_exclusive.saturating_add(overscan).min(count);

        VisibleRange::new(start as usize, end as usize)
    }
}
