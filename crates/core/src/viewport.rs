//! Scrollable viewport and frame composition.
//!
//! A [`TimelineFrame`] is everything a renderer needs to paint one viewport:
//! the mounted day columns, the header cells overlapping them, the bars in
//! the mounted rows and the today marker. Composition only culls; the
//! geometry itself comes unchanged from the [`TimelineLayout`].

use serde::Serialize;

use crate::bars::TaskBar;
use crate::grid::{CalendarDay, MonthHeader, SubHeader};
use crate::pipeline::TimelineLayout;
use crate::virtualize::{VisibleRange, Windowing};

/// Scroll position and size of the timeline's visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Viewport {
    pub scroll_left: i64,
    pub scroll_top: i64,
    pub width: i64,
    pub height: i64,
}

impl Viewport {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            scroll_left: 0,
            scroll_top: 0,
            width,
            height,
        }
    }

    pub fn with_scroll(mut self, scroll_left: i64, scroll_top: i64) -> Self {
        self.scroll_left = scroll_left;
        self.scroll_top = scroll_top;
        self
    }

    /// Scroll so that `x` sits in the horizontal centre.
    pub fn center_on(&mut self, x: i64) {
        self.scroll_left = x - self.width / 2;
    }

    pub fn scroll_by(&mut self, dx: i64, dy: i64) {
        self.scroll_left = self.scroll_left.saturating_add(dx);
        self.scroll_top = self.scroll_top.saturating_add(dy);
    }

    /// Keep the scroll position inside the content, like a browser does.
    pub fn clamp_to(&mut self, content_width: i64, content_height: i64) {
        let max_left = (content_width - self.width).max(0);
        let max_top = (content_height - self.height).max(0);
        self.scroll_left = self.scroll_left.clamp(0, max_left);
        self.scroll_top = self.scroll_top.clamp(0, max_top);
    }
}

/// The culled contents of one viewport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineFrame<'a> {
    pub viewport: Viewport,
    /// Mounted day columns
    pub columns: VisibleRange,
    /// Mounted task rows
    pub rows: VisibleRange,
    pub days: &'a [CalendarDay],
    pub months: Vec<&'a MonthHeader>,
    pub sub_headers: Vec<&'a SubHeader>,
    pub bars: Vec<&'a TaskBar>,
    /// Today marker offset, when it falls inside the mounted columns
    pub today_offset: Option<i64>,
    /// Left edge of the mounted span
    pub mounted_left: i64,
    /// Right edge (exclusive) of the mounted span
    pub mounted_right: i64,
}

impl<'a> TimelineFrame<'a> {
    /// Compose the frame for `viewport` using `windowing` for both axes.
    pub fn compose(
        layout: &'a TimelineLayout,
        viewport: Viewport,
        windowing: &impl Windowing,
    ) -> Self {
        let cell_width = layout.cell_width();
        let columns = windowing.visible_range(
            viewport.scroll_left,
            viewport.width,
            cell_width,
            layout.day_count(),
        );
        let rows = windowing.visible_range(
            viewport.scroll_top,
            viewport.height,
            layout.row_height,
            layout.bars.len(),
        );

        let mounted_left = columns.start as i64 * cell_width;
        let mounted_right = columns.end as i64 * cell_width;
        let overlaps = |offset: i64, width: i64| offset < mounted_right && offset + width > mounted_left;

        let months = layout
            .months()
            .iter()
            .filter(|m| overlaps(m.pixel_offset, m.pixel_width))
            .collect();
        let sub_headers = layout
            .sub_headers()
            .iter()
            .filter(|s| overlaps(s.pixel_offset, s.pixel_width))
            .collect();
        let bars = layout
            .bars
            .iter()
            .filter(|b| rows.contains(b.row_index) && b.intersects(mounted_left, mounted_right))
            .collect();
        let today_offset = layout
            .today_offset
            .filter(|x| (mounted_left..mounted_right).contains(x));

        Self {
            viewport,
            columns,
            rows,
            days: &layout.days()[columns.indices()],
            months,
            sub_headers,
            bars,
            today_offset,
            mounted_left,
            mounted_right,
        }
    }
}
