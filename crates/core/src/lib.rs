//! Timeline layout engine for GanttFlow
//!
//! Turns a task list into calendar-grid geometry: a padded date range, day
//! columns with month and week headers, positioned task bars, dependency
//! arrows, and the virtualized slice of all of that which a viewport needs.
//! Nothing here draws; renderers consume [`TimelineLayout`] and
//! [`TimelineFrame`].

pub mod bars;
pub mod config;
pub mod dependency;
pub mod error;
pub mod grid;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod range;
pub mod viewport;
pub mod virtualize;

pub use bars::{TaskBar, TaskBarPositioner, days_between};
pub use config::{LayoutConfig, ScaleConfig};
pub use dependency::{DependencyArrow, compute_dependency_groups, route_arrows};
pub use error::{CoreError, CoreResult};
pub use grid::{CalendarDay, CalendarGrid, MonthHeader, SubHeader};
pub use models::{
    Priority, Status, Task, TaskKind, ViewMode, parse_calendar_date, parse_date_arg, parse_tasks,
};
pub use pipeline::{LayoutCache, LayoutKey, TimelineLayout, compute_layout, layout_for_range};
pub use query::{DueWindow, SortBy, SortOrder, TaskFilter, TaskSort};
pub use range::{DateRange, ScrollEdge, compute_range, extend_range, scroll_edge};
pub use viewport::{TimelineFrame, Viewport};
pub use virtualize::{ColumnVirtualizer, VisibleRange, Windowing};

// Layouts are handed to background loaders and shared across threads
static_assertions::assert_impl_all!(TimelineLayout: Send, Sync);
static_assertions::assert_impl_all!(LayoutCache: Send, Sync);
