//! Main application state and event loop.

use std::collections::HashMap;
use std::io::{self, Stdout};
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::prelude::*;

use ganttflow_core::range::{first_of_month, last_of_month};
use ganttflow_core::{
    ColumnVirtualizer, DateRange, LayoutCache, LayoutConfig, ScrollEdge, Task, TimelineLayout,
    ViewMode, Viewport, compute_dependency_groups, compute_range, days_between, extend_range,
    scroll_edge,
};

use crate::error::TuiResult;
use crate::event::{
    is_down, is_left, is_page_left, is_page_right, is_quit, is_right, is_tab, is_today, is_up,
    poll_key,
};
use crate::ui;

/// Months of context added around today when it falls outside the range.
const TODAY_CONTEXT_MONTHS: i32 = 3;

/// Days covered by one horizontal scroll step.
fn bucket_days(mode: ViewMode) -> i64 {
    match mode {
        ViewMode::Day => 1,
        ViewMode::Week => 7,
        ViewMode::Month => 30,
    }
}

/// Main application state.
pub struct App {
    /// Tasks in display order, one row each.
    tasks: Vec<Task>,
    config: LayoutConfig,
    view_mode: ViewMode,
    today: NaiveDate,
    /// Calendar range; grows as the viewport nears either edge.
    range: DateRange,
    cache: LayoutCache,
    /// Timeline viewport in terminal cells.
    viewport: Viewport,
    virtualizer: ColumnVirtualizer,
    /// Dependency group of each linked task.
    groups: HashMap<String, usize>,
    /// Index of the selected task row.
    selected: usize,
    /// Whether the viewport has been sized and centred yet.
    positioned: bool,
    running: bool,
}

impl App {
    /// Create a new App for a loaded task list.
    pub fn new(
        tasks: Vec<Task>,
        config: LayoutConfig,
        view_mode: ViewMode,
        today: NaiveDate,
    ) -> Self {
        let range = compute_range(&tasks, today);
        let groups = compute_dependency_groups(&tasks);
        let virtualizer = ColumnVirtualizer::new(config.overscan);

        Self {
            tasks,
            config,
            view_mode,
            today,
            range,
            cache: LayoutCache::new(),
            viewport: Viewport::default(),
            virtualizer,
            groups,
            selected: 0,
            positioned: false,
            running: true,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn virtualizer(&self) -> &ColumnVirtualizer {
        &self.virtualizer
    }

    pub fn groups(&self) -> &HashMap<String, usize> {
        &self.groups
    }

    /// Get the selected task row.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Check if the application is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// First task row at the top of the viewport.
    pub fn first_row(&self) -> usize {
        (self.viewport.scroll_top / self.row_height()).max(0) as usize
    }

    /// The layout computed by the last [`App::ensure_layout`], if any.
    pub fn layout(&self) -> Option<&TimelineLayout> {
        self.cache.current()
    }

    /// Bring the cached layout up to date with the current range and mode.
    pub fn ensure_layout(&mut self) -> &TimelineLayout {
        self.cache.get_or_compute_for_range(
            &self.tasks,
            self.range,
            self.view_mode,
            &self.config,
            self.today,
        )
    }

    fn cell_width(&self) -> i64 {
        i64::from(self.config.scale(self.view_mode).cell_width).max(1)
    }

    fn row_height(&self) -> i64 {
        i64::from(self.config.row_height).max(1)
    }

    fn content_width(&self) -> i64 {
        self.range.day_count() as i64 * self.cell_width()
    }

    fn content_height(&self) -> i64 {
        self.tasks.len() as i64 * self.row_height()
    }

    fn offset_of(&self, date: NaiveDate) -> i64 {
        days_between(self.range.start, date) * self.cell_width()
    }

    /// Date of the column under the viewport's horizontal centre.
    pub fn date_at_center(&self) -> NaiveDate {
        let center = self.viewport.scroll_left + self.viewport.width / 2;
        let days = (center / self.cell_width()).clamp(0, self.range.day_count() as i64 - 1);
        self.range.start + chrono::Days::new(days as u64)
    }

    /// Resize the timeline viewport. The first call centres on today.
    pub fn resize(&mut self, width: i64, height: i64) {
        self.viewport.width = width.max(0);
        self.viewport.height = height.max(0);
        if self.positioned {
            self.clamp_viewport();
        } else {
            self.positioned = true;
            self.center_on_today();
        }
    }

    fn clamp_viewport(&mut self) {
        let (width, height) = (self.content_width(), self.content_height());
        self.viewport.clamp_to(width, height);
    }

    /// Scroll horizontally, extending the range when an edge comes near.
    pub fn scroll_horizontal(&mut self, dx: i64) {
        self.viewport.scroll_by(dx, 0);
        self.clamp_viewport();
        self.extend_at_edge();
    }

    /// Scroll by `buckets` columns of the current view mode.
    pub fn scroll_buckets(&mut self, buckets: i64) {
        let step = self.cell_width() * bucket_days(self.view_mode);
        self.scroll_horizontal(buckets * step);
    }

    /// Scroll by `pages` viewport widths.
    pub fn scroll_pages(&mut self, pages: i64) {
        let step = self.viewport.width.max(1);
        self.scroll_horizontal(pages * step);
    }

    /// Grow the range at the edge the viewport is near.
    ///
    /// Dates on screen stay where they are: growing at the leading edge
    /// shifts the scroll position by the width that was prepended.
    fn extend_at_edge(&mut self) {
        let threshold = i64::from(self.config.edge_threshold);
        let Some(edge) = scroll_edge(
            self.viewport.scroll_left,
            self.content_width(),
            self.viewport.width,
            threshold,
        ) else {
            return;
        };

        let extended = extend_range(self.range, edge);
        if extended == self.range {
            return;
        }

        let prepended = days_between(extended.start, self.range.start) * self.cell_width();
        self.range = extended;
        if edge == ScrollEdge::Leading {
            self.viewport.scroll_by(prepended, 0);
        }
        self.clamp_viewport();
    }

    /// Centre the viewport on `date`'s column.
    fn center_on_date(&mut self, date: NaiveDate) {
        let x = self.offset_of(date) + self.cell_width() / 2;
        self.viewport.center_on(x);
        self.clamp_viewport();
    }

    /// Centre on today, widening the range first if today is outside it.
    pub fn center_on_today(&mut self) {
        if !self.range.contains(self.today) {
            self.range = DateRange::new(
                self.range
                    .start
                    .min(first_of_month(self.today, -TODAY_CONTEXT_MONTHS)),
                self.range
                    .end
                    .max(last_of_month(self.today, TODAY_CONTEXT_MONTHS)),
            );
        }
        self.center_on_date(self.today);
    }

    /// Switch to the next view mode, keeping the centre date in view.
    pub fn next_view_mode(&mut self) {
        let center = self.date_at_center();
        self.view_mode = self.view_mode.next();
        self.center_on_date(center);
    }

    /// Select the next task row (clamps to the last row).
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
            self.reveal_selected();
        }
    }

    /// Select the previous task row (clamps to the first row).
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.reveal_selected();
        }
    }

    /// Scroll vertically just enough to show the selected row.
    fn reveal_selected(&mut self) {
        let top = self.selected as i64 * self.row_height();
        let bottom = top + self.row_height();
        if top < self.viewport.scroll_top {
            self.viewport.scroll_top = top;
        } else if bottom > self.viewport.scroll_top + self.viewport.height {
            self.viewport.scroll_top = bottom - self.viewport.height;
        }
        self.clamp_viewport();
    }

    /// Run the main application loop.
    ///
    /// This initializes the terminal, runs the event loop, and ensures
    /// the terminal is restored on exit (even on panic).
    pub async fn run(&mut self) -> TuiResult<()> {
        let mut terminal = init_terminal()?;

        // The guard runs restore_terminal() even if we panic
        let _guard = scopeguard::guard((), |()| {
            let _ = restore_terminal();
        });

        let result = self.event_loop(&mut terminal).await;

        drop(_guard);

        result
    }

    /// The main event loop.
    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> TuiResult<()> {
        while self.running {
            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            let (width, height) = ui::timeline_viewport_size(area);
            let resized = (width, height) != (self.viewport.width, self.viewport.height);
            if !self.positioned || resized {
                self.resize(width, height);
            }
            self.ensure_layout();

            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Some(key) = poll_key(Duration::from_millis(100))? {
                self.handle_key(&key);
            }
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    /// Handle a keyboard event.
    fn handle_key(&mut self, key: &KeyEvent) {
        if is_quit(key) {
            self.quit();
        } else if is_tab(key) {
            self.next_view_mode();
        } else if is_down(key) {
            self.select_next();
        } else if is_up(key) {
            self.select_previous();
        } else if is_left(key) {
            self.scroll_buckets(-1);
        } else if is_right(key) {
            self.scroll_buckets(1);
        } else if is_page_left(key) {
            self.scroll_pages(-1);
        } else if is_page_right(key) {
            self.scroll_pages(1);
        } else if is_today(key) {
            self.center_on_today();
        }
    }
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
