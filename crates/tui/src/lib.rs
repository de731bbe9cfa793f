//! TUI module for GanttFlow
//!
//! Provides a terminal Gantt chart for a JSON task list using ratatui and
//! crossterm. One layout unit is one terminal cell.

pub mod app;
pub mod data;
pub mod error;
pub mod event;
pub mod task_list;
pub mod timeline;
pub mod ui;

pub use app::App;
pub use data::load_tasks;
pub use error::{TuiError, TuiResult};
