//! Task file loading and filter argument parsing helpers

use ganttflow_core::{Priority, Status, Task, parse_tasks};
use std::path::Path;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Read and parse a JSON task list from disk.
pub fn load_tasks(path: &Path) -> CliResult<Vec<Task>> {
    let content = std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let tasks = parse_tasks(&content)?;
    debug!("Loaded {} tasks from {}", tasks.len(), path.display());
    Ok(tasks)
}

/// Parse a status argument
pub fn parse_status(s: &str) -> Result<Status, String> {
    Status::parse(s).ok_or_else(|| {
        format!(
            "invalid status '{}'. Valid values: not_started, in_progress, completed, on_hold",
            s
        )
    })
}

/// Parse a priority argument
pub fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s)
        .ok_or_else(|| format!("invalid priority '{}'. Valid values: low, medium, high", s))
}
