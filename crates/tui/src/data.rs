//! Task file loading for the TUI.

use std::path::Path;

use ganttflow_core::{Task, parse_tasks};

use crate::error::{TuiError, TuiResult};

/// Read and parse a JSON task file without blocking the runtime.
pub async fn load_tasks(path: &Path) -> TuiResult<Vec<Task>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TuiError::Load {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_tasks(&json)?)
}
