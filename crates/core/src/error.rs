use std::path::PathBuf;
use thiserror::Error;

/// Error types for the GanttFlow layout engine
///
/// Layout computations never fail. These errors only occur at the
/// boundaries: parsing task payloads and loading configuration.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A task payload was well-formed JSON but carried unusable values
    #[error("Invalid task '{task_id}': {reason}")]
    InvalidTask { task_id: String, reason: String },

    /// The task payload was not valid JSON for a task list
    #[error("Failed to parse task list: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading the configuration file
    #[error("Failed to read configuration at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file was readable but not valid JSON
    #[error("Malformed configuration at {path}: {source}")]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration values that would produce degenerate geometry
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias for layout engine operations
pub type CoreResult<T> = Result<T, CoreError>;
