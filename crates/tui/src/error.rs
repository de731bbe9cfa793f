//! Error types for the TUI module.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Failed to initialize or restore the terminal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// The task file could not be read.
    #[error("Failed to read task file {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Task parsing or configuration error from the layout engine.
    #[error(transparent)]
    Core(#[from] ganttflow_core::CoreError),
}
