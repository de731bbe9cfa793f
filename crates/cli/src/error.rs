use ganttflow_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for the gantt CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// The task file could not be read
    #[error("Failed to read task file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Task parsing or configuration failure from the layout engine
    #[error(transparent)]
    Core(#[from] CoreError),

    /// JSON output could not be produced
    #[error("Failed to serialize output: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A command-line value that clap cannot check on its own
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    /// The error message followed by its chain of causes.
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(&format!("\n  caused by: {}", text));
            }
            source = cause.source();
        }
        message
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;
