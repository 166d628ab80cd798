//! Error handling for the trace-pretty binary.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for trace-pretty operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that end a trace-pretty run.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// An input line is not a valid JSON message.
    #[error("line {line}: invalid message: {source}")]
    Json {
        /// One-based input line number.
        line: usize,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The configuration file could not be parsed.
    #[error("configuration {}: {source}", path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A message could not be rendered.
    #[error("line {line}: {source}")]
    Render {
        /// One-based input line number.
        line: usize,
        /// Underlying rendering error.
        #[source]
        source: text_pretty::Error,
    },
    /// Some messages were skipped under `--keep-going`.
    #[error("{0} message(s) could not be rendered")]
    Skipped(usize),
}
