use std::path::PathBuf;

use thiserror::Error;

/// Marko error types
#[derive(Error, Debug)]
pub enum MarkoError {
    #[error("{}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}: file is empty")]
    EmptyInput(String),

    #[error("too many arguments (expected 1 file)")]
    TooManyArguments,

    #[error("render failed: {0}")]
    Render(String),

    #[error("failed to start server: {0}")]
    Bind(#[source] std::io::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for marko operations
pub type Result<T> = std::result::Result<T, MarkoError>;
