//! Library error type.

use std::path::PathBuf;

/// Errors surfaced by the markpad library.
///
/// Rendering itself never fails: malformed markdown and math degrade to
/// best-effort output. Only I/O at the edges produces errors.
#[derive(Debug, thiserror::Error)]
pub enum MarkpadError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file watcher unavailable: {0}")]
    Watch(#[from] notify::Error),

    #[error("syntax theme stylesheet: {0}")]
    Stylesheet(String),
}

pub type Result<T> = std::result::Result<T, MarkpadError>;
