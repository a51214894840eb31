//! Log output for the binary.
//!
//! Events go to stderr, or to a file when one is given. `RUST_LOG`
//! controls the filter; without it only warnings and errors are shown.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{MarkpadError, Result};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the global subscriber.
///
/// A second call leaves the first subscriber in place.
///
/// # Errors
/// Returns an error if `log_file` cannot be opened for appending.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter());
    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| MarkpadError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("markpad.log");
        let err = init(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, MarkpadError::Write { .. }));
    }

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("markpad.log");
        init(Some(path.as_path())).unwrap();
        assert!(path.exists());
        // A later call keeps the existing subscriber.
        init(None).unwrap();
    }
}
