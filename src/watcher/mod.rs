//! Watching a markdown file for live re-rendering.
//!
//! Uses notify for cross-platform file system events. The parent directory
//! is watched rather than the file itself, since many editors save by
//! writing a new file and renaming it over the old one.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{MarkpadError, Result};

/// Default quiet period before a burst of events counts as one change.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches one document and yields its new content after it changes.
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
    /// Content most recently handed out, to skip saves that change nothing.
    last_content: Option<String>,
}

impl DocumentWatcher {
    /// Create a watcher for `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the directory
    /// cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> Result<Self> {
        // Event paths from the OS are canonical.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(path = %target_path.display(), root = %watch_root.display(), "watching");

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debounce,
            pending_since: None,
            last_content: None,
        })
    }

    /// The canonical path of the watched document.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Remember `content` as already seen, so an event that leaves the file
    /// as it is yields nothing.
    pub fn mark_seen(&mut self, content: impl Into<String>) {
        self.last_content = Some(content.into());
    }

    /// New document content once a debounced change is ready.
    ///
    /// Returns `Ok(None)` while nothing has changed or the debounce period
    /// is still running.
    ///
    /// # Errors
    /// Returns an error if the changed file cannot be read.
    pub fn poll(&mut self) -> Result<Option<String>> {
        if !self.take_change_ready() {
            return Ok(None);
        }
        let content =
            std::fs::read_to_string(&self.target_path).map_err(|source| MarkpadError::Read {
                path: self.target_path.clone(),
                source,
            })?;
        if self.last_content.as_deref() == Some(content.as_str()) {
            tracing::debug!("change event without new content");
            return Ok(None);
        }
        self.last_content = Some(content.clone());
        Ok(Some(content))
    }

    /// Returns true once a debounced file change is ready.
    fn take_change_ready(&mut self) -> bool {
        let mut relevant = 0u32;
        let mut irrelevant = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(ev) => {
                    irrelevant += 1;
                    tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "irrelevant event");
                }
                Err(err) => tracing::warn!(%err, "watch error"),
            }
        }

        if relevant + irrelevant > 0 {
            tracing::debug!(relevant, irrelevant, "watcher poll");
        }
        if relevant > 0 {
            self.pending_since = Some(Instant::now());
        }

        let Some(pending_since) = self.pending_since else {
            return false;
        };
        if pending_since.elapsed() >= self.debounce {
            self.pending_since = None;
            return true;
        }
        false
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

impl std::fmt::Debug for DocumentWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentWatcher")
            .field("target_path", &self.target_path)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
