use crate::editor::{EditorBuffer, PromptRequest, Selection};
use crate::history::{DEFAULT_CAPACITY, History};
use crate::render::{Rendered, Renderer};
use crate::session::layout::{FontSize, SplitLayout};
use crate::session::starter::STARTER_DOCUMENT;

/// File name used when exporting.
pub const EXPORT_FILE_NAME: &str = "document.md";
/// MIME type used when exporting.
pub const EXPORT_MIME: &str = "text/markdown;charset=utf-8";

/// Question shown before discarding the document.
pub const NEW_FILE_CONFIRMATION: &str =
    "Create a new file? The current content will be lost.";

/// Work the host must do on the session's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask for a value; answer with `Message::PromptAnswered`.
    Prompt(PromptRequest),
    /// Ask yes/no; answer with `Message::ConfirmAnswered`.
    Confirm { message: &'static str },
    /// Offer a file for download.
    Download {
        file_name: &'static str,
        mime: &'static str,
        bytes: Vec<u8>,
    },
}

/// What an outstanding confirmation is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    NewFile,
}

/// A question waiting for the host's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Pending {
    Prompt {
        request: PromptRequest,
        /// Selection when the prompt was raised.
        selection: Selection,
    },
    Confirm(ConfirmKind),
}

/// The complete editor state.
///
/// Owned by the host and threaded through [`crate::session::update`].
#[derive(Debug)]
pub struct Session {
    /// Document text and selection.
    pub buffer: EditorBuffer,
    /// Latest render of the buffer.
    pub preview: Rendered,
    pub font_size: FontSize,
    pub layout: SplitLayout,
    pub(super) history: History,
    /// Set while undo/redo restores a snapshot so the render that follows
    /// does not record it again.
    pub(super) replaying: bool,
    pub(super) renderer: Renderer,
    pub(super) pending: Option<Pending>,
    pub(super) effects: Vec<Effect>,
}

impl Session {
    /// A session over `text` with the default renderer.
    pub fn new(text: &str) -> Self {
        Self::with_options(text, Renderer::default(), DEFAULT_CAPACITY)
    }

    /// A session opened on [`STARTER_DOCUMENT`].
    pub fn with_starter() -> Self {
        Self::new(STARTER_DOCUMENT)
    }

    pub fn with_options(text: &str, renderer: Renderer, history_capacity: usize) -> Self {
        let mut session = Self {
            buffer: EditorBuffer::from_text(text),
            preview: Rendered::default(),
            font_size: FontSize::default(),
            layout: SplitLayout::default(),
            history: History::with_capacity(history_capacity),
            replaying: false,
            renderer,
            pending: None,
            effects: Vec::new(),
        };
        session.refresh();
        session
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub const fn history(&self) -> &History {
        &self.history
    }

    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Whether a prompt or confirmation is waiting for an answer.
    pub const fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Drain the effects queued by previous updates.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Re-render the preview and, for user edits, record a snapshot.
    pub(super) fn refresh(&mut self) {
        let text = self.buffer.text();
        self.preview = self.renderer.render(&text);
        if !self.replaying {
            self.history.record(text);
        }
    }

    /// Show a history snapshot without recording it.
    pub(super) fn replay(&mut self, snapshot: &str) {
        self.replaying = true;
        self.buffer.set_text(snapshot);
        self.refresh();
        self.replaying = false;
    }

    pub(super) fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo().cloned() {
            tracing::debug!(cursor = ?self.history.cursor(), "undo");
            self.replay(&snapshot);
        }
    }

    pub(super) fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo().cloned() {
            tracing::debug!(cursor = ?self.history.cursor(), "redo");
            self.replay(&snapshot);
        }
    }

    /// Replace the document and start history over from it.
    pub(super) fn load(&mut self, text: &str) {
        self.pending = None;
        self.buffer = EditorBuffer::from_text(text);
        self.preview = self.renderer.render(text);
        self.history.reset(text.to_string());
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::with_starter()
    }
}
