use crate::editor::{self, CommandOutcome, PromptResponse, ToolbarCommand};
use crate::session::Session;
use crate::session::model::{
    ConfirmKind, EXPORT_FILE_NAME, EXPORT_MIME, Effect, NEW_FILE_CONFIRMATION, Pending,
};

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Editing
    /// The whole text was replaced (textarea input).
    Input(String),
    /// Select `anchor..head` (char offsets).
    Select(usize, usize),
    /// Insert text over the selection.
    Type(String),
    /// Delete the selection or the char before the caret.
    Backspace,

    // History
    Undo,
    Redo,

    // Toolbar
    Toolbar(ToolbarCommand),
    /// Answer to an `Effect::Prompt`.
    PromptAnswered(PromptResponse),
    /// Answer to an `Effect::Confirm`.
    ConfirmAnswered(bool),

    // Files
    /// Ask to clear the document; confirmed through `ConfirmAnswered`.
    NewFile,
    /// Contents of an imported file, `None` when nothing was picked.
    Import(Option<String>),
    Export,

    // View
    IncreaseFontSize,
    DecreaseFontSize,
    /// A drag of the pane divider, in px.
    ResizeSplit { proposed: f64, container: f64 },
    /// Viewport width in px.
    ViewportResized(u32),
}

impl Message {
    /// Whether the message touches the document, its history or its file.
    ///
    /// These are held back while a prompt or confirmation is open.
    pub const fn is_document_action(&self) -> bool {
        matches!(
            self,
            Self::Input(_)
                | Self::Select(..)
                | Self::Type(_)
                | Self::Backspace
                | Self::Undo
                | Self::Redo
                | Self::Toolbar(_)
                | Self::NewFile
                | Self::Import(_)
                | Self::Export
        )
    }
}

/// Apply `msg` and return the updated session.
///
/// While a prompt or confirmation is open only its answer and view
/// messages get through.
pub fn update(mut session: Session, msg: Message) -> Session {
    if session.is_waiting() && msg.is_document_action() {
        tracing::debug!("document action ignored while a dialog is open");
        return session;
    }
    match msg {
        // Editing
        Message::Input(text) => {
            session.buffer.set_text(&text);
            session.refresh();
        }
        Message::Select(anchor, head) => session.buffer.select(anchor, head),
        Message::Type(text) => {
            session.buffer.replace_selection(&text);
            session.refresh();
        }
        Message::Backspace => {
            if session.buffer.delete_back() {
                session.refresh();
            }
        }

        // History
        Message::Undo => session.undo(),
        Message::Redo => session.redo(),

        // Toolbar
        Message::Toolbar(command) => run_toolbar(&mut session, command),
        Message::PromptAnswered(response) => match session.pending.take() {
            Some(Pending::Prompt { request, selection }) => {
                if editor::complete_prompt(&mut session.buffer, &request, selection, response) {
                    session.refresh();
                }
            }
            other => session.pending = other,
        },
        Message::ConfirmAnswered(confirmed) => match session.pending.take() {
            Some(Pending::Confirm(ConfirmKind::NewFile)) => {
                if confirmed {
                    tracing::debug!("new file");
                    session.load("");
                }
            }
            other => session.pending = other,
        },

        // Files
        Message::NewFile => {
            session.pending = Some(Pending::Confirm(ConfirmKind::NewFile));
            session.effects.push(Effect::Confirm {
                message: NEW_FILE_CONFIRMATION,
            });
        }
        Message::Import(Some(text)) => {
            tracing::debug!(bytes = text.len(), "import");
            session.load(&text);
        }
        Message::Import(None) => {}
        Message::Export => {
            session.effects.push(Effect::Download {
                file_name: EXPORT_FILE_NAME,
                mime: EXPORT_MIME,
                bytes: session.buffer.text().into_bytes(),
            });
            session.buffer.mark_clean();
        }

        // View
        Message::IncreaseFontSize => {
            session.font_size.increase();
        }
        Message::DecreaseFontSize => {
            session.font_size.decrease();
        }
        Message::ResizeSplit {
            proposed,
            container,
        } => {
            session.layout.propose(proposed, container);
        }
        Message::ViewportResized(width) => session.layout.viewport_resized(width),
    }
    session
}

fn run_toolbar(session: &mut Session, command: ToolbarCommand) {
    let selection = session.buffer.selection();
    match editor::apply(&mut session.buffer, command) {
        CommandOutcome::Applied => session.refresh(),
        CommandOutcome::NeedsPrompt(request) => {
            session.effects.push(Effect::Prompt(request.clone()));
            session.pending = Some(Pending::Prompt { request, selection });
        }
        CommandOutcome::Ignored => {}
    }
}
