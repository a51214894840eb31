//! Editor session state and its update loop.
//!
//! The session follows The Elm Architecture:
//! - [`Session`]: the complete editor state
//! - [`Message`]: everything the host can report
//! - [`update`]: takes a session and a message, returns the next session
//! - [`Effect`]: work the host performs afterwards (prompts, confirms,
//!   downloads), drained with [`Session::take_effects`]

mod input;
mod layout;
mod model;
mod starter;
mod update;

pub use input::{KeyChord, shortcut};
pub use layout::{
    DEFAULT_FONT_SIZE, FONT_SIZE_STEP, FontSize, MAX_FONT_SIZE, MIN_FONT_SIZE,
    NARROW_VIEWPORT_WIDTH, Orientation, SplitLayout,
};
pub use model::{
    ConfirmKind, EXPORT_FILE_NAME, EXPORT_MIME, Effect, NEW_FILE_CONFIRMATION, Session,
};
pub use starter::STARTER_DOCUMENT;
pub use update::{Message, update};

#[cfg(test)]
mod tests;
