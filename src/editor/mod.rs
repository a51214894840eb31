//! Editable document text.
//!
//! A rope-backed buffer with a single selection, plus the toolbar commands
//! that wrap the selection in markdown syntax.

mod buffer;
mod commands;

pub use buffer::{EditorBuffer, Selection};
pub use commands::{
    CommandOutcome, PromptKind, PromptRequest, PromptResponse, ToolbarCommand, Wrap, apply,
    complete_prompt,
};
