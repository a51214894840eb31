// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderOptions)
    clippy::module_name_repetitions
)]

//! # Markpad
//!
//! The core of a live-preview markdown editor.
//!
//! Markpad turns markdown into preview HTML with:
//! - Math kept intact through markdown parsing, then typeset by KaTeX in
//!   the browser or as MathML in process
//! - Heading anchors and a `[TOC]` table of contents
//! - Syntax-highlighted, line-numbered code blocks
//! - Task lists and `==highlight==` marks
//!
//! ## Architecture
//!
//! The editor session uses The Elm Architecture (TEA) pattern:
//! - **Session**: Editor state (text, selection, history, preview)
//! - **Message**: Edits, toolbar commands, file and view events
//! - **Update**: State transitions, re-rendering after every edit
//! - **Effect**: Prompts, confirmations and downloads for the host
//!
//! ## Modules
//!
//! - [`math`]: Math isolation around markdown parsing
//! - [`render`]: Markdown to HTML with pluggable rules
//! - [`toc`]: Table of contents
//! - [`typeset`]: KaTeX options and MathML typesetting
//! - [`highlight`]: Syntax highlighting
//! - [`history`]: Undo/redo snapshots
//! - [`editor`]: Text buffer and toolbar commands
//! - [`session`]: Editor state and update loop
//! - [`page`]: Standalone HTML page
//! - [`watcher`]: File watching
//! - [`config`]: Saved command-line defaults

pub mod config;
pub mod editor;
pub mod error;
mod escape;
pub mod highlight;
pub mod history;
pub mod logging;
pub mod math;
pub mod page;
pub mod render;
pub mod session;
pub mod toc;
pub mod typeset;
pub mod watcher;

pub use error::{MarkpadError, Result};
pub use render::{Rendered, Renderer, render};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::editor::{PromptResponse, ToolbarCommand};
    pub use crate::render::{RenderOptions, Rendered, Renderer};
    pub use crate::session::{Effect, Message, Session, update};
    pub use crate::toc::TocEntry;
}
