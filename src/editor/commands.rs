//! Toolbar commands.
//!
//! Each command wraps the current selection (or a placeholder phrase when
//! nothing is selected) in markdown syntax and then selects the wrapped
//! text so the user can type over it.

use super::buffer::{EditorBuffer, Selection};

/// Markup placed around the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrap {
    pub before: String,
    pub after: String,
    /// Inserted between the markers when the selection is empty.
    pub default: &'static str,
}

impl Wrap {
    fn new(before: impl Into<String>, after: impl Into<String>, default: &'static str) -> Self {
        Self {
            before: before.into(),
            after: after.into(),
            default,
        }
    }

    /// Wrap the selection in `buffer`. Afterwards the inner text is
    /// selected.
    pub fn apply_to(&self, buffer: &mut EditorBuffer) {
        let start = buffer.selection().start();
        let selected = buffer.selected_text();
        let inner = if selected.is_empty() {
            self.default
        } else {
            selected.as_str()
        };

        let mut replacement = String::with_capacity(self.before.len() + inner.len() + self.after.len());
        replacement.push_str(&self.before);
        replacement.push_str(inner);
        replacement.push_str(&self.after);
        buffer.replace_selection(&replacement);

        let inner_start = start + self.before.chars().count();
        let inner_end = inner_start + inner.chars().count();
        buffer.select(inner_start, inner_end);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarCommand {
    Bold,
    Italic,
    Strikethrough,
    Highlight,
    /// `#` repeated `level` times. Level 0 does nothing.
    Heading(u8),
    Link,
    Image,
    Table,
    CodeBlock,
    MathBlock,
    Toc,
    Quote,
    UnorderedList,
    OrderedList,
    TaskList,
    HorizontalRule,
}

/// What a URL prompt is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    LinkUrl,
    ImageUrl,
}

/// A question the host must ask the user before a command can finish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub kind: PromptKind,
    pub message: &'static str,
    /// Pre-filled answer.
    pub default: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    Answered(String),
    Cancelled,
}

/// Result of running a toolbar command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The buffer was edited.
    Applied,
    /// The command needs an answer first; see [`complete_prompt`].
    NeedsPrompt(PromptRequest),
    /// Nothing to do.
    Ignored,
}

const URL_DEFAULT: &str = "https://";

impl ToolbarCommand {
    /// The wrap this command applies, for commands that need no prompt.
    pub fn wrap(self) -> Option<Wrap> {
        let wrap = match self {
            Self::Bold => Wrap::new("**", "**", "bold text"),
            Self::Italic => Wrap::new("*", "*", "italic text"),
            Self::Strikethrough => Wrap::new("~~", "~~", "strikethrough text"),
            Self::Highlight => Wrap::new("==", "==", "highlighted text"),
            Self::Heading(0) => return None,
            Self::Heading(level) => {
                Wrap::new(format!("{} ", "#".repeat(usize::from(level.min(6)))), "", "Heading")
            }
            Self::Link | Self::Image => return None,
            Self::Table => Wrap::new(
                "\n| Header 1 | Header 2 |\n|:---|:---|\n| Cell | Cell |\n",
                "",
                "",
            ),
            Self::CodeBlock => Wrap::new("\n```javascript\n", "\n```\n", "code"),
            Self::MathBlock => Wrap::new("$$\n", "\n$$", "E=mc^2"),
            Self::Toc => Wrap::new("\n[TOC]\n", "", ""),
            Self::Quote => Wrap::new("> ", "", "quoted text"),
            Self::UnorderedList => Wrap::new("\n- ", "", "list item"),
            Self::OrderedList => Wrap::new("\n1. ", "", "list item"),
            Self::TaskList => Wrap::new("\n- [ ] ", "", "task"),
            Self::HorizontalRule => Wrap::new("\n---\n", "", ""),
        };
        Some(wrap)
    }

    /// The prompt this command must raise before it can run.
    pub const fn prompt(self) -> Option<PromptRequest> {
        match self {
            Self::Link => Some(PromptRequest {
                kind: PromptKind::LinkUrl,
                message: "Link URL:",
                default: URL_DEFAULT,
            }),
            Self::Image => Some(PromptRequest {
                kind: PromptKind::ImageUrl,
                message: "Image URL:",
                default: URL_DEFAULT,
            }),
            _ => None,
        }
    }
}

impl PromptKind {
    fn wrap(self, url: &str) -> Wrap {
        match self {
            Self::LinkUrl => Wrap::new("[", format!("]({url})"), "link text"),
            Self::ImageUrl => Wrap::new("![", format!("]({url})"), "image description"),
        }
    }
}

/// Run `command` against `buffer`.
pub fn apply(buffer: &mut EditorBuffer, command: ToolbarCommand) -> CommandOutcome {
    if let Some(request) = command.prompt() {
        return CommandOutcome::NeedsPrompt(request);
    }
    match command.wrap() {
        Some(wrap) => {
            wrap.apply_to(buffer);
            CommandOutcome::Applied
        }
        None => CommandOutcome::Ignored,
    }
}

/// Finish a prompted command. `selection` is the selection at the time the
/// prompt was raised. Cancelled or empty answers insert nothing.
///
/// Returns whether the buffer was edited.
pub fn complete_prompt(
    buffer: &mut EditorBuffer,
    request: &PromptRequest,
    selection: Selection,
    response: PromptResponse,
) -> bool {
    let url = match response {
        PromptResponse::Answered(url) if !url.is_empty() => url,
        PromptResponse::Answered(_) | PromptResponse::Cancelled => return false,
    };
    buffer.select(selection.anchor, selection.head);
    request.kind.wrap(&url).apply_to(buffer);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with_selection(text: &str, start: usize, end: usize) -> EditorBuffer {
        let mut buffer = EditorBuffer::from_text(text);
        buffer.select(start, end);
        buffer
    }

    #[test]
    fn test_bold_wraps_selection_and_reselects() {
        let mut buffer = buffer_with_selection("make this loud", 5, 9);
        assert_eq!(apply(&mut buffer, ToolbarCommand::Bold), CommandOutcome::Applied);
        assert_eq!(buffer.text(), "make **this** loud");
        assert_eq!(buffer.selected_text(), "this");
    }

    #[test]
    fn test_empty_selection_uses_default_phrase() {
        let mut buffer = EditorBuffer::empty();
        apply(&mut buffer, ToolbarCommand::Italic);
        assert_eq!(buffer.text(), "*italic text*");
        assert_eq!(buffer.selected_text(), "italic text");
    }

    #[test]
    fn test_heading_levels() {
        let mut buffer = buffer_with_selection("Title", 0, 5);
        apply(&mut buffer, ToolbarCommand::Heading(3));
        assert_eq!(buffer.text(), "### Title");
        assert_eq!(buffer.selected_text(), "Title");
    }

    #[test]
    fn test_heading_zero_is_ignored() {
        let mut buffer = EditorBuffer::from_text("text");
        assert_eq!(apply(&mut buffer, ToolbarCommand::Heading(0)), CommandOutcome::Ignored);
        assert_eq!(buffer.text(), "text");
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_math_block_default() {
        let mut buffer = EditorBuffer::empty();
        apply(&mut buffer, ToolbarCommand::MathBlock);
        assert_eq!(buffer.text(), "$$\nE=mc^2\n$$");
        assert_eq!(buffer.selected_text(), "E=mc^2");
    }

    #[test]
    fn test_toc_and_rule_leave_empty_selection() {
        let mut buffer = EditorBuffer::from_text("x");
        buffer.select(1, 1);
        apply(&mut buffer, ToolbarCommand::Toc);
        assert_eq!(buffer.text(), "x\n[TOC]\n");
        assert!(buffer.selection().is_empty());
        assert_eq!(buffer.selection().head, 8);
    }

    #[test]
    fn test_task_list_inserts_on_new_line() {
        let mut buffer = buffer_with_selection("intro", 5, 5);
        apply(&mut buffer, ToolbarCommand::TaskList);
        assert_eq!(buffer.text(), "intro\n- [ ] task");
        assert_eq!(buffer.selected_text(), "task");
    }

    #[test]
    fn test_wrap_counts_chars_for_selection() {
        let mut buffer = buffer_with_selection("héllo wörld", 6, 11);
        apply(&mut buffer, ToolbarCommand::Highlight);
        assert_eq!(buffer.text(), "héllo ==wörld==");
        assert_eq!(buffer.selected_text(), "wörld");
    }

    #[test]
    fn test_link_needs_prompt() {
        let mut buffer = EditorBuffer::from_text("docs");
        let outcome = apply(&mut buffer, ToolbarCommand::Link);
        let CommandOutcome::NeedsPrompt(request) = outcome else {
            panic!("expected prompt, got {outcome:?}");
        };
        assert_eq!(request.kind, PromptKind::LinkUrl);
        assert_eq!(request.default, "https://");
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn test_link_prompt_answer_wraps_selection() {
        let mut buffer = buffer_with_selection("see docs", 4, 8);
        let selection = buffer.selection();
        let request = ToolbarCommand::Link.prompt().unwrap();
        let edited = complete_prompt(
            &mut buffer,
            &request,
            selection,
            PromptResponse::Answered("https://example.com".to_string()),
        );
        assert!(edited);
        assert_eq!(buffer.text(), "see [docs](https://example.com)");
        assert_eq!(buffer.selected_text(), "docs");
    }

    #[test]
    fn test_image_prompt_with_empty_selection() {
        let mut buffer = EditorBuffer::empty();
        let request = ToolbarCommand::Image.prompt().unwrap();
        complete_prompt(
            &mut buffer,
            &request,
            Selection::caret(0),
            PromptResponse::Answered("a.png".to_string()),
        );
        assert_eq!(buffer.text(), "![image description](a.png)");
    }

    #[test]
    fn test_cancelled_or_empty_prompt_inserts_nothing() {
        let request = ToolbarCommand::Link.prompt().unwrap();
        let mut buffer = EditorBuffer::from_text("keep");
        assert!(!complete_prompt(
            &mut buffer,
            &request,
            Selection::caret(0),
            PromptResponse::Cancelled
        ));
        assert!(!complete_prompt(
            &mut buffer,
            &request,
            Selection::caret(0),
            PromptResponse::Answered(String::new())
        ));
        assert_eq!(buffer.text(), "keep");
    }
}
