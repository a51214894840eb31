use ropey::Rope;

/// A selection between two char offsets.
///
/// `anchor` is where the selection started, `head` where it ends (the
/// caret). They are equal when nothing is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    /// An empty selection (a caret) at `at`.
    pub const fn caret(at: usize) -> Self {
        Self {
            anchor: at,
            head: at,
        }
    }

    pub const fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub const fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn len(&self) -> usize {
        self.end() - self.start()
    }
}

/// A text buffer backed by a rope, with a single selection.
///
/// Offsets are in chars. Every edit goes through the selection: typing
/// replaces it, backspace deletes it (or the char before the caret).
#[derive(Clone)]
pub struct EditorBuffer {
    rope: Rope,
    selection: Selection,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string, caret at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::default(),
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Length in chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after export).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Select `anchor..head`, clamped to the text.
    pub fn select(&mut self, anchor: usize, head: usize) {
        let len = self.len_chars();
        self.selection = Selection::new(anchor.min(len), head.min(len));
    }

    /// The selected text, empty when nothing is selected.
    pub fn selected_text(&self) -> String {
        let sel = self.selection;
        self.rope.slice(sel.start()..sel.end()).to_string()
    }

    /// Replace the whole text. The caret moves to the end.
    pub fn set_text(&mut self, text: &str) {
        if self.rope == text {
            return;
        }
        self.rope = Rope::from_str(text);
        self.selection = Selection::caret(self.rope.len_chars());
        self.dirty = true;
    }

    /// Replace the selection with `text`, leaving the caret after it.
    pub fn replace_selection(&mut self, text: &str) {
        let start = self.selection.start();
        let end = self.selection.end();
        if start == end && text.is_empty() {
            return;
        }
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.selection = Selection::caret(start + text.chars().count());
        self.dirty = true;
    }

    /// Delete the selection, or the char before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        let sel = self.selection;
        if !sel.is_empty() {
            self.replace_selection("");
            return true;
        }
        if sel.head == 0 {
            return false;
        }
        self.rope.remove(sel.head - 1..sel.head);
        self.selection = Selection::caret(sel.head - 1);
        self.dirty = true;
        true
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("selection", &self.selection)
            .field("dirty", &self.dirty)
            .finish()
    }
}
