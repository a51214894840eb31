use crate::editor::ToolbarCommand;
use crate::session::Message;

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub const fn new(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    pub const fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub const fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub const fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

/// The message bound to `chord`, if any.
///
/// `Some` means the host should swallow the key instead of letting the text
/// area handle it.
pub fn shortcut(chord: KeyChord) -> Option<Message> {
    if !(chord.ctrl || chord.meta) {
        return None;
    }
    match chord.key.to_ascii_lowercase() {
        'z' if chord.shift => Some(Message::Redo),
        'z' => Some(Message::Undo),
        'y' => Some(Message::Redo),
        'b' => Some(Message::Toolbar(ToolbarCommand::Bold)),
        'i' => Some(Message::Toolbar(ToolbarCommand::Italic)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_chords() {
        assert_eq!(shortcut(KeyChord::new('z').ctrl()), Some(Message::Undo));
        assert_eq!(shortcut(KeyChord::new('Z').ctrl().shift()), Some(Message::Redo));
        assert_eq!(shortcut(KeyChord::new('y').meta()), Some(Message::Redo));
    }

    #[test]
    fn test_formatting_chords() {
        assert_eq!(
            shortcut(KeyChord::new('b').meta()),
            Some(Message::Toolbar(ToolbarCommand::Bold))
        );
        assert_eq!(
            shortcut(KeyChord::new('I').ctrl()),
            Some(Message::Toolbar(ToolbarCommand::Italic))
        );
    }

    #[test]
    fn test_unbound_keys_pass_through() {
        assert_eq!(shortcut(KeyChord::new('z')), None);
        assert_eq!(shortcut(KeyChord::new('s').ctrl()), None);
        assert_eq!(shortcut(KeyChord::new('b').shift()), None);
    }
}
