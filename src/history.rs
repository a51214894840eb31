//! Bounded undo/redo history of document snapshots.
//!
//! Snapshots are whole documents. The cursor points at the snapshot that
//! matches the current text; undo and redo move it and hand back the
//! snapshot to restore. Recording while the cursor is mid-stack discards
//! everything after it.

use std::collections::VecDeque;

/// Snapshots kept before the oldest is dropped.
pub const DEFAULT_CAPACITY: usize = 100;

/// Where the cursor sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// Nothing recorded.
    Empty,
    /// Cursor on the newest snapshot; nothing to redo.
    AtHead,
    /// Cursor behind the newest snapshot; redo is available.
    MidStack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History<T = String> {
    entries: VecDeque<T>,
    cursor: Option<usize>,
    capacity: usize,
}

impl<T: Clone + PartialEq> History<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A history holding at most `capacity` snapshots (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            cursor: None,
            capacity,
        }
    }

    /// Record a snapshot after a user edit.
    ///
    /// Drops the redo branch first. A snapshot equal to the newest entry is
    /// not stored again. Returns whether an entry was appended.
    pub fn record(&mut self, snapshot: T) -> bool {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }

        if self.entries.back() == Some(&snapshot) {
            return false;
        }

        self.entries.push_back(snapshot);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = Some(self.entries.len() - 1);
        true
    }

    /// Step back. Returns the snapshot to restore, or `None` at the oldest
    /// entry.
    pub fn undo(&mut self) -> Option<&T> {
        let cursor = self.cursor.filter(|c| *c > 0)? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    /// Step forward. Returns the snapshot to restore, or `None` at the
    /// newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        let cursor = self.cursor? + 1;
        if cursor >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor);
        self.entries.get(cursor)
    }

    /// Forget everything and start again from `snapshot`.
    pub fn reset(&mut self, snapshot: T) {
        self.entries.clear();
        self.entries.push_back(snapshot);
        self.cursor = Some(0);
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    pub fn state(&self) -> HistoryState {
        match self.cursor {
            None => HistoryState::Empty,
            Some(_) if self.can_redo() => HistoryState::MidStack,
            Some(_) => HistoryState::AtHead,
        }
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> Option<&T> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

impl<T: Clone + PartialEq> Default for History<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(snapshots: &[&str]) -> History {
        let mut history = History::new();
        for snapshot in snapshots {
            history.record((*snapshot).to_string());
        }
        history
    }

    #[test]
    fn test_new_history_is_empty() {
        let history: History = History::new();
        assert_eq!(history.state(), HistoryState::Empty);
        assert_eq!(history.cursor(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_duplicate_snapshot_is_recorded_once() {
        let mut history = history_of(&["a"]);
        assert!(!history.record("a".to_string()));
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = History::new();
        for i in 0..=100 {
            history.record(i.to_string());
        }
        assert_eq!(history.len(), 100);
        assert_eq!(history.entries().next().map(String::as_str), Some("1"));
        assert_eq!(history.cursor(), Some(99));
        assert_eq!(history.current().map(String::as_str), Some("100"));
    }

    #[test]
    fn test_undo_then_redo_restores() {
        let mut history = history_of(&["a", "ab"]);
        assert_eq!(history.undo().map(String::as_str), Some("a"));
        assert_eq!(history.state(), HistoryState::MidStack);
        assert_eq!(history.redo().map(String::as_str), Some("ab"));
        assert_eq!(history.state(), HistoryState::AtHead);
    }

    #[test]
    fn test_undo_at_oldest_is_noop() {
        let mut history = history_of(&["a"]);
        assert_eq!(history.undo(), None);
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn test_redo_at_head_is_noop() {
        let mut history = history_of(&["a", "b"]);
        assert_eq!(history.redo(), None);
        assert_eq!(history.cursor(), Some(1));
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut history: History = History::new();
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_divergent_edit_prunes_redo_branch() {
        let mut history = history_of(&["a", "ab", "abc"]);
        history.undo();
        history.undo();
        history.record("ax".to_string());
        let entries: Vec<_> = history.entries().map(String::as_str).collect();
        assert_eq!(entries, vec!["a", "ax"]);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_recording_current_snapshot_mid_stack_still_prunes() {
        let mut history = history_of(&["a", "b"]);
        history.undo();
        assert!(!history.record("a".to_string()));
        assert_eq!(history.len(), 1);
        assert_eq!(history.state(), HistoryState::AtHead);
    }

    #[test]
    fn test_reset_keeps_single_snapshot() {
        let mut history = history_of(&["a", "b", "c"]);
        history.reset(String::new());
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), Some(0));
        assert_eq!(history.state(), HistoryState::AtHead);
    }

    #[test]
    fn test_capacity_floor() {
        let mut history = History::with_capacity(0);
        history.record("a".to_string());
        history.record("b".to_string());
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current().map(String::as_str), Some("b"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Record(u8),
            Undo,
            Redo,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => (0u8..6).prop_map(Op::Record),
                1 => Just(Op::Undo),
                1 => Just(Op::Redo),
            ]
        }

        proptest! {
            #[test]
            fn cursor_stays_in_bounds(ops in prop::collection::vec(op(), 0..300), cap in 1usize..12) {
                let mut history: History<u8> = History::with_capacity(cap);
                for op in ops {
                    match op {
                        Op::Record(v) => { history.record(v); }
                        Op::Undo => { history.undo(); }
                        Op::Redo => { history.redo(); }
                    }
                    prop_assert!(history.len() <= cap);
                    match history.cursor() {
                        None => prop_assert!(history.is_empty()),
                        Some(c) => prop_assert!(c < history.len()),
                    }
                }
            }

            #[test]
            fn adjacent_entries_differ(values in prop::collection::vec(0u8..3, 0..100)) {
                let mut history: History<u8> = History::new();
                for v in values {
                    history.record(v);
                }
                let entries: Vec<_> = history.entries().copied().collect();
                for pair in entries.windows(2) {
                    prop_assert_ne!(pair[0], pair[1]);
                }
            }

            #[test]
            fn undo_then_redo_is_identity(values in prop::collection::vec(any::<u8>(), 1..50), steps in 0usize..50) {
                let mut history: History<u8> = History::new();
                for v in values {
                    history.record(v);
                }
                let head = history.current().copied();
                let mut undone = 0;
                for _ in 0..steps {
                    if history.undo().is_some() {
                        undone += 1;
                    }
                }
                for _ in 0..undone {
                    prop_assert!(history.redo().is_some());
                }
                prop_assert_eq!(history.current().copied(), head);
            }
        }
    }
}
