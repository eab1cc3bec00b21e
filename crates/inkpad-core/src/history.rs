//! Linear undo/redo history over committed marks.

use crate::marks::Mark;
use serde::{Deserialize, Serialize};

/// The committed drawing plus the marks available for redo.
///
/// Two stacks instead of an index into one flat list: commit, undo and
/// redo map directly onto pushes and pops, and clearing the redo stack on
/// every commit enforces strict linear history with no branching
/// timelines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    /// Committed marks, oldest first.
    committed: Vec<Mark>,
    /// Undone marks, most recently undone last.
    #[serde(skip)]
    redo_stack: Vec<Mark>,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mark to the drawing. Invalidates the redo path.
    pub fn commit(&mut self, mark: Mark) {
        log::debug!("commit mark {} ({} committed)", mark.id(), self.committed.len() + 1);
        self.committed.push(mark);
        self.redo_stack.clear();
    }

    /// Move the most recent mark to the redo stack.
    /// Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(mark) => {
                self.redo_stack.push(mark);
                true
            }
            None => {
                log::debug!("undo requested with nothing to undo");
                false
            }
        }
    }

    /// Move the most recently undone mark back onto the drawing.
    /// Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(mark) => {
                self.committed.push(mark);
                true
            }
            None => {
                log::debug!("redo requested with nothing to redo");
                false
            }
        }
    }

    /// Drop both the drawing and the redo stack.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.redo_stack.clear();
    }

    /// Read-only chronological view of the committed marks.
    pub fn marks(&self) -> &[Mark] {
        &self.committed
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of committed marks.
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    /// Check if the drawing is empty.
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::{Rgba, Sticker, Stroke};
    use kurbo::Point;

    fn stroke(x: f64) -> Mark {
        Mark::Stroke(Stroke::new(Point::new(x, 0.0), 1.0, Rgba::black()))
    }

    #[test]
    fn test_undo_restores_state_before_last_commit() {
        let mut history = History::new();
        let a = stroke(1.0);
        let a_id = a.id();

        history.commit(a);
        history.commit(stroke(2.0));
        assert!(history.undo());

        assert_eq!(history.len(), 1);
        assert_eq!(history.marks()[0].id(), a_id);
    }

    #[test]
    fn test_commit_clears_redo_stack() {
        let mut history = History::new();
        history.commit(stroke(1.0));
        assert!(history.undo());
        assert!(history.can_redo());

        history.commit(stroke(2.0));
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_then_redo_is_identity() {
        let mut history = History::new();
        history.commit(stroke(1.0));
        history.commit(stroke(2.0));
        let before: Vec<_> = history.marks().iter().map(Mark::id).collect();

        assert!(history.undo());
        assert!(history.redo());

        let after: Vec<_> = history.marks().iter().map(Mark::id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_clear_resets_both_stacks() {
        let mut history = History::new();
        history.commit(stroke(1.0));
        history.commit(stroke(2.0));
        assert!(history.undo());

        history.clear();

        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.undo());
        assert!(!history.redo());
    }

    #[test]
    fn test_undo_redo_round_trip_two_strokes() {
        // commit A, commit B, undo -> [A] with B redoable; redo -> [A, B].
        let mut history = History::new();
        let a = stroke(1.0);
        let b = stroke(2.0);
        let (a_id, b_id) = (a.id(), b.id());

        history.commit(a);
        history.commit(b);

        assert!(history.undo());
        assert_eq!(history.len(), 1);
        assert_eq!(history.marks()[0].id(), a_id);
        assert!(history.can_redo());

        assert!(history.redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.marks()[1].id(), b_id);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_after_undo_discards_stale_redo_entry() {
        let mut history = History::new();
        history.commit(stroke(1.0));
        assert!(history.undo());

        let c = Mark::Sticker(Sticker::new("⭐", Point::new(5.0, 5.0)));
        let c_id = c.id();
        history.commit(c);

        assert_eq!(history.len(), 1);
        assert_eq!(history.marks()[0].id(), c_id);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut history = History::new();
        assert!(!history.undo());
        assert!(history.is_empty());
        assert!(!history.can_redo());
    }
}
