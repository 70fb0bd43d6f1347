//! Generic undo stack with an undo/redo cursor

/// Maximum number of records kept on an [`UndoStack`].
///
/// Pushing past the bound drops the oldest record.
pub const MAX_UNDO_DEPTH: usize = 100;

/// A record that knows how to produce its own inverse.
///
/// `reversed` is what `undo` hands back; the default is the identity, which
/// suits full-state records. Diff-style records override it to swap their
/// before/after halves.
pub trait Reversible: Clone {
    fn reversed(&self) -> Self {
        self.clone()
    }
}

/// Bounded stack of reversible records with an undo/redo cursor.
///
/// The cursor counts applied records: `0` means nothing to undo. Pushing a
/// record truncates everything after the cursor (any new edit destroys redo
/// history), appends, and moves the cursor to the new end.
#[derive(Debug, Clone)]
pub struct UndoStack<T: Reversible> {
    records: Vec<T>,
    cursor: usize,
    max_depth: usize,
}

impl<T: Reversible> UndoStack<T> {
    /// Creates an empty stack with the default depth bound.
    pub fn new() -> Self {
        Self::with_max_depth(MAX_UNDO_DEPTH)
    }

    /// Creates an empty stack holding at most `max_depth` records.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            records: Vec::new(),
            cursor: 0,
            max_depth: max_depth.max(1),
        }
    }

    /// Returns true if there is a record to undo.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns true if there is a record to redo.
    pub fn can_redo(&self) -> bool {
        self.cursor < self.records.len()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recently applied record, if any.
    pub fn current(&self) -> Option<&T> {
        self.cursor.checked_sub(1).map(|i| &self.records[i])
    }

    /// Mutable access to the most recently applied record.
    ///
    /// This is what lets a classifier extend an open edit unit in place
    /// instead of pushing one record per keystroke.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.cursor.checked_sub(1).map(|i| &mut self.records[i])
    }

    /// Appends a record, destroying any redo tail.
    pub fn push(&mut self, record: T) {
        self.records.truncate(self.cursor);
        if self.records.len() == self.max_depth {
            self.records.remove(0);
        }
        self.records.push(record);
        self.cursor = self.records.len();
    }

    /// Steps the cursor back and returns the reversed record.
    ///
    /// Returns `None` if there is no history.
    pub fn undo(&mut self) -> Option<T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.records[self.cursor].reversed())
    }

    /// Steps the cursor forward and returns the stored record unchanged.
    ///
    /// Forward replay needs no reversal. Returns `None` if there is nothing
    /// to redo.
    pub fn redo(&mut self) -> Option<T> {
        if !self.can_redo() {
            return None;
        }
        let record = self.records[self.cursor].clone();
        self.cursor += 1;
        Some(record)
    }

    /// Empties the stack and resets the cursor.
    pub fn clear(&mut self) {
        self.records.clear();
        self.cursor = 0;
    }
}

impl<T: Reversible> Default for UndoStack<T> {
    fn default() -> Self {
        Self::new()
    }
}
