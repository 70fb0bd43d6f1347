//! Minimal reversible diff records for text edits

use serde::{Deserialize, Serialize};

use crate::history::Reversible;

/// Where the caret lands after replaying an edit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditDirection {
    /// Caret collapses to the start of the affected range
    Start,
    /// Caret collapses to the end of the affected range
    #[default]
    End,
}

/// Minimal reversible description of one text edit.
///
/// All offsets are in chars. `base_offset` is the anchor the edit happened
/// around; it is a property of the widget geometry, not of the edit
/// direction, so reversal leaves it (and `direction`) untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    /// Substring removed or replaced, as it existed before the edit
    pub text_before: String,
    /// Substring inserted, as it exists after the edit
    pub text_after: String,
    /// Offset where the edit began
    pub base_offset: usize,
    /// Caret landing side after replay
    pub direction: EditDirection,
    /// Whether a range was selected immediately before the edit
    pub selected_before: bool,
    /// Whether a range is selected immediately after the edit
    pub selected_after: bool,
}

impl Reversible for DiffRecord {
    /// Swaps the before/after halves so the same replay path serves undo.
    fn reversed(&self) -> Self {
        Self {
            text_before: self.text_after.clone(),
            text_after: self.text_before.clone(),
            base_offset: self.base_offset,
            direction: self.direction,
            selected_before: self.selected_after,
            selected_after: self.selected_before,
        }
    }
}
