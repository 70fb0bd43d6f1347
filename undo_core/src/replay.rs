//! Replays diff records against a live widget

use crate::diff::{DiffRecord, EditDirection};
use crate::widget::{char_count, SelectionMode, TextWidget};

/// Applies a record to the widget, restoring exact text and selection.
///
/// The record is applied as-is: `UndoStack::undo` already hands back the
/// reversed record, so the same path serves both directions. The target
/// range is `[base_offset, base_offset + len(text_before))`; no full-text
/// diff is ever recomputed, because each record is a minimal localized edit
/// whose anchor was exact at record time.
pub fn apply<W: TextWidget>(widget: &mut W, record: &DiffRecord) {
    let mode = if record.selected_after {
        SelectionMode::Select
    } else {
        match record.direction {
            EditDirection::Start => SelectionMode::Start,
            EditDirection::End => SelectionMode::End,
        }
    };

    widget.replace_range(
        &record.text_after,
        record.base_offset,
        char_count(&record.text_before),
        mode,
    );
}
