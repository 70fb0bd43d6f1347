//! Edit-intent classification and diff construction
//!
//! Turns the host's edit-intent stream into a minimal number of diff
//! records, matching how a native editor groups keystrokes into undo units.
//! An open edit unit is always the top record of the stack and is extended
//! in place, so invoking undo mid-unit needs no separate flush step.

use core::mem;

use edit_types::EditKind;
use log::{debug, trace};

use crate::diff::{DiffRecord, EditDirection};
use crate::error::{UndoError, UndoResult};
use crate::history::UndoStack;
use crate::widget::{char_count, char_slice, TextWidget};

/// Selected range captured before the host mutates content.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RangeCapture {
    start: usize,
    end: usize,
    text: String,
}

impl RangeCapture {
    fn of<W: TextWidget>(widget: &W) -> Self {
        let start = widget.selection_start();
        let end = widget.selection_end();
        Self {
            start,
            end,
            text: char_slice(&widget.text(), start, end),
        }
    }
}

/// Pre-edit capture for a deletion, taken before the host removes content.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingCapture {
    /// The one char preceding the caret (backward delete, no range)
    Preceding { offset: usize, text: String },
    /// The one char following the caret (forward delete, no range)
    Following { offset: usize, text: String },
    /// The selected substring (any ranged edit, and cut)
    Range(RangeCapture),
    /// Full pre-edit text plus caret (word-level deletes)
    FullText { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEdit {
    kind: EditKind,
    capture: PendingCapture,
}

/// Widget text and selection snapshotted when an IME composition starts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CompositionSnapshot {
    text: String,
    selection: Option<RangeCapture>,
}

/// Classifier state machine
#[derive(Debug, Clone, PartialEq, Eq)]
enum ClassifierState {
    Idle,
    /// Inside an IME composition
    Composing(CompositionSnapshot),
    /// A pre-edit capture is waiting for its commit
    PendingDelete(PendingEdit),
}

/// Stateful adapter from edit-intent events to diff-record pushes.
///
/// Lifetime is one attached widget; the owner resets it on reattachment.
pub struct Classifier {
    state: ClassifierState,
    /// Kind tag of the last committed edit, for boundary detection.
    /// `None` guarantees the next edit starts a new unit.
    last_kind: Option<EditKind>,
    /// Clipboard text cached at paste time, since the clipboard is no
    /// longer available when the paste commit arrives.
    pending_clipboard: Option<String>,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            state: ClassifierState::Idle,
            last_kind: None,
            pending_clipboard: None,
        }
    }

    /// Resets all transient state, as on widget reattachment.
    pub fn reset(&mut self) {
        self.state = ClassifierState::Idle;
        self.last_kind = None;
        self.pending_clipboard = None;
    }

    /// Forces the next committed edit to start a new undo unit.
    ///
    /// Called on explicit undo/redo and on externally pushed records.
    pub fn force_boundary(&mut self) {
        self.state = ClassifierState::Idle;
        self.last_kind = None;
        self.pending_clipboard = None;
    }

    /// An IME composition begins: snapshot the pre-composition text.
    pub fn composition_start<W: TextWidget>(&mut self, widget: &W) {
        self.last_kind = None;
        let selection = widget.has_range_selection().then(|| RangeCapture::of(widget));
        self.state = ClassifierState::Composing(CompositionSnapshot {
            text: widget.text(),
            selection,
        });
        trace!("composition start");
    }

    /// Caches clipboard text for the upcoming paste commit.
    pub fn paste(&mut self, text: String) {
        self.pending_clipboard = Some(text);
    }

    /// Captures the "before" text a deletion commit will need.
    pub fn pre_edit<W: TextWidget>(
        &mut self,
        widget: &W,
        kind: EditKind,
        has_range_selection: bool,
    ) {
        if matches!(self.state, ClassifierState::Composing(_)) {
            // The composition pair carries the whole unit.
            return;
        }
        if kind == EditKind::DeleteByDrag {
            // The removal half of a drag move; the following drop commit
            // carries the undoable unit.
            return;
        }

        let capture = if has_range_selection || kind == EditKind::DeleteByCut {
            PendingCapture::Range(RangeCapture::of(widget))
        } else {
            let caret = widget.selection_start();
            match kind {
                EditKind::DeleteContentBackward => PendingCapture::Preceding {
                    offset: caret.saturating_sub(1),
                    text: char_slice(&widget.text(), caret.saturating_sub(1), caret),
                },
                EditKind::DeleteContentForward => PendingCapture::Following {
                    offset: caret,
                    text: char_slice(&widget.text(), caret, caret + 1),
                },
                EditKind::DeleteWordBackward | EditKind::DeleteWordForward => {
                    PendingCapture::FullText {
                        text: widget.text(),
                    }
                }
                // Inserts without a range need no capture.
                _ => return,
            }
        };

        self.state = ClassifierState::PendingDelete(PendingEdit { kind, capture });
    }

    /// The host mutated content: decide the boundary and record the edit.
    pub fn commit<W: TextWidget>(
        &mut self,
        history: &mut UndoStack<DiffRecord>,
        widget: &W,
        kind: EditKind,
        data: Option<String>,
    ) -> UndoResult<()> {
        if kind == EditKind::InsertCompositionText {
            // Judged by the dedicated composition events.
            return Ok(());
        }
        if matches!(self.state, ClassifierState::Composing(_)) {
            return Ok(());
        }
        if kind == EditKind::DeleteByDrag {
            self.state = ClassifierState::Idle;
            return Ok(());
        }

        // A cached clipboard only ever feeds the very next paste commit.
        if kind != EditKind::InsertFromPaste {
            self.pending_clipboard = None;
        }

        let pending = self.take_pending();

        // Keyboard text is re-classified by its literal so whitespace and
        // plain strings form distinct merge classes; so are kinds outside
        // the taxonomy that still carry literal data.
        let unit_kind = match &kind {
            EditKind::InsertString | EditKind::Other(_) => match &data {
                Some(text) => EditKind::classify_text(text),
                None => return Err(UndoError::UnclassifiableEdit { kind }),
            },
            _ => kind.clone(),
        };

        if unit_kind.is_delete() {
            self.commit_delete(history, widget, unit_kind, pending)
        } else {
            self.commit_insert(history, widget, unit_kind, data, pending)
        }
    }

    /// An IME composition ended: push the composed unit, unless cancelled.
    pub fn composition_end<W: TextWidget>(
        &mut self,
        history: &mut UndoStack<DiffRecord>,
        widget: &W,
        final_text: String,
    ) {
        let snapshot = match mem::replace(&mut self.state, ClassifierState::Idle) {
            ClassifierState::Composing(snapshot) => snapshot,
            _ => {
                // End without a start; nothing recorded, but still a boundary.
                self.last_kind = None;
                return;
            }
        };
        self.last_kind = None;

        if widget.text() == snapshot.text {
            debug!("composition cancelled, nothing to record");
            return;
        }

        let caret = widget.selection_start();
        let (text_before, base_offset, selected_before) = match snapshot.selection {
            Some(range) => (range.text, range.start, true),
            None => (
                String::new(),
                caret.saturating_sub(char_count(&final_text)),
                false,
            ),
        };

        self.push_record(
            history,
            DiffRecord {
                text_before,
                text_after: final_text,
                base_offset,
                direction: EditDirection::End,
                selected_before,
                selected_after: false,
            },
        );
    }

    fn take_pending(&mut self) -> Option<PendingEdit> {
        match mem::replace(&mut self.state, ClassifierState::Idle) {
            ClassifierState::PendingDelete(pending) => Some(pending),
            _ => None,
        }
    }

    /// Whether an edit of `unit_kind` may extend the current open unit.
    ///
    /// A caret move between two edits produces no event, so the kind check
    /// alone cannot rule one out; each merge branch additionally requires
    /// the new fragment to be contiguous with the open record.
    fn merges_with_last(&self, unit_kind: &EditKind) -> bool {
        if unit_kind.forces_boundary() {
            return false;
        }
        match (&self.last_kind, unit_kind) {
            (Some(prev), kind) if prev == kind => true,
            // Typing a word after a space continues the unit the space
            // started; the reverse transition still boundaries normally.
            (Some(EditKind::InsertWhiteSpace), EditKind::InsertString) => true,
            _ => false,
        }
    }

    fn commit_delete<W: TextWidget>(
        &mut self,
        history: &mut UndoStack<DiffRecord>,
        widget: &W,
        kind: EditKind,
        pending: Option<PendingEdit>,
    ) -> UndoResult<()> {
        let Some(pending) = pending else {
            return Err(UndoError::MissingPreEdit { kind });
        };

        match pending.capture {
            PendingCapture::Range(range) => {
                self.last_kind = None;
                if range.text.is_empty() {
                    // Cut with nothing selected; boundary only.
                    return Ok(());
                }
                self.push_record(
                    history,
                    DiffRecord {
                        text_before: range.text,
                        text_after: String::new(),
                        base_offset: range.start,
                        direction: EditDirection::Start,
                        selected_before: true,
                        selected_after: false,
                    },
                );
            }
            PendingCapture::Preceding { offset, text } => {
                if text.is_empty() {
                    // Backspace at offset 0 removes nothing.
                    return Ok(());
                }
                if self.merges_with_last(&kind) {
                    if let Some(top) = history.current_mut() {
                        // Contiguous only if this delete ate the char just
                        // left of the open unit's base.
                        if offset + 1 == top.base_offset {
                            top.text_before.insert_str(0, &text);
                            top.base_offset = offset;
                            trace!("extend backward delete, base now {}", offset);
                            self.last_kind = Some(kind);
                            return Ok(());
                        }
                    }
                }
                self.last_kind = Some(kind);
                self.push_record(
                    history,
                    DiffRecord {
                        text_before: text,
                        base_offset: offset,
                        direction: EditDirection::Start,
                        ..Default::default()
                    },
                );
            }
            PendingCapture::Following { offset, text } => {
                if text.is_empty() {
                    return Ok(());
                }
                if self.merges_with_last(&kind) {
                    if let Some(top) = history.current_mut() {
                        // Forward deletes keep eating at the open unit's
                        // base; any other offset means the caret moved.
                        if offset == top.base_offset {
                            top.text_before.push_str(&text);
                            trace!("extend forward delete at {}", top.base_offset);
                            self.last_kind = Some(kind);
                            return Ok(());
                        }
                    }
                }
                self.last_kind = Some(kind);
                self.push_record(
                    history,
                    DiffRecord {
                        text_before: text,
                        base_offset: offset,
                        direction: EditDirection::End,
                        ..Default::default()
                    },
                );
            }
            PendingCapture::FullText { text: pre_text } => {
                // Word-level delete: recover the removed span from the
                // length delta, anchored at the commit-time caret. The
                // direction split is a documented limitation, not verified
                // native behavior.
                self.last_kind = None;
                let removed_count =
                    char_count(&pre_text).saturating_sub(char_count(&widget.text()));
                if removed_count == 0 {
                    return Ok(());
                }
                let base = widget.selection_start();
                let direction = if kind.is_forward_delete() {
                    EditDirection::End
                } else {
                    EditDirection::Start
                };
                self.push_record(
                    history,
                    DiffRecord {
                        text_before: char_slice(&pre_text, base, base + removed_count),
                        base_offset: base,
                        direction,
                        ..Default::default()
                    },
                );
            }
        }
        Ok(())
    }

    fn commit_insert<W: TextWidget>(
        &mut self,
        history: &mut UndoStack<DiffRecord>,
        widget: &W,
        unit_kind: EditKind,
        data: Option<String>,
        pending: Option<PendingEdit>,
    ) -> UndoResult<()> {
        if unit_kind == EditKind::InsertFromDrop {
            return self.commit_drop(history, widget, data);
        }

        let literal = match unit_kind {
            // Hosts report line breaks without literal data.
            EditKind::InsertLineBreak => data.unwrap_or_else(|| "\n".into()),
            EditKind::InsertFromPaste => {
                match data.or_else(|| self.pending_clipboard.take()) {
                    Some(text) => text,
                    None => return Err(UndoError::UnclassifiableEdit { kind: unit_kind }),
                }
            }
            _ => match data {
                Some(text) => text,
                None => return Err(UndoError::UnclassifiableEdit { kind: unit_kind }),
            },
        };

        let inserted_count = char_count(&literal);
        if inserted_count == 0 {
            return Ok(());
        }

        let replaced_range = match pending {
            Some(PendingEdit {
                capture: PendingCapture::Range(range),
                ..
            }) => Some(range),
            _ => None,
        };

        if let Some(range) = replaced_range {
            // Typing or pasting over a selection: an implicit ranged delete,
            // so always its own unit.
            self.last_kind = None;
            self.push_record(
                history,
                DiffRecord {
                    text_before: range.text,
                    text_after: literal,
                    base_offset: range.start,
                    direction: EditDirection::End,
                    selected_before: true,
                    selected_after: false,
                },
            );
            return Ok(());
        }

        if self.merges_with_last(&unit_kind) {
            let inserted_at = widget.selection_start().saturating_sub(inserted_count);
            if let Some(top) = history.current_mut() {
                // Contiguous only if the literal landed right after the
                // open unit's text.
                if inserted_at == top.base_offset + char_count(&top.text_after) {
                    top.text_after.push_str(&literal);
                    trace!("extend insert at {}", top.base_offset);
                    self.last_kind = Some(unit_kind);
                    return Ok(());
                }
            }
        }

        let base = widget.selection_start().saturating_sub(inserted_count);
        self.last_kind = if unit_kind.forces_boundary() {
            None
        } else {
            Some(unit_kind)
        };
        self.push_record(
            history,
            DiffRecord {
                text_after: literal,
                base_offset: base,
                direction: EditDirection::End,
                ..Default::default()
            },
        );
        Ok(())
    }

    /// Drop commit: the dropped text ends up selected, matching native
    /// behavior. Any preceding `DeleteByDrag` half was already discarded.
    fn commit_drop<W: TextWidget>(
        &mut self,
        history: &mut UndoStack<DiffRecord>,
        widget: &W,
        data: Option<String>,
    ) -> UndoResult<()> {
        let dropped = match data {
            Some(text) => text,
            // After a drop the widget selects the dropped text.
            None if widget.has_range_selection() => RangeCapture::of(widget).text,
            None => {
                return Err(UndoError::UnclassifiableEdit {
                    kind: EditKind::InsertFromDrop,
                })
            }
        };
        if dropped.is_empty() {
            return Ok(());
        }

        self.last_kind = None;
        self.push_record(
            history,
            DiffRecord {
                text_after: dropped,
                base_offset: widget.selection_start(),
                direction: EditDirection::End,
                selected_after: true,
                ..Default::default()
            },
        );
        Ok(())
    }

    fn push_record(&self, history: &mut UndoStack<DiffRecord>, record: DiffRecord) {
        debug!(
            "push: -{:?} +{:?} @{}",
            record.text_before, record.text_after, record.base_offset
        );
        history.push(record);
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}
