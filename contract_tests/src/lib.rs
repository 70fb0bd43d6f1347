//! # Undo Contract Tests
//!
//! This crate provides "golden" tests for the undo subsystem to ensure its
//! contracts don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: The intent taxonomy's wire shape and the
//!   undo unit grouping rules are written down as tests
//! - **Testability first**: Contract tests fail when interfaces or grouping
//!   behavior change
//! - **Pin reality, not ideals**: Documented limitations (word-delete
//!   direction, composition over a range) are asserted as they are
//!
//! ## Structure
//!
//! - `edit_intents`: serialized shape of the edit-intent taxonomy
//! - `undo_properties`: end-to-end undo/redo behavior driven through a
//!   simulated host

pub mod edit_intents;
pub mod undo_properties;

/// Simulated host driving an [`undo_core::UndoManager`] the way a UI
/// toolkit would: mutate the widget, then report intents in host order.
pub mod test_helpers {
    use edit_types::{EditIntent, EditKind};
    use undo_core::{DiffRecord, SelectionMode, TextSpanWidget, TextWidget, UndoManager};

    pub struct Host {
        pub manager: UndoManager<TextSpanWidget>,
    }

    impl Host {
        /// Creates a host attached to a widget holding `text`, caret at end.
        pub fn new(text: &str) -> Self {
            let mut manager = UndoManager::new();
            manager
                .attach(TextSpanWidget::with_text(text))
                .expect("attach failed");
            Self { manager }
        }

        pub fn text(&self) -> String {
            self.widget().text()
        }

        pub fn selection(&self) -> (usize, usize) {
            let widget = self.widget();
            (widget.selection_start(), widget.selection_end())
        }

        pub fn select(&mut self, start: usize, end: usize) {
            self.widget_mut().set_selection(start, end);
        }

        pub fn set_caret(&mut self, offset: usize) {
            self.widget_mut().set_caret(offset);
        }

        /// Types `text` one char at a time, like individual keystrokes.
        pub fn type_str(&mut self, text: &str) {
            for ch in text.chars() {
                self.type_char(ch);
            }
        }

        pub fn type_char(&mut self, ch: char) {
            let (_, start, len) = self.pre_edit(EditKind::InsertString);
            self.widget_mut()
                .replace_range(&ch.to_string(), start, len, SelectionMode::End);
            self.commit_with(EditKind::InsertString, &ch.to_string());
        }

        pub fn press_enter(&mut self) {
            let (_, start, len) = self.pre_edit(EditKind::InsertLineBreak);
            self.widget_mut()
                .replace_range("\n", start, len, SelectionMode::End);
            self.commit(EditKind::InsertLineBreak);
        }

        pub fn backspace(&mut self) {
            let (ranged, start, len) = self.pre_edit(EditKind::DeleteContentBackward);
            if ranged {
                self.widget_mut()
                    .replace_range("", start, len, SelectionMode::Start);
            } else if start > 0 {
                self.widget_mut()
                    .replace_range("", start - 1, 1, SelectionMode::Start);
            }
            self.commit(EditKind::DeleteContentBackward);
        }

        pub fn delete_forward(&mut self) {
            let (ranged, start, len) = self.pre_edit(EditKind::DeleteContentForward);
            let len = if ranged { len } else { 1 };
            self.widget_mut()
                .replace_range("", start, len, SelectionMode::Start);
            self.commit(EditKind::DeleteContentForward);
        }

        /// Ctrl+Backspace: removes the word (and trailing spaces) before the
        /// caret.
        pub fn word_backspace(&mut self) {
            let (_, caret, _) = self.pre_edit(EditKind::DeleteWordBackward);
            let chars: Vec<char> = self.text().chars().collect();
            let mut start = caret;
            while start > 0 && chars[start - 1].is_whitespace() {
                start -= 1;
            }
            while start > 0 && !chars[start - 1].is_whitespace() {
                start -= 1;
            }
            self.widget_mut()
                .replace_range("", start, caret - start, SelectionMode::Start);
            self.commit(EditKind::DeleteWordBackward);
        }

        pub fn cut(&mut self) {
            let (_, start, len) = self.pre_edit(EditKind::DeleteByCut);
            self.widget_mut()
                .replace_range("", start, len, SelectionMode::Start);
            self.commit(EditKind::DeleteByCut);
        }

        /// Paste: clipboard text arrives with the paste event, not with the
        /// commit.
        pub fn paste_str(&mut self, text: &str) {
            self.manager
                .apply_intent(EditIntent::paste(text))
                .expect("intent failed");
            let (_, start, len) = self.pre_edit(EditKind::InsertFromPaste);
            self.widget_mut()
                .replace_range(text, start, len, SelectionMode::End);
            self.commit(EditKind::InsertFromPaste);
        }

        /// Text dropped from outside the widget at `offset`.
        pub fn drop_external(&mut self, offset: usize, text: &str) {
            self.set_caret(offset);
            let (_, _, _) = self.pre_edit(EditKind::InsertFromDrop);
            self.widget_mut()
                .replace_range(text, offset, 0, SelectionMode::Select);
            self.commit_with(EditKind::InsertFromDrop, text);
        }

        /// IME composition replacing the current selection with `composed`.
        pub fn compose(&mut self, composed: &str) {
            self.manager
                .apply_intent(EditIntent::composition_start())
                .expect("intent failed");
            let (start, end) = self.selection();
            self.widget_mut()
                .replace_range(composed, start, end - start, SelectionMode::End);
            self.manager
                .apply_intent(EditIntent::composition_end(composed))
                .expect("intent failed");
        }

        /// IME composition the user cancelled: the host restores the text.
        pub fn compose_cancelled(&mut self, interim: &str) {
            self.manager
                .apply_intent(EditIntent::composition_start())
                .expect("intent failed");
            let (start, _) = self.selection();
            let interim_len = interim.chars().count();
            self.widget_mut()
                .replace_range(interim, start, 0, SelectionMode::End);
            self.widget_mut()
                .replace_range("", start, interim_len, SelectionMode::End);
            self.manager
                .apply_intent(EditIntent::composition_end(""))
                .expect("intent failed");
        }

        pub fn undo(&mut self) -> Option<DiffRecord> {
            self.manager.undo().expect("undo failed")
        }

        pub fn redo(&mut self) -> Option<DiffRecord> {
            self.manager.redo().expect("redo failed")
        }

        pub fn entries(&self) -> usize {
            self.manager.history().len()
        }

        fn widget(&self) -> &TextSpanWidget {
            self.manager.widget().expect("not attached")
        }

        fn widget_mut(&mut self) -> &mut TextSpanWidget {
            self.manager.widget_mut().expect("not attached")
        }

        /// Sends the pre-edit intent and returns (ranged, start, range len).
        fn pre_edit(&mut self, kind: EditKind) -> (bool, usize, usize) {
            let (start, end) = self.selection();
            let ranged = start != end;
            self.manager
                .apply_intent(EditIntent::pre_edit(kind, ranged))
                .expect("intent failed");
            (ranged, start, end - start)
        }

        fn commit(&mut self, kind: EditKind) {
            self.manager
                .apply_intent(EditIntent::committed(kind))
                .expect("intent failed");
        }

        fn commit_with(&mut self, kind: EditKind, data: &str) {
            self.manager
                .apply_intent(EditIntent::committed_with(kind, data))
                .expect("intent failed");
        }
    }
}
