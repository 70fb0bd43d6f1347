//! Attached undo session facade

use edit_types::EditIntent;
use log::debug;

use crate::classifier::Classifier;
use crate::diff::DiffRecord;
use crate::error::{UndoError, UndoResult};
use crate::history::UndoStack;
use crate::replay;
use crate::widget::{TextWidget, WidgetHandle};

/// One undo session bound to one attached widget.
///
/// Owns the history stack and classifier for the widget's attached
/// lifetime. Reattaching clears both, so history never leaks across
/// widget instances. Every widget-touching operation on an unattached
/// manager fails with [`UndoError::NotAttached`] rather than silently
/// dropping an edit.
pub struct UndoManager<W: TextWidget> {
    widget: Option<W>,
    history: UndoStack<DiffRecord>,
    classifier: Classifier,
}

impl<W: TextWidget> UndoManager<W> {
    /// Creates an unattached manager.
    pub fn new() -> Self {
        Self {
            widget: None,
            history: UndoStack::new(),
            classifier: Classifier::new(),
        }
    }

    /// Creates an unattached manager with a custom history depth bound.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            widget: None,
            history: UndoStack::with_max_depth(max_depth),
            classifier: Classifier::new(),
        }
    }

    /// Attaches to a widget, clearing any previous session state.
    pub fn attach<H>(&mut self, handle: H) -> UndoResult<()>
    where
        H: WidgetHandle<Widget = W>,
    {
        let widget = handle.resolve().ok_or(UndoError::WidgetUnresolved)?;
        self.widget = Some(widget);
        self.history.clear();
        self.classifier.reset();
        debug!("widget attached, history cleared");
        Ok(())
    }

    /// Detaches and returns the widget, dropping all session state.
    pub fn detach(&mut self) -> Option<W> {
        self.history.clear();
        self.classifier.reset();
        self.widget.take()
    }

    pub fn is_attached(&self) -> bool {
        self.widget.is_some()
    }

    /// The attached widget, if any.
    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    /// Mutable access to the attached widget, for the host's own edits.
    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }

    /// Read access to the history stack.
    pub fn history(&self) -> &UndoStack<DiffRecord> {
        &self.history
    }

    /// Feeds one edit-intent event through the classifier.
    pub fn apply_intent(&mut self, intent: EditIntent) -> UndoResult<()> {
        let widget = self.widget.as_ref().ok_or(UndoError::NotAttached)?;
        match intent {
            EditIntent::CompositionStart => {
                self.classifier.composition_start(widget);
                Ok(())
            }
            EditIntent::PreEdit {
                kind,
                has_range_selection,
            } => {
                self.classifier.pre_edit(widget, kind, has_range_selection);
                Ok(())
            }
            EditIntent::Committed { kind, data } => {
                self.classifier.commit(&mut self.history, widget, kind, data)
            }
            EditIntent::Paste { text } => {
                self.classifier.paste(text);
                Ok(())
            }
            EditIntent::CompositionEnd { text } => {
                self.classifier
                    .composition_end(&mut self.history, widget, text);
                Ok(())
            }
        }
    }

    /// Undoes the last edit unit, restoring text and selection.
    ///
    /// Returns the applied (reversed) record, or `None` when there is no
    /// history. The open unit, if any, is already the top stack entry, so
    /// undo mid-typing undoes exactly the partially typed unit.
    pub fn undo(&mut self) -> UndoResult<Option<DiffRecord>> {
        let widget = self.widget.as_mut().ok_or(UndoError::NotAttached)?;
        self.classifier.force_boundary();
        match self.history.undo() {
            Some(record) => {
                replay::apply(widget, &record);
                Ok(Some(record))
            }
            None => {
                debug!("undo: no history");
                Ok(None)
            }
        }
    }

    /// Redoes the last undone edit unit.
    pub fn redo(&mut self) -> UndoResult<Option<DiffRecord>> {
        let widget = self.widget.as_mut().ok_or(UndoError::NotAttached)?;
        self.classifier.force_boundary();
        match self.history.redo() {
            Some(record) => {
                replay::apply(widget, &record);
                Ok(Some(record))
            }
            None => {
                debug!("redo: no history");
                Ok(None)
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.widget.is_some() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.widget.is_some() && self.history.can_redo()
    }

    /// Records an externally driven composite edit.
    ///
    /// The edit has already happened in the widget; this only makes it
    /// undoable, and always as its own unit.
    pub fn push(&mut self, record: DiffRecord) -> UndoResult<()> {
        if self.widget.is_none() {
            return Err(UndoError::NotAttached);
        }
        self.classifier.force_boundary();
        self.history.push(record);
        Ok(())
    }
}

impl<W: TextWidget> Default for UndoManager<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{SelectionMode, TextSpanWidget};
    use edit_types::EditKind;

    fn attached(text: &str) -> UndoManager<TextSpanWidget> {
        let mut manager = UndoManager::new();
        manager.attach(TextSpanWidget::with_text(text)).unwrap();
        manager
    }

    /// Simulates the host typing one char through the full intent stream.
    fn type_char(manager: &mut UndoManager<TextSpanWidget>, ch: char) {
        let widget = manager.widget().unwrap();
        let ranged = widget.has_range_selection();
        let (start, end) = (widget.selection_start(), widget.selection_end());
        manager
            .apply_intent(EditIntent::pre_edit(EditKind::InsertString, ranged))
            .unwrap();
        manager.widget_mut().unwrap().replace_range(
            &ch.to_string(),
            start,
            end - start,
            SelectionMode::End,
        );
        manager
            .apply_intent(EditIntent::committed_with(
                EditKind::InsertString,
                ch.to_string(),
            ))
            .unwrap();
    }

    #[test]
    fn test_unattached_manager_fails_fast() {
        let mut manager: UndoManager<TextSpanWidget> = UndoManager::new();

        assert_eq!(
            manager.apply_intent(EditIntent::committed_with(EditKind::InsertString, "x")),
            Err(UndoError::NotAttached)
        );
        assert_eq!(manager.undo(), Err(UndoError::NotAttached));
        assert_eq!(manager.redo(), Err(UndoError::NotAttached));
        assert_eq!(
            manager.push(DiffRecord::default()),
            Err(UndoError::NotAttached)
        );
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
    }

    #[test]
    fn test_attach_rejects_unresolved_handle() {
        let mut manager: UndoManager<TextSpanWidget> = UndoManager::new();
        let unmounted: Option<TextSpanWidget> = None;
        assert_eq!(manager.attach(unmounted), Err(UndoError::WidgetUnresolved));
        assert!(!manager.is_attached());
    }

    #[test]
    fn test_typing_then_undo_then_redo() {
        let mut manager = attached("");
        for ch in "hello".chars() {
            type_char(&mut manager, ch);
        }
        assert!(manager.can_undo());
        assert!(!manager.can_redo());

        let record = manager.undo().unwrap().unwrap();
        assert_eq!(record.text_after, "");
        assert_eq!(manager.widget().unwrap().text(), "");
        assert_eq!(manager.widget().unwrap().selection_start(), 0);
        assert!(manager.can_redo());

        manager.redo().unwrap().unwrap();
        assert_eq!(manager.widget().unwrap().text(), "hello");
        assert_eq!(manager.widget().unwrap().selection_start(), 5);
    }

    #[test]
    fn test_undo_mid_unit_undoes_partial_typing() {
        let mut manager = attached("");
        type_char(&mut manager, 'h');
        type_char(&mut manager, 'e');

        // The open unit is undoable as-is.
        manager.undo().unwrap().unwrap();
        assert_eq!(manager.widget().unwrap().text(), "");

        // And typing after the undo starts a fresh unit.
        manager.redo().unwrap().unwrap();
        type_char(&mut manager, 'x');
        assert_eq!(manager.history().len(), 2);
        assert_eq!(manager.widget().unwrap().text(), "hex");
    }

    #[test]
    fn test_undo_with_empty_history_is_a_noop() {
        let mut manager = attached("seed");
        assert_eq!(manager.undo(), Ok(None));
        assert_eq!(manager.redo(), Ok(None));
        assert_eq!(manager.widget().unwrap().text(), "seed");
    }

    #[test]
    fn test_new_edit_destroys_redo_history() {
        let mut manager = attached("");
        type_char(&mut manager, 'a');
        manager.undo().unwrap().unwrap();
        assert!(manager.can_redo());

        type_char(&mut manager, 'b');
        assert!(!manager.can_redo());
        assert_eq!(manager.redo(), Ok(None));
    }

    #[test]
    fn test_external_push_is_its_own_unit() {
        let mut manager = attached("");
        type_char(&mut manager, 'a');

        // A composite edit applied by the host directly.
        manager.widget_mut().unwrap().replace_range("!!", 1, 0, SelectionMode::End);
        manager
            .push(DiffRecord {
                text_after: "!!".into(),
                base_offset: 1,
                ..Default::default()
            })
            .unwrap();

        // The next keystroke must not merge into the pushed record.
        type_char(&mut manager, 'b');
        assert_eq!(manager.history().len(), 3);

        manager.undo().unwrap().unwrap();
        manager.undo().unwrap().unwrap();
        assert_eq!(manager.widget().unwrap().text(), "a");
    }

    #[test]
    fn test_reattach_clears_history() {
        let mut manager = attached("");
        type_char(&mut manager, 'a');
        assert!(manager.can_undo());

        manager.attach(TextSpanWidget::with_text("other")).unwrap();
        assert!(!manager.can_undo());
        assert!(!manager.can_redo());
        assert_eq!(manager.widget().unwrap().text(), "other");
    }

    #[test]
    fn test_detach_drops_session_state() {
        let mut manager = attached("");
        type_char(&mut manager, 'a');

        let widget = manager.detach().unwrap();
        assert_eq!(widget.text(), "a");
        assert!(!manager.is_attached());
        assert_eq!(manager.undo(), Err(UndoError::NotAttached));
    }

    #[test]
    fn test_ranged_delete_undo_restores_selection() {
        let mut manager = attached("hello");
        manager.widget_mut().unwrap().set_selection(2, 4);
        manager
            .apply_intent(EditIntent::pre_edit(EditKind::DeleteContentBackward, true))
            .unwrap();
        manager
            .widget_mut()
            .unwrap()
            .replace_range("", 2, 2, SelectionMode::Start);
        manager
            .apply_intent(EditIntent::committed(EditKind::DeleteContentBackward))
            .unwrap();
        assert_eq!(manager.widget().unwrap().text(), "heo");

        manager.undo().unwrap().unwrap();
        let widget = manager.widget().unwrap();
        assert_eq!(widget.text(), "hello");
        assert_eq!(widget.selection_start(), 2);
        assert_eq!(widget.selection_end(), 4);
    }
}
