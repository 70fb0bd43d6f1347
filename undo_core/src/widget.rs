//! Abstract text-widget contract and a plain in-memory implementation

use serde::{Deserialize, Serialize};

/// Selection left behind by [`TextWidget::replace_range`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Collapse the caret to the start of the replaced range
    Start,
    /// Collapse the caret to the end of the inserted text
    End,
    /// Select the inserted text
    Select,
}

/// Contract the undo subsystem needs from a host text widget.
///
/// All offsets are in chars. Selection accessors return `0` when the host
/// has no selection state yet.
pub trait TextWidget {
    /// Full text content of the widget
    fn text(&self) -> String;

    /// Start offset of the selection (caret position when collapsed)
    fn selection_start(&self) -> usize;

    /// End offset of the selection
    fn selection_end(&self) -> usize;

    /// Atomically replaces `len` chars starting at `start` with `text` and
    /// sets the resulting selection per `mode`.
    fn replace_range(&mut self, text: &str, start: usize, len: usize, mode: SelectionMode);

    /// Returns true if a range (not a collapsed caret) is selected
    fn has_range_selection(&self) -> bool {
        self.selection_start() != self.selection_end()
    }
}

/// Handle that may or may not resolve to a live widget.
///
/// Attachment goes through resolution so a host can hand over a widget
/// reference that is not mounted yet; resolution failure is an explicit
/// attach error, never a silent no-op.
pub trait WidgetHandle {
    type Widget: TextWidget;

    fn resolve(self) -> Option<Self::Widget>;
}

impl<W: TextWidget> WidgetHandle for W {
    type Widget = W;

    fn resolve(self) -> Option<W> {
        Some(self)
    }
}

impl<W: TextWidget> WidgetHandle for Option<W> {
    type Widget = W;

    fn resolve(self) -> Option<W> {
        self
    }
}

/// Char-offset slice of `s` over `[start, end)`, clamped to the text.
pub(crate) fn char_slice(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

/// Number of chars in `s`.
pub(crate) fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Plain in-memory text widget: a string plus selection offsets.
///
/// Serves hosts without a UI toolkit and every behavioral test in this
/// workspace. Offsets are clamped rather than rejected, matching how host
/// text inputs behave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpanWidget {
    text: String,
    selection_start: usize,
    selection_end: usize,
}

impl TextSpanWidget {
    /// Creates an empty widget with a collapsed caret at offset 0.
    pub fn new() -> Self {
        Self {
            text: String::new(),
            selection_start: 0,
            selection_end: 0,
        }
    }

    /// Creates a widget holding `text` with the caret at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = char_count(&text);
        Self {
            text,
            selection_start: end,
            selection_end: end,
        }
    }

    /// Sets the selection, clamping to the text and ordering the offsets.
    pub fn set_selection(&mut self, start: usize, end: usize) {
        let max = char_count(&self.text);
        let start = start.min(max);
        let end = end.min(max);
        self.selection_start = start.min(end);
        self.selection_end = start.max(end);
    }

    /// Collapses the caret to `offset`.
    pub fn set_caret(&mut self, offset: usize) {
        self.set_selection(offset, offset);
    }

    /// The currently selected substring (empty when collapsed).
    pub fn selected_text(&self) -> String {
        char_slice(&self.text, self.selection_start, self.selection_end)
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }
}

impl TextWidget for TextSpanWidget {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn selection_start(&self) -> usize {
        self.selection_start
    }

    fn selection_end(&self) -> usize {
        self.selection_end
    }

    fn replace_range(&mut self, text: &str, start: usize, len: usize, mode: SelectionMode) {
        let total = char_count(&self.text);
        let start = start.min(total);
        let end = (start + len).min(total);

        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(end);
        self.text.replace_range(byte_start..byte_end, text);

        let inserted = char_count(text);
        match mode {
            SelectionMode::Start => {
                self.selection_start = start;
                self.selection_end = start;
            }
            SelectionMode::End => {
                self.selection_start = start + inserted;
                self.selection_end = start + inserted;
            }
            SelectionMode::Select => {
                self.selection_start = start;
                self.selection_end = start + inserted;
            }
        }
    }
}

impl Default for TextSpanWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_widget_has_collapsed_caret_at_zero() {
        let widget = TextSpanWidget::new();
        assert_eq!(widget.text(), "");
        assert_eq!(widget.selection_start(), 0);
        assert_eq!(widget.selection_end(), 0);
        assert!(!widget.has_range_selection());
    }

    #[test]
    fn test_with_text_puts_caret_at_end() {
        let widget = TextSpanWidget::with_text("hello");
        assert_eq!(widget.selection_start(), 5);
        assert_eq!(widget.selection_end(), 5);
    }

    #[test]
    fn test_set_selection_orders_and_clamps() {
        let mut widget = TextSpanWidget::with_text("hello");
        widget.set_selection(4, 2);
        assert_eq!(widget.selection_start(), 2);
        assert_eq!(widget.selection_end(), 4);
        assert_eq!(widget.selected_text(), "ll");

        widget.set_selection(3, 99);
        assert_eq!(widget.selection_end(), 5);
    }

    #[test]
    fn test_replace_range_insert() {
        let mut widget = TextSpanWidget::with_text("held");
        widget.replace_range("llo wor", 3, 0, SelectionMode::End);
        assert_eq!(widget.text(), "hello world");
        assert_eq!(widget.selection_start(), 10);
    }

    #[test]
    fn test_replace_range_delete_collapses_to_start() {
        let mut widget = TextSpanWidget::with_text("hello");
        widget.replace_range("", 2, 2, SelectionMode::Start);
        assert_eq!(widget.text(), "heo");
        assert_eq!(widget.selection_start(), 2);
        assert_eq!(widget.selection_end(), 2);
    }

    #[test]
    fn test_replace_range_select_mode() {
        let mut widget = TextSpanWidget::with_text("hello");
        widget.replace_range("LL", 2, 2, SelectionMode::Select);
        assert_eq!(widget.text(), "heLLo");
        assert_eq!(widget.selection_start(), 2);
        assert_eq!(widget.selection_end(), 4);
        assert_eq!(widget.selected_text(), "LL");
    }

    #[test]
    fn test_replace_range_is_char_indexed() {
        let mut widget = TextSpanWidget::with_text("日本語テキスト");
        widget.replace_range("中国", 0, 2, SelectionMode::End);
        assert_eq!(widget.text(), "中国語テキスト");
        assert_eq!(widget.selection_start(), 2);
    }

    #[test]
    fn test_replace_range_clamps_out_of_bounds() {
        let mut widget = TextSpanWidget::with_text("ab");
        widget.replace_range("c", 10, 5, SelectionMode::End);
        assert_eq!(widget.text(), "abc");
        assert_eq!(widget.selection_start(), 3);
    }

    #[test]
    fn test_handle_resolution() {
        let widget = TextSpanWidget::with_text("x");
        assert!(WidgetHandle::resolve(widget).is_some());

        let missing: Option<TextSpanWidget> = None;
        assert!(missing.resolve().is_none());

        let mounted = Some(TextSpanWidget::new());
        assert!(mounted.resolve().is_some());
    }

    #[test]
    fn test_char_slice() {
        assert_eq!(char_slice("hello", 2, 4), "ll");
        assert_eq!(char_slice("hello", 4, 2), "");
        assert_eq!(char_slice("日本語", 1, 3), "本語");
        assert_eq!(char_slice("ab", 1, 99), "b");
    }
}
