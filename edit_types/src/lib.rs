#![no_std]

//! # Edit Types
//!
//! This crate defines the edit-intent event taxonomy consumed by the undo
//! classifier in `undo_core`.
//!
//! ## Philosophy
//!
//! - **Events, not toolkit objects**: Edits are structured intents, never
//!   references into a concrete UI toolkit
//! - **Explicit, not inferred**: The host reports what kind of edit happened;
//!   the classifier never guesses from raw keystrokes
//! - **Testable**: Intents are serializable and can be injected for testing
//! - **Stable**: Kind names follow the host-neutral `inputType` vocabulary so
//!   contract tests can pin them
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A keyboard event model (no key codes, no modifiers)
//! - An undo implementation (just the types)
//! - A rich-text model (plain text fragments only)

extern crate alloc;

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Kind of a committed edit
///
/// One tag per edit shape the classifier understands, mirroring the
/// host-neutral `inputType` vocabulary. Hosts that observe a kind outside
/// this taxonomy report it as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditKind {
    /// Plain (non-whitespace) character or string insertion
    InsertString,
    /// Whitespace insertion
    InsertWhiteSpace,
    /// Line-break insertion
    InsertLineBreak,
    /// Clipboard paste
    InsertFromPaste,
    /// Drag-and-drop insertion
    InsertFromDrop,
    /// In-progress IME composition update
    InsertCompositionText,
    /// Backward delete (backspace)
    DeleteContentBackward,
    /// Forward delete (delete key)
    DeleteContentForward,
    /// Word-level backward delete
    DeleteWordBackward,
    /// Word-level forward delete
    DeleteWordForward,
    /// Cut to clipboard
    DeleteByCut,
    /// Removal half of an in-widget drag move
    DeleteByDrag,
    /// Host-reported kind outside the known taxonomy
    Other(String),
}

impl EditKind {
    /// Classifies literal inserted text as whitespace or plain string
    pub fn classify_text(text: &str) -> Self {
        if !text.is_empty() && text.chars().all(char::is_whitespace) {
            Self::InsertWhiteSpace
        } else {
            Self::InsertString
        }
    }

    /// Returns true if this kind inserts content
    pub fn is_insert(&self) -> bool {
        matches!(
            self,
            Self::InsertString
                | Self::InsertWhiteSpace
                | Self::InsertLineBreak
                | Self::InsertFromPaste
                | Self::InsertFromDrop
                | Self::InsertCompositionText
        )
    }

    /// Returns true if this kind removes content
    pub fn is_delete(&self) -> bool {
        matches!(
            self,
            Self::DeleteContentBackward
                | Self::DeleteContentForward
                | Self::DeleteWordBackward
                | Self::DeleteWordForward
                | Self::DeleteByCut
                | Self::DeleteByDrag
        )
    }

    /// Returns true if this kind deletes ahead of the caret
    pub fn is_forward_delete(&self) -> bool {
        matches!(self, Self::DeleteContentForward | Self::DeleteWordForward)
    }

    /// Returns true if this kind deletes a whole word at a time
    pub fn is_word_delete(&self) -> bool {
        matches!(self, Self::DeleteWordBackward | Self::DeleteWordForward)
    }

    /// Returns true if this kind always starts a new undo unit
    ///
    /// Composition, ranged edits and explicit undo/redo also force
    /// boundaries; those are decided by the classifier, not by the kind tag.
    pub fn forces_boundary(&self) -> bool {
        matches!(
            self,
            Self::InsertLineBreak
                | Self::InsertFromPaste
                | Self::InsertFromDrop
                | Self::DeleteWordBackward
                | Self::DeleteWordForward
                | Self::DeleteByCut
        )
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsertString => write!(f, "insertString"),
            Self::InsertWhiteSpace => write!(f, "insertWhiteSpace"),
            Self::InsertLineBreak => write!(f, "insertLineBreak"),
            Self::InsertFromPaste => write!(f, "insertFromPaste"),
            Self::InsertFromDrop => write!(f, "insertFromDrop"),
            Self::InsertCompositionText => write!(f, "insertCompositionText"),
            Self::DeleteContentBackward => write!(f, "deleteContentBackward"),
            Self::DeleteContentForward => write!(f, "deleteContentForward"),
            Self::DeleteWordBackward => write!(f, "deleteWordBackward"),
            Self::DeleteWordForward => write!(f, "deleteWordForward"),
            Self::DeleteByCut => write!(f, "deleteByCut"),
            Self::DeleteByDrag => write!(f, "deleteByDrag"),
            Self::Other(kind) => write!(f, "{}", kind),
        }
    }
}

/// Edit intent
///
/// A single event in the stream the host delivers to the classifier.
/// Order matters: for one host edit the stream is
/// `PreEdit` then `Committed`, with `Paste` arriving just before the
/// `PreEdit` of a paste, and the composition pair bracketing IME input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditIntent {
    /// IME composition begins
    CompositionStart,
    /// Fired before the host mutates content
    PreEdit {
        /// Kind of the upcoming edit
        kind: EditKind,
        /// Whether a range is currently selected
        has_range_selection: bool,
    },
    /// Fired after the host mutated content
    Committed {
        /// Kind of the committed edit
        kind: EditKind,
        /// Literal inserted text, when the host knows it
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
    /// Clipboard text, available only at paste time
    Paste {
        /// The pasted text
        text: String,
    },
    /// IME composition ended
    CompositionEnd {
        /// The final composed text (empty if the user cancelled)
        text: String,
    },
}

impl EditIntent {
    /// Creates a composition-start intent
    pub fn composition_start() -> Self {
        Self::CompositionStart
    }

    /// Creates a pre-edit intent
    pub fn pre_edit(kind: EditKind, has_range_selection: bool) -> Self {
        Self::PreEdit {
            kind,
            has_range_selection,
        }
    }

    /// Creates a committed-edit intent without literal data
    pub fn committed(kind: EditKind) -> Self {
        Self::Committed { kind, data: None }
    }

    /// Creates a committed-edit intent carrying the literal inserted text
    pub fn committed_with(kind: EditKind, data: impl Into<String>) -> Self {
        Self::Committed {
            kind,
            data: Some(data.into()),
        }
    }

    /// Creates a paste intent
    pub fn paste(text: impl Into<String>) -> Self {
        Self::Paste { text: text.into() }
    }

    /// Creates a composition-end intent
    pub fn composition_end(text: impl Into<String>) -> Self {
        Self::CompositionEnd { text: text.into() }
    }

    /// Returns true if this is a committed edit
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// Returns the committed kind if this is a committed edit
    pub fn committed_kind(&self) -> Option<&EditKind> {
        match self {
            Self::Committed { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for EditIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompositionStart => write!(f, "compositionStart"),
            Self::PreEdit { kind, .. } => write!(f, "preEdit({})", kind),
            Self::Committed { kind, .. } => write!(f, "committed({})", kind),
            Self::Paste { .. } => write!(f, "paste"),
            Self::CompositionEnd { .. } => write!(f, "compositionEnd"),
        }
    }
}
