//! Undo subsystem error types

use edit_types::EditKind;
use thiserror::Error;

/// Undo subsystem error types
///
/// Missing history is deliberately not an error: `undo`/`redo` on an empty
/// stack return `None` so callers can no-op their UI feedback.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UndoError {
    #[error("Widget handle could not be resolved to a live widget")]
    WidgetUnresolved,

    #[error("No widget attached")]
    NotAttached,

    #[error("Unclassifiable edit: '{kind}' committed without literal data")]
    UnclassifiableEdit { kind: EditKind },

    #[error("Delete commit for '{kind}' arrived without a pre-edit capture")]
    MissingPreEdit { kind: EditKind },
}

/// Undo result
pub type UndoResult<T> = Result<T, UndoError>;
