//! # Undo Core
//!
//! Native-editor-grade undo/redo for a text input widget, reconstructed
//! from raw edit-intent events (composition, deletion, paste, drag/drop,
//! plain keystrokes).
//!
//! ## Philosophy
//!
//! - **Diff records, not snapshots**: each history entry is a minimal
//!   reversible edit (removed text, inserted text, anchor, caret-landing
//!   direction, selection flags), so records compose correctly under
//!   reversal even when edits are non-adjacent
//! - **Deterministic**: same intent stream against the same widget state
//!   => same history, single-threaded and synchronous throughout
//! - **Explicit failure**: an unattached widget or an unclassifiable edit
//!   is an error, never a silent no-op that masks data loss
//! - **Host-agnostic**: the widget is an abstract contract; any toolkit
//!   that can report text, selection, and an atomic range replace can host
//!   a session
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - Word-processor-grade undo grouping (no true word-boundary grouping
//!   beyond the merge heuristic)
//! - Multi-cursor editing
//! - Rich-text formatting undo
//!
//! ## Design
//!
//! The crate provides:
//! - [`UndoStack`]: generic bounded stack of reversible records with an
//!   undo/redo cursor
//! - [`DiffRecord`]: the reversible record stored for text edits
//! - [`Classifier`]: decides edit-unit boundaries and builds diff records
//!   from the intent stream
//! - [`replay`]: applies records (forward or reversed) to the live widget
//! - [`UndoManager`]: the per-widget session facade hosts talk to

pub mod classifier;
pub mod diff;
pub mod error;
pub mod history;
pub mod manager;
pub mod replay;
pub mod widget;

pub use classifier::Classifier;
pub use diff::{DiffRecord, EditDirection};
pub use error::{UndoError, UndoResult};
pub use history::{Reversible, UndoStack, MAX_UNDO_DEPTH};
pub use manager::UndoManager;
pub use widget::{SelectionMode, TextSpanWidget, TextWidget, WidgetHandle};
