//! Structural s-expression editing on top of a host text editor.
//!
//! A command parses the buffer, reads the selection, asks
//! [`paredit_syntax`] for a motion or a change list, and feeds the result
//! back through the host: moving the selection, writing the clipboard, or
//! applying edits in order as one undo step. [`Session`] is the entry point.

pub mod clipboard;
pub mod editing;
pub mod error;
pub mod expansion;
pub mod operations;
pub mod session;

// Re-export key types for easier usage
pub use clipboard::{ClipboardSink, MemoryClipboard, copy_span, cut_span};
pub use editing::{Command, RopeEditor, SelectionSpan, TextEditor, UndoStops};
pub use error::{ClipboardError, EditError, PareditError, UnknownOperation};
pub use expansion::{ExpansionFrame, ExpansionStack};
pub use operations::{Motion, Operation, Outcome, StructuralEdit};
pub use session::Session;
