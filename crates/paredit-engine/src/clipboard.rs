use log::debug;

use crate::editing::{Command, TextEditor, apply_all};
use crate::error::{ClipboardError, PareditError};

/// Somewhere copied text goes.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Clipboard kept in memory, for headless use and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Copy the text between two offsets, given in either order.
pub fn copy_span<E, C>(
    editor: &E,
    clipboard: &mut C,
    (a, b): (usize, usize),
) -> Result<(), ClipboardError>
where
    E: TextEditor + ?Sized,
    C: ClipboardSink + ?Sized,
{
    let text = editor.slice(a.min(b), a.max(b));
    debug!("copying {} character(s)", text.chars().count());
    clipboard.write_text(&text)
}

/// Copy the span, then delete it. Nothing is deleted if copying fails.
pub fn cut_span<E, C>(
    editor: &mut E,
    clipboard: &mut C,
    (a, b): (usize, usize),
) -> Result<bool, PareditError>
where
    E: TextEditor + ?Sized,
    C: ClipboardSink + ?Sized,
{
    copy_span(editor, clipboard, (a, b))?;
    Ok(apply_all(editor, &[Command::delete_span(a, b)])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::RopeEditor;
    use pretty_assertions::assert_eq;

    struct Unavailable;

    impl ClipboardSink for Unavailable {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Unavailable("no display".into()))
        }
    }

    #[test]
    fn copy_accepts_reversed_pair() {
        let editor = RopeEditor::new("clojure", "(a (b c) d)");
        let mut clipboard = MemoryClipboard::new();
        copy_span(&editor, &mut clipboard, (8, 3)).unwrap();
        assert_eq!(clipboard.contents(), Some("(b c)"));
        assert_eq!(editor.text(), "(a (b c) d)");
    }

    #[test]
    fn cut_copies_before_deleting() {
        let mut editor = RopeEditor::new("clojure", "(a (b c) d)");
        let mut clipboard = MemoryClipboard::new();
        let before = editor.text();

        assert_eq!(cut_span(&mut editor, &mut clipboard, (3, 8)), Ok(true));
        assert_eq!(clipboard.contents(), Some(&before[3..8]));
        assert_eq!(editor.text(), "(a  d)");
    }

    #[test]
    fn clipboard_failure_leaves_buffer_alone() {
        let mut editor = RopeEditor::new("clojure", "(a b)");
        let result = cut_span(&mut editor, &mut Unavailable, (1, 2));
        assert_eq!(
            result,
            Err(PareditError::Clipboard(ClipboardError::Unavailable(
                "no display".into()
            )))
        );
        assert_eq!(editor.text(), "(a b)");
    }

    #[test]
    fn empty_span_copies_empty_text() {
        let editor = RopeEditor::new("clojure", "abc");
        let mut clipboard = MemoryClipboard::new();
        copy_span(&editor, &mut clipboard, (2, 2)).unwrap();
        assert_eq!(clipboard.contents(), Some(""));
    }
}
