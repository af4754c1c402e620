use paredit_syntax::NavigatorResult;

use super::buffer::TextEditor;

/// A selection with its active edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionSpan {
    pub start: usize,
    pub end: usize,
    /// Either `start` or `end`.
    pub cursor: usize,
}

impl SelectionSpan {
    pub fn collapsed(at: usize) -> Self {
        Self {
            start: at,
            end: at,
            cursor: at,
        }
    }

    /// Span between `anchor` and `cursor`, in either order.
    pub fn from_pair(anchor: usize, cursor: usize) -> Self {
        Self {
            start: anchor.min(cursor),
            end: anchor.max(cursor),
            cursor,
        }
    }

    /// The edge opposite the cursor.
    pub fn anchor(&self) -> usize {
        if self.cursor == self.start {
            self.end
        } else {
            self.start
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, other: &SelectionSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Clamp into a document of `len` characters.
    pub fn clamp(self, len: usize) -> Self {
        Self::from_pair(self.anchor().min(len), self.cursor.min(len))
    }
}

/// Make a navigator result the live selection and scroll it into view.
///
/// A collapsed result moves the cursor; a span keeps its direction, with the
/// cursor on its second element.
pub fn apply_selection<E>(editor: &mut E, result: NavigatorResult) -> SelectionSpan
where
    E: TextEditor + ?Sized,
{
    let span = match result {
        NavigatorResult::Collapsed(at) => SelectionSpan::collapsed(at),
        NavigatorResult::Span(a, b) => SelectionSpan::from_pair(a, b),
    };
    set_and_reveal(editor, span);
    span
}

pub(crate) fn set_and_reveal<E>(editor: &mut E, span: SelectionSpan)
where
    E: TextEditor + ?Sized,
{
    editor.set_selection(span);
    editor.reveal_range(span.start, span.end);
}

/// The live selection, clamped into the document.
pub fn current_selection<E>(editor: &E) -> SelectionSpan
where
    E: TextEditor + ?Sized,
{
    editor.selection().clamp(editor.len())
}
