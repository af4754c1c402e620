use std::borrow::Cow;
use std::ops::Range;

use log::debug;
use xi_rope::Rope;
use xi_rope::delta::Builder;

use super::buffer::{EditBuilder, TextEditor, UndoStops};
use super::selection::SelectionSpan;
use crate::error::EditError;

/// A standalone [`TextEditor`] over an `xi_rope::Rope`.
///
/// Used by the terminal front end and by tests. Every transaction compiles to
/// one `Delta`; undo history is kept as buffer snapshots, one per undo group.
/// A group opens with the first transaction that changes text and closes when
/// a transaction asks for a stop after it.
#[derive(Debug, Clone)]
pub struct RopeEditor {
    language_id: String,
    /// UTF-8 buffer; offsets handed to the trait are characters
    buffer: Rope,
    selection: SelectionSpan,
    revealed: Option<(usize, usize)>,
    undo_stack: Vec<Rope>,
    redo_stack: Vec<Rope>,
    group_open: bool,
    read_only: bool,
    version: u64,
}

/// One recorded mutation, in offsets of the buffer before the transaction.
#[derive(Debug)]
enum Op {
    Insert { at: usize, text: String },
    Delete { range: Range<usize> },
}

impl Op {
    fn start(&self) -> usize {
        match self {
            Op::Insert { at, .. } => *at,
            Op::Delete { range } => range.start,
        }
    }

    fn end(&self) -> usize {
        match self {
            Op::Insert { at, .. } => *at,
            Op::Delete { range } => range.end,
        }
    }

    fn is_noop(&self) -> bool {
        match self {
            Op::Insert { text, .. } => text.is_empty(),
            Op::Delete { range } => range.is_empty(),
        }
    }
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl EditBuilder for Recorder {
    fn insert(&mut self, at: usize, text: &str) {
        self.ops.push(Op::Insert {
            at,
            text: text.to_string(),
        });
    }

    fn delete(&mut self, range: Range<usize>) {
        self.ops.push(Op::Delete { range });
    }
}

impl RopeEditor {
    pub fn new(language_id: impl Into<String>, text: &str) -> Self {
        Self {
            language_id: language_id.into(),
            buffer: Rope::from(text),
            selection: SelectionSpan::default(),
            revealed: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            group_open: false,
            read_only: false,
            version: 0,
        }
    }

    /// Version counter, incremented on each transaction that changes text.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Last range passed to `reveal_range`.
    pub fn revealed(&self) -> Option<(usize, usize)> {
        self.revealed
    }

    /// Decline every transaction, as a read-only document would.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.buffer, previous);
        self.redo_stack.push(current);
        self.after_history_jump();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.buffer, next);
        self.undo_stack.push(current);
        self.after_history_jump();
        true
    }

    fn after_history_jump(&mut self) {
        self.group_open = false;
        self.version += 1;
        self.selection = self.selection.clamp(self.len());
    }

    fn contents(&self) -> Cow<'_, str> {
        self.buffer.slice_to_cow(0..self.buffer.len())
    }

    /// Byte offset of a character offset. Offsets past the end map to the end.
    fn byte_offset(text: &str, offset: usize) -> usize {
        text.char_indices()
            .nth(offset)
            .map_or(text.len(), |(byte, _)| byte)
    }

    /// Sort and check a transaction's ops against a document of `len`
    /// characters.
    fn validate(mut ops: Vec<Op>, len: usize) -> Result<Vec<Op>, EditError> {
        // inserts sort before a delete starting at the same offset
        ops.sort_by_key(|op| (op.start(), matches!(op, Op::Delete { .. })));

        let mut last_end = 0;
        for op in &ops {
            let (start, end) = (op.start(), op.end());
            if start > end || end > len {
                return Err(EditError::OutOfBounds { start, end, len });
            }
            if start < last_end {
                return Err(EditError::Rejected {
                    reason: format!("overlapping edits at {start}"),
                });
            }
            last_end = end;
        }
        Ok(ops)
    }

    /// Where `offset` ends up once the sorted ops are applied.
    fn map_offset(offset: usize, ops: &[Op]) -> usize {
        let mut mapped = offset as isize;
        for op in ops {
            match op {
                Op::Insert { at, text } if *at <= offset => {
                    mapped += text.chars().count() as isize;
                }
                Op::Delete { range } if range.end <= offset => {
                    mapped -= range.len() as isize;
                }
                Op::Delete { range } if range.start < offset => {
                    mapped -= (offset - range.start) as isize;
                }
                _ => {}
            }
        }
        mapped.max(0) as usize
    }
}

impl TextEditor for RopeEditor {
    fn language_id(&self) -> &str {
        &self.language_id
    }

    fn text(&self) -> String {
        self.contents().into_owned()
    }

    fn len(&self) -> usize {
        self.contents().chars().count()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        let text = self.contents();
        let start_byte = Self::byte_offset(&text, start);
        let end_byte = Self::byte_offset(&text, end).max(start_byte);
        text[start_byte..end_byte].to_string()
    }

    fn selection(&self) -> SelectionSpan {
        self.selection
    }

    fn set_selection(&mut self, span: SelectionSpan) {
        self.selection = span;
    }

    fn reveal_range(&mut self, start: usize, end: usize) {
        self.revealed = Some((start, end));
    }

    fn edit(
        &mut self,
        stops: UndoStops,
        build: &mut dyn FnMut(&mut dyn EditBuilder),
    ) -> Result<bool, EditError> {
        if self.read_only {
            // declined, but a checkpoint still ends the group
            if stops.after {
                self.group_open = false;
            }
            return Ok(false);
        }
        if stops.before {
            self.group_open = false;
        }

        let mut recorder = Recorder::default();
        build(&mut recorder);

        let text = self.contents().into_owned();
        let len = text.chars().count();
        let ops = Self::validate(recorder.ops, len)?;

        if ops.iter().any(|op| !op.is_noop()) {
            let mut builder = Builder::new(self.buffer.len());
            for op in ops.iter().filter(|op| !op.is_noop()) {
                match op {
                    Op::Insert { at, text: inserted } => {
                        let at = Self::byte_offset(&text, *at);
                        builder.replace(at..at, Rope::from(inserted.as_str()));
                    }
                    Op::Delete { range } => {
                        let start = Self::byte_offset(&text, range.start);
                        let end = Self::byte_offset(&text, range.end);
                        builder.delete(start..end);
                    }
                }
            }
            let delta = builder.build();

            if !self.group_open {
                self.undo_stack.push(self.buffer.clone());
                self.group_open = true;
            }
            self.redo_stack.clear();
            self.buffer = delta.apply(&self.buffer);
            self.version += 1;

            let anchor = Self::map_offset(self.selection.anchor(), &ops);
            let cursor = Self::map_offset(self.selection.cursor, &ops);
            self.selection = SelectionSpan::from_pair(anchor, cursor);
            debug!("applied {} op(s), version {}", ops.len(), self.version);
        }

        if stops.after {
            self.group_open = false;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn edit_with(
        editor: &mut RopeEditor,
        f: impl Fn(&mut dyn EditBuilder),
    ) -> Result<bool, EditError> {
        editor.edit(UndoStops::NONE, &mut |b| f(b))
    }

    #[test]
    fn offsets_are_characters() {
        let mut editor = RopeEditor::new("clojure", "(λ é)");
        assert_eq!(editor.len(), 5);
        edit_with(&mut editor, |b| b.insert(2, "x")).unwrap();
        assert_eq!(editor.text(), "(λx é)");
        edit_with(&mut editor, |b| b.delete(3..5)).unwrap();
        assert_eq!(editor.text(), "(λx)");
        assert_eq!(editor.slice(1, 3), "λx");
    }

    #[test]
    fn ops_in_one_transaction_use_original_offsets() {
        let mut editor = RopeEditor::new("clojure", "abcdef");
        edit_with(&mut editor, |b| {
            b.delete(4..6);
            b.insert(0, "<");
            b.delete(1..2);
        })
        .unwrap();
        assert_eq!(editor.text(), "<acd");
    }

    #[test]
    fn out_of_range_delete_is_rejected() {
        let mut editor = RopeEditor::new("clojure", "abc");
        let result = edit_with(&mut editor, |b| b.delete(2..7));
        assert_eq!(
            result,
            Err(EditError::OutOfBounds {
                start: 2,
                end: 7,
                len: 3
            })
        );
        assert_eq!(editor.text(), "abc");
        assert_eq!(editor.version(), 0);
    }

    #[test]
    fn overlapping_ops_are_rejected() {
        let mut editor = RopeEditor::new("clojure", "abcdef");
        let result = edit_with(&mut editor, |b| {
            b.delete(0..3);
            b.delete(2..4);
        });
        assert!(matches!(result, Err(EditError::Rejected { .. })));
    }

    #[test]
    fn selection_follows_edits() {
        let mut editor = RopeEditor::new("clojure", "(a b)");
        editor.set_selection(SelectionSpan::from_pair(3, 4));
        edit_with(&mut editor, |b| b.insert(0, "xx")).unwrap();
        assert_eq!(editor.selection(), SelectionSpan::from_pair(5, 6));
        edit_with(&mut editor, |b| b.delete(4..6)).unwrap();
        assert_eq!(editor.selection(), SelectionSpan::collapsed(4));
    }

    #[test]
    fn undo_groups_close_on_checkpoint() {
        let mut editor = RopeEditor::new("clojure", "a");
        edit_with(&mut editor, |b| b.insert(1, "b")).unwrap();
        edit_with(&mut editor, |b| b.insert(2, "c")).unwrap();
        editor
            .edit(UndoStops::CHECKPOINT, &mut |b| b.insert(0, ""))
            .unwrap();
        edit_with(&mut editor, |b| b.insert(3, "d")).unwrap();
        assert_eq!(editor.text(), "abcd");
        assert_eq!(editor.undo_depth(), 2);

        assert!(editor.undo());
        assert_eq!(editor.text(), "abc");
        assert!(editor.undo());
        assert_eq!(editor.text(), "a");
        assert!(!editor.undo());

        assert!(editor.redo());
        assert_eq!(editor.text(), "abc");
    }

    #[test]
    fn stop_before_starts_a_new_group() {
        let mut editor = RopeEditor::new("clojure", "");
        edit_with(&mut editor, |b| b.insert(0, "a")).unwrap();
        let stops = UndoStops {
            before: true,
            after: false,
        };
        editor.edit(stops, &mut |b| b.insert(1, "b")).unwrap();
        assert_eq!(editor.undo_depth(), 2);
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut editor = RopeEditor::new("clojure", "a");
        edit_with(&mut editor, |b| b.insert(1, "b")).unwrap();
        editor.undo();
        edit_with(&mut editor, |b| b.insert(0, "z")).unwrap();
        assert!(!editor.redo());
        assert_eq!(editor.text(), "za");
    }
}
