//! Expand/contract selection history.
//!
//! Each expand pushes the selection it produced onto an immutable linked
//! stack; contract pops back to the frame below. Frames are shared `Rc`s, so
//! cloning a stack is cheap and never copies history.
//!
//! Whether the history still applies is decided by containment one level
//! below the top: an expand keeps the chain only while the live selection
//! still contains the top frame's `previous` range, and a contract restores
//! that range only under the same condition. When the user has moved the
//! selection elsewhere the chain is dropped and a fresh one starts from the
//! live selection.

use std::rc::Rc;

use log::debug;
use paredit_syntax::NavigatorResult;

use crate::editing::selection::set_and_reveal;
use crate::editing::{SelectionSpan, TextEditor, apply_selection, current_selection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionFrame {
    pub range: SelectionSpan,
    pub previous: Option<Rc<ExpansionFrame>>,
}

#[derive(Debug, Clone, Default)]
pub struct ExpansionStack {
    top: Option<Rc<ExpansionFrame>>,
}

impl ExpansionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(&self) -> Option<&ExpansionFrame> {
        self.top.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Number of frames, including the one recording where expansion began.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.top.as_deref(), |f| f.previous.as_deref()).count()
    }

    pub fn clear(&mut self) {
        self.top = None;
    }

    /// Select `new_range` and remember the selection it replaced.
    pub fn expand<E>(&mut self, editor: &mut E, new_range: NavigatorResult) -> SelectionSpan
    where
        E: TextEditor + ?Sized,
    {
        let live = current_selection(editor);
        let keeps_history = self
            .top
            .as_ref()
            .and_then(|top| top.previous.as_ref())
            .is_some_and(|previous| live.contains(&previous.range));

        if !keeps_history {
            debug!("starting expansion history at {}..{}", live.start, live.end);
            self.top = Some(Rc::new(ExpansionFrame {
                range: live,
                previous: None,
            }));
        }

        let range = apply_selection(editor, new_range);
        self.top = Some(Rc::new(ExpansionFrame {
            range,
            previous: self.top.take(),
        }));
        range
    }

    /// Restore the selection from before the last expand. Does nothing when
    /// there is no history or the live selection no longer contains it.
    pub fn contract<E>(&mut self, editor: &mut E) -> Option<SelectionSpan>
    where
        E: TextEditor + ?Sized,
    {
        let previous = self.top.as_ref()?.previous.clone()?;
        if !current_selection(editor).contains(&previous.range) {
            debug!("selection moved since last expand, not contracting");
            return None;
        }
        let range = previous.range;
        set_and_reveal(editor, range);
        self.top = Some(previous);
        Some(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::RopeEditor;

    fn editor_with_selection(start: usize, end: usize) -> RopeEditor {
        let mut editor = RopeEditor::new("clojure", "(a (b c) d)");
        editor.set_selection(SelectionSpan::from_pair(start, end));
        editor
    }

    #[test]
    fn expand_then_contract_restores_selection() {
        let mut editor = editor_with_selection(4, 8);
        let mut stack = ExpansionStack::new();

        let expanded = stack.expand(&mut editor, NavigatorResult::Span(0, 11));
        assert_eq!(expanded, SelectionSpan::from_pair(0, 11));
        assert_eq!(editor.selection(), expanded);
        assert_eq!(stack.depth(), 2);

        let contracted = stack.contract(&mut editor);
        assert_eq!(contracted, Some(SelectionSpan::from_pair(4, 8)));
        assert_eq!(editor.selection(), SelectionSpan::from_pair(4, 8));
        assert_eq!(editor.revealed(), Some((4, 8)));
    }

    #[test]
    fn repeated_expands_contract_in_reverse() {
        let mut editor = editor_with_selection(4, 4);
        let mut stack = ExpansionStack::new();
        stack.expand(&mut editor, NavigatorResult::Span(4, 5));
        stack.expand(&mut editor, NavigatorResult::Span(3, 8));
        stack.expand(&mut editor, NavigatorResult::Span(0, 11));
        assert_eq!(stack.depth(), 4);

        assert_eq!(
            stack.contract(&mut editor),
            Some(SelectionSpan::from_pair(3, 8))
        );
        assert_eq!(
            stack.contract(&mut editor),
            Some(SelectionSpan::from_pair(4, 5))
        );
        assert_eq!(
            stack.contract(&mut editor),
            Some(SelectionSpan::collapsed(4))
        );
        assert_eq!(stack.contract(&mut editor), None);
        assert_eq!(editor.selection(), SelectionSpan::collapsed(4));
    }

    #[test]
    fn contract_on_empty_stack_is_a_no_op() {
        let mut editor = editor_with_selection(2, 6);
        let mut stack = ExpansionStack::new();
        assert_eq!(stack.contract(&mut editor), None);
        assert_eq!(editor.selection(), SelectionSpan::from_pair(2, 6));
        assert!(stack.is_empty());
    }

    #[test]
    fn external_selection_change_resets_history() {
        let mut editor = editor_with_selection(4, 8);
        let mut stack = ExpansionStack::new();
        stack.expand(&mut editor, NavigatorResult::Span(0, 11));

        // user selects somewhere that does not contain (4, 8)
        editor.set_selection(SelectionSpan::from_pair(9, 10));
        assert_eq!(stack.contract(&mut editor), None);
        assert_eq!(editor.selection(), SelectionSpan::from_pair(9, 10));

        stack.expand(&mut editor, NavigatorResult::Span(1, 10));
        assert_eq!(stack.depth(), 2);
        assert_eq!(
            stack.contract(&mut editor),
            Some(SelectionSpan::from_pair(9, 10))
        );
        assert_eq!(stack.contract(&mut editor), None);
    }

    #[test]
    fn containment_is_checked_one_level_down() {
        let mut editor = editor_with_selection(4, 5);
        let mut stack = ExpansionStack::new();
        stack.expand(&mut editor, NavigatorResult::Span(3, 8));

        // narrower than the top frame but still containing the frame below it
        editor.set_selection(SelectionSpan::from_pair(3, 6));
        stack.expand(&mut editor, NavigatorResult::Span(0, 11));
        assert_eq!(stack.depth(), 3);
    }

    #[test]
    fn history_starts_from_the_clamped_selection() {
        let mut editor = editor_with_selection(4, 40);
        let mut stack = ExpansionStack::new();
        stack.expand(&mut editor, NavigatorResult::Span(0, 11));
        assert_eq!(
            stack.contract(&mut editor),
            Some(SelectionSpan::from_pair(4, 11))
        );
        assert_eq!(editor.selection(), SelectionSpan::from_pair(4, 11));
    }

    #[test]
    fn clones_share_frames() {
        let mut editor = editor_with_selection(4, 8);
        let mut stack = ExpansionStack::new();
        stack.expand(&mut editor, NavigatorResult::Span(0, 11));
        let snapshot = stack.clone();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(snapshot.depth(), 2);
        assert_eq!(
            snapshot.top().map(|f| f.range),
            Some(SelectionSpan::from_pair(0, 11))
        );
    }
}
