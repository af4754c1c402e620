use std::collections::HashSet;

use log::debug;

use crate::clipboard::ClipboardSink;
use crate::editing::TextEditor;
use crate::error::PareditError;
use crate::expansion::ExpansionStack;
use crate::operations::{Context, Operation, Outcome, decorators};

/// Languages structural editing is enabled for unless configured otherwise.
pub const DEFAULT_LANGUAGES: &[&str] = &["clojure", "hy", "lisp", "scheme"];

pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// State shared by every command run against one editor window: whether
/// structural editing is on, which languages it applies to, and the
/// expand/contract history.
#[derive(Debug, Clone)]
pub struct Session {
    enabled: bool,
    languages: HashSet<String>,
    expansion: ExpansionStack,
    indent_width: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            enabled: true,
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            expansion: ExpansionStack::new(),
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flip the enabled flag, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        debug!("structural editing {}", if self.enabled { "on" } else { "off" });
        self.enabled
    }

    pub fn supports(&self, language_id: &str) -> bool {
        self.languages.contains(language_id)
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    pub fn expansion(&self) -> &ExpansionStack {
        &self.expansion
    }

    /// Forget the expand/contract history; call when the editor switches
    /// to another document.
    pub fn document_changed(&mut self) {
        debug!("document changed, clearing {} expansion frames", self.expansion.depth());
        self.expansion.clear();
    }

    /// Run one command against `editor`.
    ///
    /// Does nothing, successfully, when the session is off or the editor's
    /// language is not one of the session's.
    pub fn run<E, C>(
        &mut self,
        op: Operation,
        editor: &mut E,
        clipboard: &mut C,
    ) -> Result<Outcome, PareditError>
    where
        E: TextEditor + ?Sized,
        C: ClipboardSink + ?Sized,
    {
        if !self.enabled {
            debug!("{op} skipped: structural editing is off");
            return Ok(Outcome::Skipped);
        }
        if !self.supports(editor.language_id()) {
            debug!("{op} skipped: language {:?} not enabled", editor.language_id());
            return Ok(Outcome::Skipped);
        }

        debug!("running {op}");
        let mut ctx = Context::new(editor, self.indent_width);
        let outcome = match op {
            Operation::Navigate(motion) => {
                Outcome::Selected(decorators::navigate(&motion, &mut ctx))
            }
            Operation::Yank(motion) => {
                decorators::yank(&motion, &mut ctx, clipboard)?;
                Outcome::Copied
            }
            Operation::Cut(motion) => Outcome::Edited {
                applied: decorators::cut(&motion, &mut ctx, clipboard)?,
            },
            Operation::ExpandSelection => {
                Outcome::Selected(decorators::expand_selection(&mut ctx, &mut self.expansion))
            }
            Operation::ContractSelection => {
                decorators::contract_selection(&mut ctx, &mut self.expansion)
                    .map_or(Outcome::Unchanged, Outcome::Selected)
            }
            Operation::Edit(edit) => decorators::edit(&edit, &mut ctx)?,
            Operation::IndentRange => Outcome::Edited {
                applied: decorators::indent(&mut ctx)?,
            },
        };
        debug!("{op} finished: {outcome:?}");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::editing::{RopeEditor, SelectionSpan};
    use crate::operations::{Motion, StructuralEdit};
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let session = Session::new();
        assert!(session.is_enabled());
        assert_eq!(session.indent_width(), 2);
        for lang in ["clojure", "hy", "lisp", "scheme"] {
            assert!(session.supports(lang), "{lang}");
        }
        assert!(!session.supports("rust"));
        assert!(session.expansion().is_empty());
    }

    #[test]
    fn toggle_flips_enabled() {
        let mut session = Session::new();
        assert!(!session.toggle());
        assert!(!session.is_enabled());
        assert!(session.toggle());
    }

    #[test]
    fn disabled_session_skips() {
        let mut session = Session::new().with_enabled(false);
        let mut editor = RopeEditor::new("clojure", "(a b) c");
        editor.set_selection(SelectionSpan::collapsed(4));
        let outcome = session
            .run(
                Operation::Edit(StructuralEdit::Slurp { backward: false }),
                &mut editor,
                &mut MemoryClipboard::new(),
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(editor.text(), "(a b) c");
        assert_eq!(editor.selection(), SelectionSpan::collapsed(4));
    }

    #[test]
    fn unsupported_language_skips() {
        let mut session = Session::new().with_languages(["scheme"]);
        let mut editor = RopeEditor::new("clojure", "(a b)");
        let outcome = session
            .run(
                Operation::Navigate(Motion::ForwardSexp),
                &mut editor,
                &mut MemoryClipboard::new(),
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(editor.revealed(), None);
    }

    #[test]
    fn yank_reports_copy() {
        let mut session = Session::new();
        let mut clipboard = MemoryClipboard::new();
        let mut editor = RopeEditor::new("lisp", "(a (b c) d)");
        editor.set_selection(SelectionSpan::collapsed(3));
        let outcome = session
            .run(Operation::Yank(Motion::ForwardSexp), &mut editor, &mut clipboard)
            .unwrap();
        assert_eq!(outcome, Outcome::Copied);
        assert_eq!(clipboard.contents(), Some("(b c)"));
    }

    #[test]
    fn contract_without_history_is_unchanged() {
        let mut session = Session::new();
        let mut editor = RopeEditor::new("hy", "(a b)");
        let outcome = session
            .run(
                Operation::ContractSelection,
                &mut editor,
                &mut MemoryClipboard::new(),
            )
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
    }

    #[test]
    fn expansion_history_lives_in_the_session() {
        let mut session = Session::new();
        let mut editor = RopeEditor::new("clojure", "(a (b c) d)");
        let mut clipboard = MemoryClipboard::new();
        editor.set_selection(SelectionSpan::collapsed(4));
        session
            .run(Operation::ExpandSelection, &mut editor, &mut clipboard)
            .unwrap();
        assert_eq!(session.expansion().depth(), 2);

        session.document_changed();
        assert!(session.expansion().is_empty());
        let outcome = session
            .run(Operation::ContractSelection, &mut editor, &mut clipboard)
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
    }
}
