use paredit_syntax::Ast;
use paredit_syntax::editor::{self, Delimiters, EditOptions, EditResult};

/// Something that computes a structural edit at a position.
pub trait StructuralEditor {
    fn edit_at(&self, ast: &Ast, start: usize, opts: &EditOptions) -> Option<EditResult>;

    /// Whether the edited region should be left unindented.
    fn skips_indent(&self) -> bool {
        false
    }
}

impl<F> StructuralEditor for F
where
    F: Fn(&Ast, usize, &EditOptions) -> Option<EditResult>,
{
    fn edit_at(&self, ast: &Ast, start: usize, opts: &EditOptions) -> Option<EditResult> {
        self(ast, start, opts)
    }
}

/// Every structural edit command, with its direction or delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralEdit {
    Slurp { backward: bool },
    Barf { backward: bool },
    Splice,
    Split,
    Kill { backward: bool },
    SpliceKill { backward: bool },
    Delete { backward: bool },
    Wrap(Delimiters),
    Transpose,
}

type EditFn = fn(&Ast, usize, &EditOptions) -> Option<EditResult>;

impl StructuralEdit {
    pub const ALL: [StructuralEdit; 16] = [
        StructuralEdit::Slurp { backward: false },
        StructuralEdit::Slurp { backward: true },
        StructuralEdit::Barf { backward: false },
        StructuralEdit::Barf { backward: true },
        StructuralEdit::Splice,
        StructuralEdit::Split,
        StructuralEdit::Kill { backward: false },
        StructuralEdit::Kill { backward: true },
        StructuralEdit::SpliceKill { backward: false },
        StructuralEdit::SpliceKill { backward: true },
        StructuralEdit::Delete { backward: false },
        StructuralEdit::Delete { backward: true },
        StructuralEdit::Wrap(Delimiters::Parens),
        StructuralEdit::Wrap(Delimiters::Square),
        StructuralEdit::Wrap(Delimiters::Curly),
        StructuralEdit::Transpose,
    ];

    /// Name used in command identifiers.
    pub fn name(self) -> &'static str {
        use StructuralEdit::*;
        match self {
            Slurp { backward: false } => "slurpSexpForward",
            Slurp { backward: true } => "slurpSexpBackward",
            Barf { backward: false } => "barfSexpForward",
            Barf { backward: true } => "barfSexpBackward",
            Splice => "spliceSexp",
            Split => "splitSexp",
            Kill { backward: false } => "killSexpForward",
            Kill { backward: true } => "killSexpBackward",
            SpliceKill { backward: false } => "spliceSexpKillForward",
            SpliceKill { backward: true } => "spliceSexpKillBackward",
            Delete { backward: false } => "deleteForward",
            Delete { backward: true } => "deleteBackward",
            Wrap(Delimiters::Parens) => "wrapAroundParens",
            Wrap(Delimiters::Square) => "wrapAroundSquare",
            Wrap(Delimiters::Curly) => "wrapAroundCurly",
            Transpose => "transpose",
        }
    }

    fn editor_fn(self) -> EditFn {
        use StructuralEdit::*;
        match self {
            Slurp { .. } => editor::slurp_sexp,
            Barf { .. } => editor::barf_sexp,
            Splice => editor::splice_sexp,
            Split => editor::split_sexp,
            Kill { .. } => editor::kill_sexp,
            SpliceKill { .. } => editor::splice_sexp_kill,
            Delete { .. } => editor::delete,
            Wrap(_) => editor::wrap_around,
            Transpose => editor::transpose,
        }
    }

    /// `opts` with this edit's direction and delimiters applied.
    pub fn options(self, opts: &EditOptions) -> EditOptions {
        let mut opts = opts.clone();
        match self {
            StructuralEdit::Slurp { backward }
            | StructuralEdit::Barf { backward }
            | StructuralEdit::Kill { backward }
            | StructuralEdit::SpliceKill { backward }
            | StructuralEdit::Delete { backward } => opts.backward = backward,
            StructuralEdit::Wrap(delimiters) => opts.delimiters = Some(delimiters),
            StructuralEdit::Splice | StructuralEdit::Split | StructuralEdit::Transpose => {}
        }
        opts
    }
}

impl StructuralEditor for StructuralEdit {
    fn edit_at(&self, ast: &Ast, start: usize, opts: &EditOptions) -> Option<EditResult> {
        (self.editor_fn())(ast, start, &self.options(opts))
    }

    fn skips_indent(&self) -> bool {
        matches!(self, StructuralEdit::Delete { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paredit_syntax::editor::RawChange;
    use paredit_syntax::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn slurp_forward_through_the_enum() {
        let ast = parse("(a b) c");
        let result = StructuralEdit::Slurp { backward: false }
            .edit_at(&ast, 4, &EditOptions::default())
            .unwrap();
        assert_eq!(
            result.changes,
            vec![RawChange::delete(4, 1), RawChange::insert(6, ")")]
        );
    }

    #[test]
    fn options_override_direction_and_delimiters() {
        let base = EditOptions::default().with_end(3);
        let opts = StructuralEdit::Kill { backward: true }.options(&base);
        assert!(opts.backward);
        assert_eq!(opts.end_idx, Some(3));

        let opts = StructuralEdit::Wrap(Delimiters::Curly).options(&base);
        assert_eq!(opts.delimiters, Some(Delimiters::Curly));
        assert!(!opts.backward);
    }

    #[test]
    fn only_deletes_skip_indentation() {
        let skipping: Vec<_> = StructuralEdit::ALL
            .iter()
            .filter(|e| e.skips_indent())
            .map(|e| e.name())
            .collect();
        assert_eq!(skipping, vec!["deleteForward", "deleteBackward"]);
    }

    #[test]
    fn closures_are_structural_editors() {
        let ast = parse("x");
        let noop = |_: &Ast, _: usize, _: &EditOptions| -> Option<EditResult> { None };
        assert_eq!(noop.edit_at(&ast, 0, &EditOptions::default()), None);
        assert!(!noop.skips_indent());
    }
}
