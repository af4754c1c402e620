//! Structural motions over an [`Ast`].
//!
//! Every function maps a character offset to a new offset or offset range.
//! A motion with nowhere to go returns the offset it was given.

use crate::ast::{Ast, Form};

/// Result of a motion: a single position, or a range whose second element is
/// the active edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorResult {
    Collapsed(usize),
    Span(usize, usize),
}

impl NavigatorResult {
    /// Normalise to an offset pair; a collapsed result pairs with `cursor`.
    pub fn into_pair(self, cursor: usize) -> (usize, usize) {
        match self {
            NavigatorResult::Collapsed(offset) => (cursor, offset),
            NavigatorResult::Span(a, b) => (a, b),
        }
    }
}

fn next_form<'a>(container: &Form<'a>, idx: usize) -> Option<Form<'a>> {
    container.children().into_iter().find(|f| f.end() > idx)
}

fn prev_form<'a>(container: &Form<'a>, idx: usize) -> Option<Form<'a>> {
    container.children().into_iter().rev().find(|f| f.start() < idx)
}

/// End of the form at or after `idx`.
pub fn forward_sexp(ast: &Ast, idx: usize) -> NavigatorResult {
    let container = ast.container_at(idx);
    let target = next_form(&container, idx).map_or(idx, |f| f.end());
    NavigatorResult::Collapsed(target)
}

/// Start of the form before `idx`.
pub fn backward_sexp(ast: &Ast, idx: usize) -> NavigatorResult {
    let container = ast.container_at(idx);
    let target = prev_form(&container, idx).map_or(idx, |f| f.start());
    NavigatorResult::Collapsed(target)
}

/// Just inside the next collection at this level.
pub fn forward_down_sexp(ast: &Ast, idx: usize) -> NavigatorResult {
    let container = ast.container_at(idx);
    let target = container
        .children()
        .into_iter()
        .filter(|f| f.start() >= idx)
        .find_map(|f| f.as_list())
        .map_or(idx, |list| list.inner_start());
    NavigatorResult::Collapsed(target)
}

/// Start of the enclosing collection.
pub fn backward_up_sexp(ast: &Ast, idx: usize) -> NavigatorResult {
    let target = ast.containing_list(idx).map_or(idx, |list| list.start());
    NavigatorResult::Collapsed(target)
}

/// Just past the closing delimiter of the enclosing collection.
pub fn close_list(ast: &Ast, idx: usize) -> NavigatorResult {
    let target = ast.containing_list(idx).map_or(idx, |list| list.end());
    NavigatorResult::Collapsed(target)
}

/// Range of the top-level form around `idx`.
pub fn range_for_defun(ast: &Ast, idx: usize) -> NavigatorResult {
    ast.top_level()
        .children()
        .into_iter()
        .find(|f| f.start() <= idx && idx <= f.end())
        .map_or(NavigatorResult::Collapsed(idx), |f| {
            NavigatorResult::Span(f.start(), f.end())
        })
}

/// Smallest structural range strictly enclosing `start..end`: an atom, a
/// collection's interior, or a whole form. Returns the input range when
/// nothing encloses it.
pub fn sexp_range_expansion(ast: &Ast, start: usize, end: usize) -> NavigatorResult {
    let mut candidates = Vec::new();
    for form in ast.forms() {
        candidates.push((form.start(), form.end()));
        if form.is_list() {
            candidates.push((form.inner_start(), form.inner_end()));
        }
    }

    let (a, b) = candidates
        .into_iter()
        .filter(|&(a, b)| a <= start && end <= b && (a, b) != (start, end))
        .min_by_key(|&(a, b)| b - a)
        .unwrap_or((start, end));
    NavigatorResult::Span(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse;
    use rstest::rstest;

    const SRC: &str = "(a (b c) d)";

    #[rstest]
    #[case(0, 11)]
    #[case(1, 2)]
    #[case(2, 8)]
    #[case(3, 8)]
    #[case(4, 5)]
    #[case(7, 7)]
    #[case(10, 10)]
    fn forward(#[case] idx: usize, #[case] expected: usize) {
        let ast = parse(SRC);
        assert_eq!(forward_sexp(&ast, idx), NavigatorResult::Collapsed(expected));
    }

    #[rstest]
    #[case(11, 0)]
    #[case(10, 9)]
    #[case(9, 3)]
    #[case(8, 3)]
    #[case(6, 4)]
    #[case(4, 4)]
    #[case(1, 1)]
    fn backward(#[case] idx: usize, #[case] expected: usize) {
        let ast = parse(SRC);
        assert_eq!(
            backward_sexp(&ast, idx),
            NavigatorResult::Collapsed(expected)
        );
    }

    #[test]
    fn down_skips_atoms() {
        let ast = parse(SRC);
        assert_eq!(forward_down_sexp(&ast, 1), NavigatorResult::Collapsed(4));
        assert_eq!(forward_down_sexp(&ast, 0), NavigatorResult::Collapsed(1));
        assert_eq!(forward_down_sexp(&ast, 8), NavigatorResult::Collapsed(8));
    }

    #[test]
    fn down_enters_prefixed_collections() {
        let ast = parse("x #{a}");
        assert_eq!(forward_down_sexp(&ast, 1), NavigatorResult::Collapsed(4));
    }

    #[test]
    fn up_and_close() {
        let ast = parse(SRC);
        assert_eq!(backward_up_sexp(&ast, 5), NavigatorResult::Collapsed(3));
        assert_eq!(backward_up_sexp(&ast, 2), NavigatorResult::Collapsed(0));
        assert_eq!(backward_up_sexp(&ast, 0), NavigatorResult::Collapsed(0));
        assert_eq!(close_list(&ast, 5), NavigatorResult::Collapsed(8));
        assert_eq!(close_list(&ast, 9), NavigatorResult::Collapsed(11));
    }

    #[test]
    fn defun_range() {
        let ast = parse("(a)\n(b (c))\n");
        assert_eq!(range_for_defun(&ast, 7), NavigatorResult::Span(4, 11));
        assert_eq!(range_for_defun(&ast, 0), NavigatorResult::Span(0, 3));
        assert_eq!(range_for_defun(&ast, 12), NavigatorResult::Collapsed(12));
    }

    #[test]
    fn expansion_walks_outward() {
        let ast = parse(SRC);
        assert_eq!(sexp_range_expansion(&ast, 4, 4), NavigatorResult::Span(4, 5));
        assert_eq!(sexp_range_expansion(&ast, 4, 5), NavigatorResult::Span(4, 7));
        assert_eq!(sexp_range_expansion(&ast, 4, 7), NavigatorResult::Span(3, 8));
        assert_eq!(sexp_range_expansion(&ast, 4, 8), NavigatorResult::Span(3, 8));
        assert_eq!(sexp_range_expansion(&ast, 3, 8), NavigatorResult::Span(1, 10));
        assert_eq!(sexp_range_expansion(&ast, 1, 10), NavigatorResult::Span(0, 11));
        assert_eq!(sexp_range_expansion(&ast, 0, 11), NavigatorResult::Span(0, 11));
    }

    #[test]
    fn into_pair_uses_cursor_for_collapsed() {
        assert_eq!(NavigatorResult::Collapsed(8).into_pair(4), (4, 8));
        assert_eq!(NavigatorResult::Span(3, 1).into_pair(9), (3, 1));
    }
}
