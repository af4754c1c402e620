//! Lisp-style indentation.
//!
//! Lines are visited top-down. The column a line should start at depends on
//! the forms before it, including lines re-indented earlier in the same pass,
//! so every line records how far it shifted and later column lookups add that
//! shift back in. Changes are emitted bottom-up so earlier offsets stay valid.

use crate::ast::Ast;
use crate::syntax_kind::SyntaxKind;

use super::{EditOptions, EditResult, RawChange};

/// Heads whose body is indented by the indent width rather than aligned with
/// the first argument.
const BODY_FORMS: &[&str] = &[
    "let", "let*", "letfn", "letrec", "fn", "lambda", "when", "when-not", "when-let", "if-let",
    "loop", "binding", "do", "doseq", "dotimes", "ns", "try", "catch", "finally", "case",
    "cond", "condp", "progn", "unless", "dolist",
];

fn is_body_form(head: &str) -> bool {
    let name = head.rsplit('/').next().unwrap_or(head);
    name.starts_with("def") || name.starts_with("with-") || BODY_FORMS.contains(&name)
}

/// Character offsets of line starts.
struct Lines {
    starts: Vec<usize>,
}

impl Lines {
    fn new(ast: &Ast) -> Self {
        let mut starts = vec![0];
        starts.extend(
            ast.source()
                .chars()
                .enumerate()
                .filter(|&(_, c)| c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset) - 1
    }

    fn start(&self, line: usize) -> usize {
        self.starts[line]
    }
}

/// One line's replacement indentation.
struct LineEdit {
    start: usize,
    old_len: usize,
    new_len: usize,
}

/// Column of `offset` once earlier lines have been re-indented.
fn column(lines: &Lines, shifts: &[isize], offset: usize) -> usize {
    let line = lines.line_of(offset);
    let col = (offset - lines.start(line)) as isize + shifts[line];
    col.max(0) as usize
}

fn target_column(
    ast: &Ast,
    lines: &Lines,
    shifts: &[isize],
    pos: usize,
    width: usize,
) -> usize {
    let Some(list) = ast.containing_list(pos) else {
        return 0;
    };
    let open_col = column(lines, shifts, list.start());
    let before: Vec<_> = list
        .children()
        .into_iter()
        .filter(|f| f.start() < pos)
        .collect();
    let Some(head) = before.first() else {
        return open_col + list.opening().len();
    };

    if list.kind() != SyntaxKind::LIST || !head.is_symbol() {
        return column(lines, shifts, head.start());
    }
    if is_body_form(head.text()) {
        return open_col + width;
    }
    match before.get(1) {
        Some(arg) if lines.line_of(arg.start()) == lines.line_of(head.start()) => {
            column(lines, shifts, arg.start())
        }
        _ => open_col + width,
    }
}

/// True when the line starting at `line_start` begins inside a string.
fn starts_in_string(ast: &Ast, line_start: usize) -> bool {
    ast.token_at(line_start).is_some_and(|token| {
        matches!(
            token.kind(),
            SyntaxKind::STRING | SyntaxKind::UNTERMINATED_STRING
        ) && ast.token_range(&token).0 < line_start
    })
}

/// Re-indent every line from the one holding `start` to the one holding
/// `opts.end_idx` (or just the first line).
pub fn indent_range(ast: &Ast, start: usize, opts: &EditOptions) -> Option<EditResult> {
    let start = start.min(ast.len());
    let end = opts.end_idx.unwrap_or(start).clamp(start, ast.len());
    let lines = Lines::new(ast);
    let mut shifts = vec![0isize; lines.starts.len()];
    let mut edits = Vec::new();

    for line in lines.line_of(start)..=lines.line_of(end) {
        let line_start = lines.start(line);
        if starts_in_string(ast, line_start) {
            continue;
        }

        let mut text_start = line_start;
        let mut all_spaces = true;
        while let Some(c) = ast.char_at(text_start) {
            match c {
                ' ' => {}
                '\t' => all_spaces = false,
                _ => break,
            }
            text_start += 1;
        }
        if matches!(ast.char_at(text_start), None | Some('\n') | Some('\r')) {
            continue;
        }

        let old_len = text_start - line_start;
        let new_len = target_column(ast, &lines, &shifts, text_start, opts.indent_width);
        if new_len != old_len || !all_spaces {
            shifts[line] = new_len as isize - old_len as isize;
            edits.push(LineEdit {
                start: line_start,
                old_len,
                new_len,
            });
        }
    }

    let mut changes = Vec::with_capacity(edits.len() * 2);
    for edit in edits.iter().rev() {
        if edit.old_len > 0 {
            changes.push(RawChange::delete(edit.start, edit.old_len));
        }
        if edit.new_len > 0 {
            changes.push(RawChange::insert(edit.start, " ".repeat(edit.new_len)));
        }
    }

    Some(EditResult::new(changes, map_offset(start, &edits)))
}

/// Where `offset` lands after the line edits are applied.
fn map_offset(offset: usize, edits: &[LineEdit]) -> usize {
    let mut delta = 0isize;
    for edit in edits {
        if offset >= edit.start + edit.old_len {
            delta += edit.new_len as isize - edit.old_len as isize;
        } else if offset >= edit.start {
            return ((edit.start + edit.new_len) as isize + delta) as usize;
        } else {
            break;
        }
    }
    (offset as isize + delta) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::parse;
    use crate::editor::tests::apply;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn indent_all(src: &str) -> String {
        let ast = parse(src);
        let opts = EditOptions::default().with_end(ast.len());
        let result = indent_range(&ast, 0, &opts).unwrap();
        apply(src, &result.changes)
    }

    #[rstest]
    #[case::body_form("(defn f [x]\n(inc x))", "(defn f [x]\n  (inc x))")]
    #[case::align_with_argument("(foo bar\nbaz)", "(foo bar\n     baz)")]
    #[case::head_alone("(foo\nbar)", "(foo\n  bar)")]
    #[case::vector("[a\nb]", "[a\n b]")]
    #[case::empty_head("(\na)", "(\n a)")]
    #[case::top_level("  (a)\n    (b)", "(a)\n(b)")]
    #[case::tabs("(foo\n\tbar)", "(foo\n  bar)")]
    #[case::let_bindings("(let [x 1\ny 2]\nx)", "(let [x 1\n      y 2]\n  x)")]
    fn indents(#[case] src: &str, #[case] expected: &str) {
        assert_eq!(indent_all(src), expected);
    }

    #[test]
    fn later_lines_follow_earlier_shifts() {
        assert_eq!(indent_all("(a\n(b c\nd))"), "(a\n  (b c\n     d))");
    }

    #[test]
    fn string_contents_are_untouched() {
        let src = "(def s \"a\n   b\")";
        assert_eq!(indent_all(src), src);
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(indent_all("(do\n\n x)"), "(do\n\n  x)");
    }

    #[test]
    fn changes_are_emitted_bottom_up() {
        let ast = parse("(a\n(b c\nd))");
        let opts = EditOptions::default().with_end(ast.len());
        let result = indent_range(&ast, 0, &opts).unwrap();
        assert_eq!(
            result.changes,
            vec![RawChange::insert(8, "     "), RawChange::insert(3, "  ")]
        );
    }

    #[test]
    fn single_line_by_default() {
        let ast = parse("(foo\nbar\nbaz)");
        let result = indent_range(&ast, 5, &EditOptions::default()).unwrap();
        assert_eq!(apply(ast.source(), &result.changes), "(foo\n  bar\nbaz)");
        assert_eq!(result.new_index, 7);
    }

    #[test]
    fn already_indented_is_a_no_op() {
        let ast = parse("(foo\n  bar)");
        let result = indent_range(&ast, 5, &EditOptions::default()).unwrap();
        assert!(result.changes.is_empty());
        assert_eq!(result.new_index, 5);
    }

    #[test]
    fn body_heads() {
        assert!(is_body_form("defmacro"));
        assert!(is_body_form("clojure.core/let"));
        assert!(is_body_form("with-open"));
        assert!(!is_body_form("map"));
    }
}
