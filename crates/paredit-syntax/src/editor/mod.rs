//! Structural edits over an [`Ast`].
//!
//! Every function takes the parsed document, a character offset and
//! [`EditOptions`], and returns the changes that perform the edit together
//! with the cursor position afterwards. `None` means the edit does not apply
//! at that position.
//!
//! Changes are listed in the order they must be applied, and each offset is
//! already adjusted for the changes before it. Consumers apply them one after
//! another without rebasing.

mod indent;

pub use indent::indent_range;

use log::trace;

use crate::ast::{Ast, Form};
use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Delete,
}

/// Payload of a change: inserted text, or the number of characters removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeArg {
    Text(String),
    Length(usize),
}

/// One primitive change, as `(kind, start, argument)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChange(pub ChangeKind, pub usize, pub ChangeArg);

impl RawChange {
    pub fn insert(start: usize, text: impl Into<String>) -> Self {
        Self(ChangeKind::Insert, start, ChangeArg::Text(text.into()))
    }

    pub fn delete(start: usize, length: usize) -> Self {
        Self(ChangeKind::Delete, start, ChangeArg::Length(length))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    pub changes: Vec<RawChange>,
    pub new_index: usize,
}

impl EditResult {
    pub fn new(changes: Vec<RawChange>, new_index: usize) -> Self {
        Self { changes, new_index }
    }

    /// A result that only moves the cursor.
    pub fn moved(new_index: usize) -> Self {
        Self::new(Vec::new(), new_index)
    }
}

/// Delimiter pair used when wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Delimiters {
    #[default]
    Parens,
    Square,
    Curly,
}

impl Delimiters {
    pub fn opening(self) -> &'static str {
        match self {
            Delimiters::Parens => "(",
            Delimiters::Square => "[",
            Delimiters::Curly => "{",
        }
    }

    pub fn closing(self) -> &'static str {
        match self {
            Delimiters::Parens => ")",
            Delimiters::Square => "]",
            Delimiters::Curly => "}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOptions {
    /// Other end of the selection, when it is not collapsed.
    pub end_idx: Option<usize>,
    pub backward: bool,
    pub delimiters: Option<Delimiters>,
    /// Body indentation used by [`indent_range`].
    pub indent_width: usize,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            end_idx: None,
            backward: false,
            delimiters: None,
            indent_width: 2,
        }
    }
}

impl EditOptions {
    pub fn backward() -> Self {
        Self {
            backward: true,
            ..Self::default()
        }
    }

    pub fn with_end(mut self, end_idx: usize) -> Self {
        self.end_idx = Some(end_idx);
        self
    }

    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = Some(delimiters);
        self
    }

    /// The selection as `(min, max)` when it spans at least one character.
    fn region(&self, idx: usize) -> Option<(usize, usize)> {
        self.end_idx
            .filter(|&end| end != idx)
            .map(|end| (idx.min(end), idx.max(end)))
    }
}

/// Index of the child the cursor sits strictly inside.
fn form_around(children: &[Form<'_>], idx: usize) -> Option<usize> {
    children
        .iter()
        .position(|f| f.start() < idx && idx < f.end())
}

/// Move the enclosing collection's closer past the next form, or its opener
/// before the previous one. Walks outward until a collection has a sibling
/// in that direction.
pub fn slurp_sexp(ast: &Ast, idx: usize, opts: &EditOptions) -> Option<EditResult> {
    let mut current = ast.containing_list(idx);
    while let Some(list) = current {
        if list.is_closed() {
            let sibling = if opts.backward {
                list.prev_sibling()
            } else {
                list.next_sibling()
            };
            if let Some(sibling) = sibling {
                trace!("slurp {:?} at {}", sibling.text(), list.start());
                let changes = if opts.backward {
                    vec![
                        RawChange::delete(list.start(), list.opening().len()),
                        RawChange::insert(sibling.start(), list.opening()),
                    ]
                } else {
                    let close = list.closing();
                    vec![
                        RawChange::delete(list.end() - close.len(), close.len()),
                        RawChange::insert(sibling.end() - close.len(), close),
                    ]
                };
                return Some(EditResult::new(changes, idx));
            }
        }
        current = list.parent_list();
    }
    None
}

/// Push the last form out of the enclosing collection, or the first one when
/// going backward.
pub fn barf_sexp(ast: &Ast, idx: usize, opts: &EditOptions) -> Option<EditResult> {
    let list = ast.containing_list(idx).filter(|l| l.is_closed())?;
    let children = list.children();
    if children.is_empty() {
        return None;
    }

    if opts.backward {
        let new_open = children.get(1).map_or(list.inner_end(), |f| f.start());
        let changes = vec![
            RawChange::insert(new_open, list.opening()),
            RawChange::delete(list.start(), list.opening().len()),
        ];
        let new_index = if idx < new_open { idx - 1 } else { idx };
        Some(EditResult::new(changes, new_index))
    } else {
        let new_close = match children.len() {
            1 => list.inner_start(),
            n => children[n - 2].end(),
        };
        let changes = vec![
            RawChange::delete(list.inner_end(), list.closing().len()),
            RawChange::insert(new_close, list.closing()),
        ];
        let new_index = if idx > new_close { idx + 1 } else { idx };
        Some(EditResult::new(changes, new_index))
    }
}

/// Remove the delimiters of the enclosing collection.
pub fn splice_sexp(ast: &Ast, idx: usize, _opts: &EditOptions) -> Option<EditResult> {
    let list = ast.containing_list(idx)?;
    let mut changes = Vec::with_capacity(2);
    if list.is_closed() {
        changes.push(RawChange::delete(list.inner_end(), list.closing().len()));
    }
    changes.push(RawChange::delete(list.start(), list.opening().len()));
    Some(EditResult::new(changes, idx - list.opening().len()))
}

/// Split the enclosing collection in two at the cursor. A cursor inside an
/// atom splits after that atom.
pub fn split_sexp(ast: &Ast, idx: usize, _opts: &EditOptions) -> Option<EditResult> {
    let list = ast.containing_list(idx).filter(|l| l.is_closed())?;
    let children = list.children();
    let split_at = form_around(&children, idx).map_or(idx, |i| children[i].end());

    let left = children
        .iter()
        .rev()
        .find(|f| f.end() <= split_at)
        .map_or(list.inner_start(), |f| f.end());
    let right = children
        .iter()
        .find(|f| f.start() >= split_at)
        .map_or(list.inner_end(), |f| f.start());

    let mut changes = Vec::with_capacity(2);
    if right > left {
        changes.push(RawChange::delete(left, right - left));
    }
    changes.push(RawChange::insert(
        left,
        format!("{} {}", list.closing(), list.opening()),
    ));
    Some(EditResult::new(changes, left + list.closing().len()))
}

/// Delete a balanced region.
fn kill_region(ast: &Ast, start: usize, end: usize) -> Option<EditResult> {
    if !ast.is_balanced(start, end) {
        trace!("refusing to delete unbalanced region {start}..{end}");
        return None;
    }
    Some(EditResult::new(
        vec![RawChange::delete(start, end - start)],
        start,
    ))
}

/// Delete from the cursor to the end of the next form, or back to the start
/// of the previous one. Inside a string only the string's contents go.
pub fn kill_sexp(ast: &Ast, idx: usize, opts: &EditOptions) -> Option<EditResult> {
    if let Some((start, end)) = opts.region(idx) {
        return kill_region(ast, start, end);
    }

    let children = ast.container_at(idx).children();
    if opts.backward {
        let prev = children.iter().rev().find(|f| f.start() < idx)?;
        let start = if prev.is_string() && idx < prev.end() {
            prev.start() + 1
        } else {
            prev.start()
        };
        if start >= idx {
            return None;
        }
        Some(EditResult::new(
            vec![RawChange::delete(start, idx - start)],
            start,
        ))
    } else {
        let next = children.iter().find(|f| f.end() > idx)?;
        let end = if next.is_terminated_string() && next.start() < idx {
            next.end() - 1
        } else {
            next.end()
        };
        if end <= idx {
            return None;
        }
        Some(EditResult::new(vec![RawChange::delete(idx, end - idx)], idx))
    }
}

/// Kill everything after the cursor in the enclosing collection (or before
/// it when going backward) and splice what remains into the parent.
pub fn splice_sexp_kill(ast: &Ast, idx: usize, opts: &EditOptions) -> Option<EditResult> {
    let list = ast.containing_list(idx)?;
    let children = list.children();
    let inside_atom = form_around(&children, idx).is_some();
    let open_len = list.opening().len();

    if opts.backward {
        let right = if inside_atom {
            idx
        } else {
            children
                .iter()
                .find(|f| f.start() >= idx)
                .map_or(list.inner_end(), |f| f.start())
        };
        let mut changes = Vec::with_capacity(2);
        if list.is_closed() {
            changes.push(RawChange::delete(list.inner_end(), list.closing().len()));
        }
        changes.push(RawChange::delete(list.start(), right - list.start()));
        Some(EditResult::new(changes, list.start()))
    } else {
        let left = if inside_atom {
            idx
        } else {
            children
                .iter()
                .rev()
                .find(|f| f.end() <= idx)
                .map_or(list.inner_start(), |f| f.end())
        };
        let changes = vec![
            RawChange::delete(left, list.end() - left),
            RawChange::delete(list.start(), open_len),
        ];
        Some(EditResult::new(changes, left - open_len))
    }
}

/// Delete one character without breaking structure. Delimiters of non-empty
/// collections and strings are stepped over instead of deleted; empty ones are
/// deleted whole.
pub fn delete(ast: &Ast, idx: usize, opts: &EditOptions) -> Option<EditResult> {
    if let Some((start, end)) = opts.region(idx) {
        return kill_region(ast, start, end);
    }
    if opts.backward {
        delete_backward(ast, idx)
    } else {
        delete_forward(ast, idx)
    }
}

/// How a delete touching a delimiter token resolves.
enum DelimiterDelete {
    /// The token closes or opens an empty collection: remove the pair.
    Pair(usize, usize),
    /// An unmatched delimiter: remove just the character.
    Single,
    /// A delimiter of a collection with contents.
    Structural,
}

fn delimiter_delete(ast: &Ast, pos: usize) -> Option<(SyntaxKind, DelimiterDelete)> {
    let token = ast.token_at(pos)?;
    let kind = token.kind();
    if !kind.is_opener() && !kind.is_closer() {
        return None;
    }
    let parent = token.parent().filter(|p| p.kind().is_list());
    let Some(list) = parent.map(|p| ast.form(p)) else {
        return Some((kind, DelimiterDelete::Single));
    };
    let outcome = if !list.is_closed() {
        DelimiterDelete::Single
    } else if list.inner_start() == list.inner_end() {
        DelimiterDelete::Pair(list.start(), list.len())
    } else {
        DelimiterDelete::Structural
    };
    Some((kind, outcome))
}

/// String token at `pos` as `(kind, start, end)`.
fn string_at(ast: &Ast, pos: usize) -> Option<(SyntaxKind, usize, usize)> {
    let token = ast.token_at(pos)?;
    let kind = token.kind();
    if !matches!(kind, SyntaxKind::STRING | SyntaxKind::UNTERMINATED_STRING) {
        return None;
    }
    let (start, end) = ast.token_range(&token);
    Some((kind, start, end))
}

fn delete_forward(ast: &Ast, idx: usize) -> Option<EditResult> {
    if idx >= ast.len() {
        return None;
    }

    if let Some((kind, outcome)) = delimiter_delete(ast, idx) {
        return Some(match outcome {
            DelimiterDelete::Pair(start, len) => {
                EditResult::new(vec![RawChange::delete(start, len)], start)
            }
            DelimiterDelete::Single => EditResult::new(vec![RawChange::delete(idx, 1)], idx),
            DelimiterDelete::Structural if kind.is_opener() => EditResult::moved(idx + 1),
            DelimiterDelete::Structural => EditResult::moved(idx),
        });
    }

    if let Some((kind, start, end)) = string_at(ast, idx) {
        let empty = kind == SyntaxKind::STRING && end - start == 2;
        if empty {
            return Some(EditResult::new(vec![RawChange::delete(start, 2)], start));
        }
        if idx == start {
            return Some(EditResult::moved(idx + 1));
        }
        if kind == SyntaxKind::STRING && idx == end - 1 {
            return Some(EditResult::moved(idx));
        }
        if ast.char_at(idx) == Some('\\') && idx + 1 < end {
            return Some(EditResult::new(vec![RawChange::delete(idx, 2)], idx));
        }
    }

    Some(EditResult::new(vec![RawChange::delete(idx, 1)], idx))
}

fn delete_backward(ast: &Ast, idx: usize) -> Option<EditResult> {
    if idx == 0 || idx > ast.len() {
        return None;
    }
    let pos = idx - 1;

    if let Some((kind, outcome)) = delimiter_delete(ast, pos) {
        return Some(match outcome {
            DelimiterDelete::Pair(start, len) => {
                EditResult::new(vec![RawChange::delete(start, len)], start)
            }
            DelimiterDelete::Single => EditResult::new(vec![RawChange::delete(pos, 1)], pos),
            DelimiterDelete::Structural if kind.is_closer() => EditResult::moved(pos),
            DelimiterDelete::Structural => EditResult::moved(idx),
        });
    }

    if let Some((kind, start, end)) = string_at(ast, pos) {
        let empty = kind == SyntaxKind::STRING && end - start == 2;
        if empty {
            return Some(EditResult::new(vec![RawChange::delete(start, 2)], start));
        }
        if pos == start {
            return Some(EditResult::moved(idx));
        }
        if kind == SyntaxKind::STRING && pos == end - 1 {
            return Some(EditResult::moved(pos));
        }
        if pos > start + 1 && ast.char_at(pos - 1) == Some('\\') {
            return Some(EditResult::new(vec![RawChange::delete(pos - 1, 2)], pos - 1));
        }
    }

    Some(EditResult::new(vec![RawChange::delete(pos, 1)], pos))
}

/// Wrap the selection, or the form at or after the cursor, in delimiters.
pub fn wrap_around(ast: &Ast, idx: usize, opts: &EditOptions) -> Option<EditResult> {
    let delimiters = opts.delimiters.unwrap_or_default();
    let (open, close) = (delimiters.opening(), delimiters.closing());

    if let Some((start, end)) = opts.region(idx) {
        if !ast.is_balanced(start, end) {
            return None;
        }
        let changes = vec![RawChange::insert(end, close), RawChange::insert(start, open)];
        return Some(EditResult::new(changes, start + open.len()));
    }

    let children = ast.container_at(idx).children();
    let target = children
        .iter()
        .find(|f| f.start() <= idx && idx < f.end())
        .or_else(|| children.iter().find(|f| f.start() >= idx));

    match target {
        Some(form) => {
            let changes = vec![
                RawChange::insert(form.end(), close),
                RawChange::insert(form.start(), open),
            ];
            Some(EditResult::new(changes, form.start() + open.len()))
        }
        None => Some(EditResult::new(
            vec![RawChange::insert(idx, format!("{open}{close}"))],
            idx + open.len(),
        )),
    }
}

/// Swap the forms before and after the cursor. Inside an atom, that atom is
/// swapped with the next form.
pub fn transpose(ast: &Ast, idx: usize, _opts: &EditOptions) -> Option<EditResult> {
    let children = ast.container_at(idx).children();
    let (prev, next) = match form_around(&children, idx) {
        Some(i) => (children.get(i)?, children.get(i + 1)?),
        None => (
            children.iter().rev().find(|f| f.end() <= idx)?,
            children.iter().find(|f| f.start() >= idx)?,
        ),
    };

    let changes = vec![
        RawChange::delete(next.start(), next.len()),
        RawChange::insert(next.start(), prev.text()),
        RawChange::delete(prev.start(), prev.len()),
        RawChange::insert(prev.start(), next.text()),
    ];
    Some(EditResult::new(changes, next.end()))
}
