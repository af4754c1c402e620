//! Character-addressed view over the Rowan tree.
//!
//! Rowan ranges are UTF-8 byte ranges; editor offsets are character
//! positions. [`Ast`] owns the source, the tree and the mapping between the
//! two, and hands out [`Form`] views whose ranges are already in characters.

use rowan::{NodeOrToken, TextRange, TextSize};

use crate::parser;
use crate::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

/// A parsed document.
#[derive(Debug, Clone)]
pub struct Ast {
    source: String,
    root: SyntaxNode,
    /// Byte offset of every character, followed by the source length.
    char_bytes: Vec<usize>,
}

/// Parse source text into an [`Ast`].
pub fn parse(source: &str) -> Ast {
    Ast::new(source)
}

impl Ast {
    pub fn new(source: &str) -> Self {
        let root = parser::parse(source);
        let mut char_bytes: Vec<usize> = source.char_indices().map(|(b, _)| b).collect();
        char_bytes.push(source.len());
        Self {
            source: source.to_string(),
            root,
            char_bytes,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.root
    }

    /// Document length in characters.
    pub fn len(&self) -> usize {
        self.char_bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte offset of a character offset, clamped to the end of the source.
    pub fn byte_offset(&self, offset: usize) -> usize {
        self.char_bytes[offset.min(self.len())]
    }

    /// Character offset of a byte offset.
    pub fn char_offset(&self, byte: usize) -> usize {
        self.char_bytes.partition_point(|&b| b < byte)
    }

    /// Text between two character offsets.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.source[self.byte_offset(start)..self.byte_offset(end)]
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        if offset >= self.len() {
            return None;
        }
        self.slice(offset, offset + 1).chars().next()
    }

    /// The document as a form container.
    pub fn top_level(&self) -> Form<'_> {
        Form::new(self, self.root.clone())
    }

    /// Innermost collection whose interior contains `offset`. Both interior
    /// edges count, so a cursor right after `(` or right before `)` is inside.
    pub fn containing_list(&self, offset: usize) -> Option<Form<'_>> {
        self.root
            .descendants()
            .filter(|n| n.kind().is_list())
            .map(|n| Form::new(self, n))
            .filter(|f| f.inner_start() <= offset && offset <= f.inner_end())
            .last()
    }

    /// Innermost container around `offset`: a collection, or the document.
    pub fn container_at(&self, offset: usize) -> Form<'_> {
        self.containing_list(offset)
            .unwrap_or_else(|| self.top_level())
    }

    /// View a node of this tree as a form.
    pub fn form(&self, node: SyntaxNode) -> Form<'_> {
        Form::new(self, node)
    }

    /// Every form node in document order.
    pub fn forms(&self) -> impl Iterator<Item = Form<'_>> + '_ {
        self.root
            .descendants()
            .filter(|n| is_form_kind(n.kind()))
            .map(|n| Form::new(self, n))
    }

    /// The token covering the character at `offset`.
    pub fn token_at(&self, offset: usize) -> Option<SyntaxToken> {
        if offset >= self.len() {
            return None;
        }
        let range = TextRange::new(
            TextSize::from(self.byte_offset(offset) as u32),
            TextSize::from(self.byte_offset(offset + 1) as u32),
        );
        match self.root.covering_element(range) {
            NodeOrToken::Token(token) => Some(token),
            NodeOrToken::Node(_) => None,
        }
    }

    /// Character range of a token.
    pub fn token_range(&self, token: &SyntaxToken) -> (usize, usize) {
        let range = token.text_range();
        (
            self.char_offset(u32::from(range.start()) as usize),
            self.char_offset(u32::from(range.end()) as usize),
        )
    }

    /// True when deleting or wrapping `start..end` keeps every delimiter
    /// paired: each form overlapping the range is either fully inside it or
    /// fully encloses it without touching its delimiters.
    pub fn is_balanced(&self, start: usize, end: usize) -> bool {
        self.forms()
            .filter(|f| f.start() < end && start < f.end())
            .all(|f| {
                let contained = start <= f.start() && f.end() <= end;
                let enclosing = if f.is_list() {
                    f.inner_start() <= start && end <= f.inner_end()
                } else if f.is_string() {
                    f.start() < start && end < f.end()
                } else {
                    f.start() <= start && end <= f.end()
                };
                contained || enclosing
            })
    }
}

fn is_form_kind(kind: SyntaxKind) -> bool {
    kind.is_list() || matches!(kind, SyntaxKind::ATOM | SyntaxKind::PREFIXED)
}

/// A form (or the document root) with character ranges.
#[derive(Debug, Clone)]
pub struct Form<'a> {
    ast: &'a Ast,
    node: SyntaxNode,
}

impl PartialEq for Form<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<'a> Form<'a> {
    fn new(ast: &'a Ast, node: SyntaxNode) -> Self {
        Self { ast, node }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.node.kind()
    }

    pub fn syntax(&self) -> &SyntaxNode {
        &self.node
    }

    pub fn start(&self) -> usize {
        self.ast
            .char_offset(u32::from(self.node.text_range().start()) as usize)
    }

    pub fn end(&self) -> usize {
        self.ast
            .char_offset(u32::from(self.node.text_range().end()) as usize)
    }

    pub fn len(&self) -> usize {
        self.end() - self.start()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn text(&self) -> &'a str {
        self.ast.slice(self.start(), self.end())
    }

    pub fn is_root(&self) -> bool {
        self.kind() == SyntaxKind::ROOT
    }

    pub fn is_list(&self) -> bool {
        self.kind().is_list()
    }

    pub fn is_string(&self) -> bool {
        self.kind() == SyntaxKind::ATOM
            && self.first_token().is_some_and(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::STRING | SyntaxKind::UNTERMINATED_STRING
                )
            })
    }

    /// A string atom that ends with its closing quote.
    pub fn is_terminated_string(&self) -> bool {
        self.kind() == SyntaxKind::ATOM
            && self
                .first_token()
                .is_some_and(|t| t.kind() == SyntaxKind::STRING)
    }

    pub fn is_symbol(&self) -> bool {
        self.kind() == SyntaxKind::ATOM
            && self
                .first_token()
                .is_some_and(|t| t.kind() == SyntaxKind::SYMBOL)
    }

    fn first_token(&self) -> Option<SyntaxToken> {
        self.node.first_token()
    }

    /// Whether a collection ends with its matching closer.
    pub fn is_closed(&self) -> bool {
        let Some(opener) = self.node.first_token().map(|t| t.kind()) else {
            return false;
        };
        let closer = self
            .node
            .children_with_tokens()
            .last()
            .and_then(|e| e.into_token())
            .map(|t| t.kind());
        opener.closer().is_some() && closer == opener.closer()
    }

    /// Opening delimiter text for collections.
    pub fn opening(&self) -> &'static str {
        match self.kind() {
            SyntaxKind::LIST => "(",
            SyntaxKind::VECTOR => "[",
            SyntaxKind::MAP => "{",
            _ => "",
        }
    }

    /// Closing delimiter text for collections.
    pub fn closing(&self) -> &'static str {
        match self.kind() {
            SyntaxKind::LIST => ")",
            SyntaxKind::VECTOR => "]",
            SyntaxKind::MAP => "}",
            _ => "",
        }
    }

    pub fn inner_start(&self) -> usize {
        self.start() + self.opening().len()
    }

    pub fn inner_end(&self) -> usize {
        if self.is_closed() {
            self.end() - self.closing().len()
        } else {
            self.end()
        }
    }

    /// Child forms, skipping trivia and error nodes.
    pub fn children(&self) -> Vec<Form<'a>> {
        self.node
            .children()
            .filter(|n| is_form_kind(n.kind()))
            .map(|n| Form::new(self.ast, n))
            .collect()
    }

    /// The collection this form is or wraps, looking through reader prefixes.
    pub fn as_list(&self) -> Option<Form<'a>> {
        match self.kind() {
            kind if kind.is_list() => Some(self.clone()),
            SyntaxKind::PREFIXED => self
                .node
                .children()
                .find(|n| is_form_kind(n.kind()))
                .and_then(|n| Form::new(self.ast, n).as_list()),
            _ => None,
        }
    }

    /// This form including any reader prefixes applied to it.
    pub fn outermost(&self) -> Form<'a> {
        let mut node = self.node.clone();
        while let Some(parent) = node.parent() {
            if parent.kind() != SyntaxKind::PREFIXED {
                break;
            }
            node = parent;
        }
        Form::new(self.ast, node)
    }

    /// Enclosing container (collection or root) of this form's outermost wrapper.
    pub fn container(&self) -> Option<Form<'a>> {
        self.outermost()
            .node
            .parent()
            .map(|n| Form::new(self.ast, n))
    }

    /// Sibling forms after this one in its container.
    pub fn next_sibling(&self) -> Option<Form<'a>> {
        let outer = self.outermost();
        let siblings = outer.container()?.children();
        let pos = siblings.iter().position(|f| *f == outer)?;
        siblings.into_iter().nth(pos + 1)
    }

    pub fn prev_sibling(&self) -> Option<Form<'a>> {
        let outer = self.outermost();
        let siblings = outer.container()?.children();
        let pos = siblings.iter().position(|f| *f == outer)?;
        pos.checked_sub(1).and_then(|p| siblings.into_iter().nth(p))
    }

    /// Enclosing collection, if any.
    pub fn parent_list(&self) -> Option<Form<'a>> {
        self.container().filter(|c| c.is_list())
    }
}
