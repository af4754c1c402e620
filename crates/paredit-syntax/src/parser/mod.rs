//! # Parser - Event-Based Tree Construction
//!
//! Tokens are turned into a flat list of [`Event`]s by the grammar rules in
//! [`grammar`], and the [`Sink`] replays those events into a Rowan tree.
//! Building the tree from events keeps the grammar free of Rowan details and
//! keeps deep nesting (which s-expressions have plenty of) off the call stack
//! of the tree builder.
//!
//! ## Markers
//!
//! `parser.start()` reserves a slot and returns a [`Marker`]. The marker must
//! be completed with a node kind or abandoned; dropping it otherwise panics,
//! which catches grammar bugs instead of producing a corrupt tree.
//!
//! ```ignore
//! let m = p.start();
//! p.bump(); // SYMBOL
//! m.complete(p, SyntaxKind::ATOM);
//! ```
//!
//! ## Public API
//!
//! ```
//! use paredit_syntax::{parse_tree, SyntaxKind};
//!
//! let tree = parse_tree("(a b)");
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//! ```

pub mod event;
pub mod sink;

mod grammar;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
        }
    }

    /// Parse the tokens and return a syntax tree.
    pub fn parse(mut self) -> SyntaxNode {
        grammar::root(&mut self);
        Sink::new(self.tokens, self.events).finish()
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }
}

/// A marker for a node being constructed.
///
/// Completing replaces the reserved `Placeholder` with a `Start` and pushes a
/// `Finish`. Abandoning pops the placeholder when nothing followed it and
/// otherwise leaves it inert.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    pos: usize,
    completed: bool,
}

impl Marker {
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::start(kind);
        p.events.push(Event::Finish);
    }

    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// Parse s-expression source into a syntax tree.
pub fn parse(source: &str) -> SyntaxNode {
    let tokens = lex(source);
    Parser::new(&tokens).parse()
}
