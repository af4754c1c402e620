//! # Parser Events
//!
//! The grammar never touches Rowan directly. It records a flat list of
//! events which the [`Sink`](super::sink::Sink) replays into a green tree:
//!
//! ```text
//! Start(LIST)
//!   Token(LPAREN)
//!   Start(ATOM) Token(SYMBOL) Finish
//!   Token(RPAREN)
//! Finish
//! ```

use crate::syntax_kind::SyntaxKind;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Open a composite node.
    Start { kind: SyntaxKind },

    /// Attach the next lexer token to the open node.
    Token { kind: SyntaxKind },

    /// Close the innermost open node.
    Finish,

    /// Reserved slot for a marker that has not been completed yet.
    /// Abandoned markers may leave one behind; the sink skips it.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token { kind }
    }
}
