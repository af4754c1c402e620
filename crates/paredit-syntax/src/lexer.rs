//! # Lexer - Tokenizing S-expression Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! **Every byte in the input appears in exactly one token.** Nothing is
//! skipped, which is what lets structural edits map back onto the exact
//! source text:
//!
//! ```
//! use paredit_syntax::lexer::lex;
//!
//! let input = "(defn f [x] ; doc\n  (inc x))";
//! let tokens = lex(input);
//!
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are context-free. Delimiters get their own kinds, reader prefixes
//! (`'`, `` ` ``, `~`, `~@`, `@`, `^`, `#`, `#_`, `#'`, `#?`) are a single
//! `PREFIX` kind, and any other run of non-delimiter characters is a `SYMBOL`.
//! Commas are whitespace, as in Clojure.

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// Each variant maps to a corresponding `SyntaxKind` token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    /// Horizontal whitespace; commas count as whitespace
    #[regex(r"[ \t\r,]+")]
    Whitespace,

    /// Line ending (LF or CRLF)
    #[regex(r"\r?\n")]
    Newline,

    /// `;` line comment
    #[regex(r";[^\r\n]*")]
    Comment,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    /// String literal with escapes
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    String,

    /// String literal that runs to end of input
    #[regex(r#""([^"\\]|\\(.|\n))*"#)]
    UnterminatedString,

    /// Character literal
    #[regex(r"\\.[a-zA-Z0-9]*")]
    Char,

    /// Reader prefixes
    #[regex(r"~@|#\?@|#[_'?]?|['`~@^]")]
    Prefix,

    /// Symbols, keywords and numbers
    #[regex(r#"[^\s,()\[\]{}";'`~@^\\#][^\s,()\[\]{}";]*"#)]
    Symbol,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Comment => SyntaxKind::COMMENT,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LBrace => SyntaxKind::LBRACE,
            TokenKind::RBrace => SyntaxKind::RBRACE,
            TokenKind::String => SyntaxKind::STRING,
            TokenKind::UnterminatedString => SyntaxKind::UNTERMINATED_STRING,
            TokenKind::Char => SyntaxKind::CHAR,
            TokenKind::Prefix => SyntaxKind::PREFIX,
            TokenKind::Symbol => SyntaxKind::SYMBOL,
        }
    }
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
}

/// Kind assigned to input Logos could not match.
fn error_kind(text: &str) -> SyntaxKind {
    if text.chars().all(char::is_whitespace) {
        SyntaxKind::WHITESPACE
    } else {
        SyntaxKind::SYMBOL
    }
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            Err(()) => error_kind(text),
        };
        tokens.push((Token { kind, text }, span));
    }

    tokens
}
