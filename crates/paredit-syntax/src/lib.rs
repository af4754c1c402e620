//! # paredit-syntax
//!
//! A lossless s-expression syntax tree using [Rowan] + [Logos], with the
//! structural motions and edits of paredit built on top of it.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//!
//! Rowan Tree + source → Ast (character offsets) → navigator / editor
//! ```
//!
//! The tree keeps every byte of the input, including whitespace and
//! comments, and never fails to build: unclosed collections run to the end of
//! the input and stray closing delimiters become `ERROR` nodes. Structural
//! commands therefore still work on a half-typed buffer.
//!
//! Rowan ranges are UTF-8 byte ranges, while editors count characters.
//! [`Ast`] owns the mapping, so everything in [`navigator`] and [`editor`]
//! speaks character offsets.
//!
//! ## Module Structure
//!
//! ```text
//! paredit-syntax/
//! ├── lib.rs           # This file - public API and tree snapshots
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! ├── parser/          # Marker/event parser and grammar rules
//! ├── ast.rs           # Character-addressed Form views
//! ├── navigator.rs     # forward-sexp, backward-up-sexp, expansion, ...
//! └── editor/          # slurp, barf, splice, split, kill, wrap, indent, ...
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use paredit_syntax::editor::{slurp_sexp, EditOptions, RawChange};
//! use paredit_syntax::parse;
//!
//! let ast = parse("(a b) c");
//! let result = slurp_sexp(&ast, 4, &EditOptions::default()).unwrap();
//! assert_eq!(
//!     result.changes,
//!     vec![RawChange::delete(4, 1), RawChange::insert(6, ")")]
//! );
//! ```

pub mod ast;
pub mod editor;
pub mod lexer;
pub mod navigator;
pub mod parser;
pub mod syntax_kind;

pub use ast::{Ast, Form, parse};
pub use navigator::NavigatorResult;
pub use parser::parse as parse_tree;
pub use syntax_kind::{SexpLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
