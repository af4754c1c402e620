//! # Grammar Rules
//!
//! Each rule takes `&mut Parser`, inspects tokens with `current()`/`at()`,
//! consumes them with `bump()`/`eat()` and brackets structure with
//! `start()` → `complete()`.
//!
//! The grammar is lenient: unclosed collections run to end of input and
//! stray closing delimiters are wrapped in `ERROR` nodes. It never fails and
//! never drops a token.

mod form;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document: top-level forms, trivia and stray closers.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while !p.at_end() {
        form::element(p);
    }

    m.complete(p, SyntaxKind::ROOT);
}
