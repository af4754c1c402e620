//! Forms: atoms, delimited collections and reader-prefixed forms.

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse one element of a form sequence: trivia, a stray closer, or a form.
pub(super) fn element(p: &mut Parser<'_, '_>) {
    let kind = p.current();
    if kind.is_trivia() {
        p.bump();
    } else if kind.is_closer() {
        stray_closer(p);
    } else {
        form(p);
    }
}

fn form(p: &mut Parser<'_, '_>) {
    match p.current() {
        SyntaxKind::PREFIX => prefixed(p),
        kind if kind.is_opener() => collection(p),
        _ => atom(p),
    }
}

fn atom(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    m.complete(p, SyntaxKind::ATOM);
}

/// `'x`, `#(...)`, `^:meta form`. A prefix with nothing after it still
/// becomes a node so navigation can step over it.
fn prefixed(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    while p.at(SyntaxKind::WHITESPACE) || p.at(SyntaxKind::NEWLINE) {
        p.bump();
    }
    if !p.at_end() && !p.current().is_closer() && !p.at(SyntaxKind::COMMENT) {
        form(p);
    }
    m.complete(p, SyntaxKind::PREFIXED);
}

fn collection(p: &mut Parser<'_, '_>) {
    let opener = p.current();
    let (Some(kind), Some(closer)) = (opener.list_kind(), opener.closer()) else {
        atom(p);
        return;
    };

    let m = p.start();
    p.bump();
    loop {
        if p.at_end() || p.eat(closer) {
            break;
        }
        element(p);
    }
    m.complete(p, kind);
}

fn stray_closer(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump();
    m.complete(p, SyntaxKind::ERROR);
}
