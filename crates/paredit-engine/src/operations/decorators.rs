//! Wrappers that turn a motion or a structural edit into a command.
//!
//! A single [`Navigator`] backs three commands: [`navigate`] selects its
//! target, [`yank`] copies the span from the cursor to it and [`cut`] copies
//! then deletes that span. Every [`StructuralEditor`] runs through [`edit`],
//! which applies its changes, places the cursor, re-indents what it touched
//! and closes the undo group.

use log::debug;
use paredit_syntax::editor::{EditOptions, indent_range};
use paredit_syntax::{Ast, NavigatorResult, navigator, parse};

use super::Outcome;
use super::motion::Navigator;
use super::structural::StructuralEditor;
use crate::clipboard::{ClipboardSink, copy_span, cut_span};
use crate::editing::{
    SelectionSpan, TextEditor, apply_all, apply_selection, close_on_failure, current_selection,
    touched_span, translate, undo_stop,
};
use crate::error::{EditError, PareditError};
use crate::expansion::ExpansionStack;

/// The document and selection a command runs against, captured when the
/// command starts.
pub struct Context<'e, E: TextEditor + ?Sized> {
    pub editor: &'e mut E,
    pub ast: Ast,
    pub selection: SelectionSpan,
    pub indent_width: usize,
}

impl<'e, E: TextEditor + ?Sized> Context<'e, E> {
    pub fn new(editor: &'e mut E, indent_width: usize) -> Self {
        let ast = parse(&editor.text());
        let selection = current_selection(editor);
        Self {
            editor,
            ast,
            selection,
            indent_width,
        }
    }

    /// The span from the cursor to the navigator's target.
    fn target_pair<N: Navigator + ?Sized>(&self, nav: &N) -> (usize, usize) {
        let cursor = self.selection.cursor;
        nav.navigate(&self.ast, cursor).into_pair(cursor)
    }
}

pub fn navigate<E, N>(nav: &N, ctx: &mut Context<'_, E>) -> SelectionSpan
where
    E: TextEditor + ?Sized,
    N: Navigator + ?Sized,
{
    let result = nav.navigate(&ctx.ast, ctx.selection.cursor);
    apply_selection(ctx.editor, result)
}

pub fn yank<E, N, C>(
    nav: &N,
    ctx: &mut Context<'_, E>,
    clipboard: &mut C,
) -> Result<(), PareditError>
where
    E: TextEditor + ?Sized,
    N: Navigator + ?Sized,
    C: ClipboardSink + ?Sized,
{
    let pair = ctx.target_pair(nav);
    Ok(copy_span(ctx.editor, clipboard, pair)?)
}

/// Cut the span and close the undo group so the cut undoes on its own.
pub fn cut<E, N, C>(
    nav: &N,
    ctx: &mut Context<'_, E>,
    clipboard: &mut C,
) -> Result<bool, PareditError>
where
    E: TextEditor + ?Sized,
    N: Navigator + ?Sized,
    C: ClipboardSink + ?Sized,
{
    let pair = ctx.target_pair(nav);
    let cut = cut_span(ctx.editor, clipboard, pair);
    if !close_on_failure(ctx.editor, cut)? {
        return Ok(false);
    }
    Ok(undo_stop(ctx.editor)?)
}

pub fn expand_selection<E>(ctx: &mut Context<'_, E>, stack: &mut ExpansionStack) -> SelectionSpan
where
    E: TextEditor + ?Sized,
{
    let SelectionSpan { start, end, .. } = ctx.selection;
    let result = navigator::sexp_range_expansion(&ctx.ast, start, end);
    stack.expand(ctx.editor, result)
}

pub fn contract_selection<E>(
    ctx: &mut Context<'_, E>,
    stack: &mut ExpansionStack,
) -> Option<SelectionSpan>
where
    E: TextEditor + ?Sized,
{
    stack.contract(ctx.editor)
}

/// Re-indent the lines of `start..end` in the editor's current text.
fn reindent<E>(editor: &mut E, start: usize, end: usize, width: usize) -> Result<bool, EditError>
where
    E: TextEditor + ?Sized,
{
    let ast = parse(&editor.text());
    let opts = EditOptions {
        end_idx: Some(end),
        indent_width: width,
        ..EditOptions::default()
    };
    match indent_range(&ast, start, &opts) {
        Some(result) => apply_all(editor, &translate(&result.changes)),
        None => Ok(true),
    }
}

/// Re-indent the selected lines as one undo step.
pub fn indent<E>(ctx: &mut Context<'_, E>) -> Result<bool, EditError>
where
    E: TextEditor + ?Sized,
{
    let SelectionSpan { start, end, .. } = ctx.selection;
    let reindented = reindent(ctx.editor, start, end, ctx.indent_width);
    if !close_on_failure(ctx.editor, reindented)? {
        return Ok(false);
    }
    undo_stop(ctx.editor)
}

/// Run a structural edit at the selection.
///
/// No applicable edit leaves buffer and selection alone. An edit without
/// changes only moves the cursor. Otherwise the changes are applied, the
/// cursor placed, the touched lines re-indented (unless the edit opts out)
/// and the whole thing closed as one undo step.
pub fn edit<E, S>(ed: &S, ctx: &mut Context<'_, E>) -> Result<Outcome, EditError>
where
    E: TextEditor + ?Sized,
    S: StructuralEditor + ?Sized,
{
    let SelectionSpan { start, end, .. } = ctx.selection;
    let opts = EditOptions {
        end_idx: (start != end).then_some(end),
        indent_width: ctx.indent_width,
        ..EditOptions::default()
    };

    let Some(result) = ed.edit_at(&ctx.ast, start, &opts) else {
        debug!("no applicable edit at {start}");
        return Ok(Outcome::Unchanged);
    };

    let cursor = NavigatorResult::Collapsed(result.new_index);
    if result.changes.is_empty() {
        return Ok(Outcome::Selected(apply_selection(ctx.editor, cursor)));
    }

    let commands = translate(&result.changes);
    debug!("applying {} command(s)", commands.len());
    let applied = apply_all(ctx.editor, &commands);
    if !close_on_failure(ctx.editor, applied)? {
        return Ok(Outcome::Edited { applied: false });
    }
    apply_selection(ctx.editor, cursor);

    if !ed.skips_indent()
        && let Some((from, to)) = touched_span(&commands)
    {
        let reindented = reindent(ctx.editor, from, to, ctx.indent_width);
        if !close_on_failure(ctx.editor, reindented)? {
            return Ok(Outcome::Edited { applied: false });
        }
    }

    let applied = undo_stop(ctx.editor)?;
    Ok(Outcome::Edited { applied })
}
