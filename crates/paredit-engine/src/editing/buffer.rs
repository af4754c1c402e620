use std::ops::Range;

use log::{trace, warn};

use super::command::Command;
use super::selection::SelectionSpan;
use crate::error::EditError;

/// Whether the host should close its undo group before and after a
/// transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UndoStops {
    pub before: bool,
    pub after: bool,
}

impl UndoStops {
    /// Join the current undo group.
    pub const NONE: UndoStops = UndoStops {
        before: false,
        after: false,
    };

    /// Close the current undo group after this transaction.
    pub const CHECKPOINT: UndoStops = UndoStops {
        before: false,
        after: true,
    };
}

/// Mutations recorded inside one host transaction. Offsets are characters.
pub trait EditBuilder {
    fn insert(&mut self, at: usize, text: &str);
    fn delete(&mut self, range: Range<usize>);
}

/// The host editor a command runs against.
pub trait TextEditor {
    /// Language of the document, e.g. `clojure`.
    fn language_id(&self) -> &str;

    fn text(&self) -> String;

    /// Document length in characters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text between two character offsets.
    fn slice(&self, start: usize, end: usize) -> String {
        self.text()
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .collect()
    }

    fn selection(&self) -> SelectionSpan;

    fn set_selection(&mut self, span: SelectionSpan);

    /// Scroll so that the range is visible.
    fn reveal_range(&mut self, start: usize, end: usize);

    /// Run one transaction. `Ok(false)` means the host declined it without
    /// an error.
    fn edit(
        &mut self,
        stops: UndoStops,
        build: &mut dyn FnMut(&mut dyn EditBuilder),
    ) -> Result<bool, EditError>;
}

fn record(command: &Command, builder: &mut dyn EditBuilder) {
    match command {
        Command::Insert { start, text } => builder.insert(*start, text),
        Command::Delete { start, length } => builder.delete(*start..*start + *length),
    }
}

/// Apply commands one transaction at a time, in order, all inside the
/// current undo group.
///
/// Stops at the first transaction the host rejects or declines; commands
/// already applied stay applied.
pub fn apply_all<E>(editor: &mut E, commands: &[Command]) -> Result<bool, EditError>
where
    E: TextEditor + ?Sized,
{
    for (i, command) in commands.iter().enumerate() {
        trace!("apply {command}");
        let applied = editor
            .edit(UndoStops::NONE, &mut |builder| record(command, builder))
            .inspect_err(|e| warn!("command {i} of {} rejected: {e}", commands.len()))?;
        if !applied {
            warn!("command {i} of {} declined by host", commands.len());
            return Ok(false);
        }
    }
    Ok(true)
}

/// Close the current undo group with an empty transaction.
pub fn undo_stop<E>(editor: &mut E) -> Result<bool, EditError>
where
    E: TextEditor + ?Sized,
{
    editor.edit(UndoStops::CHECKPOINT, &mut |builder| builder.insert(0, ""))
}

/// Pass `result` through, closing the undo group first when it is anything
/// but a full success. The commands a stopped batch did apply then undo on
/// their own instead of merging with the next command's edits.
pub fn close_on_failure<E, T>(editor: &mut E, result: Result<bool, T>) -> Result<bool, T>
where
    E: TextEditor + ?Sized,
{
    if !matches!(result, Ok(true))
        && let Err(e) = undo_stop(editor)
    {
        warn!("could not close undo group after a failed batch: {e}");
    }
    result
}

/// Apply commands as a single undo step.
pub fn apply_grouped<E>(editor: &mut E, commands: &[Command]) -> Result<bool, EditError>
where
    E: TextEditor + ?Sized,
{
    let applied = apply_all(editor, commands);
    if close_on_failure(editor, applied)? {
        undo_stop(editor)
    } else {
        Ok(false)
    }
}
