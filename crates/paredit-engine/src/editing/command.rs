use std::fmt;

use paredit_syntax::editor::{ChangeArg, ChangeKind, RawChange};

/// A primitive buffer mutation in character offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert { start: usize, text: String },
    Delete { start: usize, length: usize },
}

impl Command {
    pub fn start(&self) -> usize {
        match self {
            Command::Insert { start, .. } | Command::Delete { start, .. } => *start,
        }
    }

    /// Offset just past the text this command touches.
    pub fn end_offset(&self) -> usize {
        match self {
            Command::Insert { start, text } => start + text.chars().count(),
            Command::Delete { start, length } => start + length,
        }
    }

    /// Delete the span between two offsets given in either order.
    pub fn delete_span(a: usize, b: usize) -> Self {
        Command::Delete {
            start: a.min(b),
            length: a.abs_diff(b),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Insert { start, text } => write!(f, "insert {text:?} at {start}"),
            Command::Delete { start, length } => write!(f, "delete {length} at {start}"),
        }
    }
}

/// Build a command from a change tuple.
///
/// # Panics
///
/// When the argument does not match the kind (an insert carrying a length or a
/// delete carrying text). Producers never emit such tuples.
pub fn to_command(kind: ChangeKind, start: usize, arg: ChangeArg) -> Command {
    match (kind, arg) {
        (ChangeKind::Insert, ChangeArg::Text(text)) => Command::Insert { start, text },
        (ChangeKind::Delete, ChangeArg::Length(length)) => Command::Delete { start, length },
        (kind, arg) => panic!("{kind:?} change at {start} carries {arg:?}"),
    }
}

/// Map an editor's change list to commands, keeping order.
pub fn translate(changes: &[RawChange]) -> Vec<Command> {
    changes
        .iter()
        .map(|RawChange(kind, start, arg)| to_command(*kind, *start, arg.clone()))
        .collect()
}

/// Smallest span covering every command, as `(min start, max end)`.
pub fn touched_span(commands: &[Command]) -> Option<(usize, usize)> {
    let start = commands.iter().map(Command::start).min()?;
    let end = commands.iter().map(Command::end_offset).max()?;
    Some((start, end))
}
