//! Key bindings.
//!
//! The structural bindings follow Emacs paredit where a terminal can deliver
//! the chord: `Alt` plus a letter moves by form, the same letter shifted
//! yanks and `Ctrl+Alt` cuts. `Alt+←/→` slurp and barf, with `Shift` for the
//! backward variants. Backspace and Delete become structure-aware deletes
//! while structural editing is on.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use paredit_config::Config;
use paredit_engine::editing::SelectionSpan;
use paredit_engine::{Motion, Operation, StructuralEdit};
use paredit_syntax::editor::Delimiters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Run(Operation),
    Insert(char),
    Newline,
    Move { motion: CursorMove, extend: bool },
    DeleteBackward,
    DeleteForward,
    Undo,
    Redo,
    Paste,
    Save,
    Quit,
    ToggleStructural,
    OpenPrompt,
}

#[derive(Debug, Clone, Copy)]
pub struct KeyMap {
    structural: bool,
}

impl KeyMap {
    /// `structural` enables the structural bindings; without them operations
    /// are only reachable from the command prompt.
    pub fn new(structural: bool) -> Self {
        Self { structural }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.uses_default_key_map())
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        if let Some(action) = control_binding(key) {
            return Some(action);
        }
        if self.structural
            && let Some(op) = structural_binding(key)
        {
            return Some(Action::Run(op));
        }
        text_binding(key)
    }

    pub fn help(&self) -> &'static str {
        if self.structural {
            "^Q quit | ^S save | ^Z/^Y undo/redo | ^P toggle | ^X command | M-f/b/d/u/e/a move | M-←/→ slurp/barf | M-w/W expand/contract"
        } else {
            "^Q quit | ^S save | ^Z/^Y undo/redo | ^P toggle | ^X command"
        }
    }
}

fn control_binding(key: &KeyEvent) -> Option<Action> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT)
    {
        return None;
    }
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('s') => Action::Save,
        KeyCode::Char('z') => Action::Undo,
        KeyCode::Char('y') => Action::Redo,
        KeyCode::Char('v') => Action::Paste,
        KeyCode::Char('p') => Action::ToggleStructural,
        KeyCode::Char('x') => Action::OpenPrompt,
        _ => return None,
    };
    Some(action)
}

fn motion_for(c: char) -> Option<Motion> {
    let motion = match c.to_ascii_lowercase() {
        'f' => Motion::ForwardSexp,
        'b' => Motion::BackwardSexp,
        'd' => Motion::ForwardDownSexp,
        'u' => Motion::BackwardUpSexp,
        'e' => Motion::CloseList,
        'a' => Motion::RangeForDefun,
        _ => return None,
    };
    Some(motion)
}

fn structural_binding(key: &KeyEvent) -> Option<Operation> {
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let edit = match key.code {
        KeyCode::Char(c) if alt => return char_binding(c, ctrl),
        KeyCode::Tab => return Some(Operation::IndentRange),
        KeyCode::Backspace if alt => StructuralEdit::Kill { backward: true },
        KeyCode::Backspace => StructuralEdit::Delete { backward: true },
        KeyCode::Delete => StructuralEdit::Delete { backward: false },
        KeyCode::Right if alt => {
            if shift {
                StructuralEdit::Barf { backward: true }
            } else {
                StructuralEdit::Slurp { backward: false }
            }
        }
        KeyCode::Left if alt => {
            if shift {
                StructuralEdit::Slurp { backward: true }
            } else {
                StructuralEdit::Barf { backward: false }
            }
        }
        KeyCode::Up if alt => StructuralEdit::SpliceKill { backward: true },
        KeyCode::Down if alt => StructuralEdit::SpliceKill { backward: false },
        _ => return None,
    };
    Some(Operation::Edit(edit))
}

fn char_binding(c: char, ctrl: bool) -> Option<Operation> {
    if let Some(motion) = motion_for(c) {
        let op = if ctrl {
            Operation::Cut(motion)
        } else if c.is_ascii_uppercase() {
            Operation::Yank(motion)
        } else {
            Operation::Navigate(motion)
        };
        return Some(op);
    }
    let op = match c {
        'w' => Operation::ExpandSelection,
        'W' => Operation::ContractSelection,
        'i' => Operation::IndentRange,
        's' => Operation::Edit(StructuralEdit::Splice),
        'S' => Operation::Edit(StructuralEdit::Split),
        'k' => Operation::Edit(StructuralEdit::Kill { backward: false }),
        't' => Operation::Edit(StructuralEdit::Transpose),
        '(' => Operation::Edit(StructuralEdit::Wrap(Delimiters::Parens)),
        '[' => Operation::Edit(StructuralEdit::Wrap(Delimiters::Square)),
        '{' => Operation::Edit(StructuralEdit::Wrap(Delimiters::Curly)),
        _ => return None,
    };
    Some(op)
}

fn text_binding(key: &KeyEvent) -> Option<Action> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    let extend = key.modifiers.contains(KeyModifiers::SHIFT);
    let motion = match key.code {
        KeyCode::Char(c) => return Some(Action::Insert(c)),
        KeyCode::Enter => return Some(Action::Newline),
        KeyCode::Backspace => return Some(Action::DeleteBackward),
        KeyCode::Delete => return Some(Action::DeleteForward),
        KeyCode::Left => CursorMove::Left,
        KeyCode::Right => CursorMove::Right,
        KeyCode::Up => CursorMove::Up,
        KeyCode::Down => CursorMove::Down,
        KeyCode::Home => CursorMove::LineStart,
        KeyCode::End => CursorMove::LineEnd,
        _ => return None,
    };
    Some(Action::Move { motion, extend })
}

/// Character offset of `(line, col)`, clamped to the line's length.
pub fn offset_of(text: &str, line: usize, col: usize) -> usize {
    let mut offset = 0;
    for (i, content) in text.split('\n').enumerate() {
        let len = content.chars().count();
        if i == line {
            return offset + col.min(len);
        }
        offset += len + 1;
    }
    text.chars().count()
}

/// Zero-based line and column of a character offset.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for c in text.chars().take(offset) {
        if c == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Where `motion` takes the cursor of `selection`.
pub fn move_target(text: &str, selection: SelectionSpan, motion: CursorMove) -> usize {
    let cursor = selection.cursor;
    let (line, col) = line_col(text, cursor);
    match motion {
        CursorMove::Left => cursor.saturating_sub(1),
        CursorMove::Right => (cursor + 1).min(text.chars().count()),
        CursorMove::Up if line == 0 => 0,
        CursorMove::Up => offset_of(text, line - 1, col),
        CursorMove::Down => offset_of(text, line + 1, col),
        CursorMove::LineStart => offset_of(text, line, 0),
        CursorMove::LineEnd => offset_of(text, line, usize::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[rstest]
    #[case(KeyCode::Char('f'), KeyModifiers::ALT, Operation::Navigate(Motion::ForwardSexp))]
    #[case(
        KeyCode::Char('F'),
        KeyModifiers::ALT | KeyModifiers::SHIFT,
        Operation::Yank(Motion::ForwardSexp)
    )]
    #[case(
        KeyCode::Char('b'),
        KeyModifiers::ALT | KeyModifiers::CONTROL,
        Operation::Cut(Motion::BackwardSexp)
    )]
    #[case(
        KeyCode::Right,
        KeyModifiers::ALT,
        Operation::Edit(StructuralEdit::Slurp { backward: false })
    )]
    #[case(
        KeyCode::Left,
        KeyModifiers::ALT | KeyModifiers::SHIFT,
        Operation::Edit(StructuralEdit::Slurp { backward: true })
    )]
    #[case(
        KeyCode::Backspace,
        KeyModifiers::NONE,
        Operation::Edit(StructuralEdit::Delete { backward: true })
    )]
    #[case(
        KeyCode::Char('('),
        KeyModifiers::ALT,
        Operation::Edit(StructuralEdit::Wrap(Delimiters::Parens))
    )]
    #[case(KeyCode::Char('W'), KeyModifiers::ALT, Operation::ContractSelection)]
    fn structural_keys(
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
        #[case] expected: Operation,
    ) {
        let keymap = KeyMap::new(true);
        assert_eq!(
            keymap.resolve(&key(code, modifiers)),
            Some(Action::Run(expected))
        );
    }

    #[test]
    fn without_structural_bindings_keys_edit_text() {
        let keymap = KeyMap::new(false);
        assert_eq!(
            keymap.resolve(&key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Action::DeleteBackward)
        );
        assert_eq!(
            keymap.resolve(&key(KeyCode::Char('f'), KeyModifiers::ALT)),
            None
        );
        assert_eq!(
            keymap.resolve(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(Action::OpenPrompt)
        );
    }

    #[test]
    fn plain_and_shifted_keys() {
        let keymap = KeyMap::new(true);
        assert_eq!(
            keymap.resolve(&key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(Action::Insert('a'))
        );
        assert_eq!(
            keymap.resolve(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(Action::Insert('A'))
        );
        assert_eq!(
            keymap.resolve(&key(KeyCode::Left, KeyModifiers::SHIFT)),
            Some(Action::Move {
                motion: CursorMove::Left,
                extend: true
            })
        );
    }

    #[test]
    fn line_and_column_conversion() {
        let text = "(a\n  bc)\nd";
        assert_eq!(line_col(text, 0), (0, 0));
        assert_eq!(line_col(text, 5), (1, 2));
        assert_eq!(line_col(text, 9), (2, 0));
        assert_eq!(offset_of(text, 1, 2), 5);
        assert_eq!(offset_of(text, 1, 99), 8);
        assert_eq!(offset_of(text, 7, 0), 10);
    }

    #[rstest]
    #[case(CursorMove::Left, 4)]
    #[case(CursorMove::Right, 6)]
    #[case(CursorMove::Up, 2)]
    #[case(CursorMove::Down, 11)]
    #[case(CursorMove::LineStart, 3)]
    #[case(CursorMove::LineEnd, 9)]
    fn cursor_moves(#[case] motion: CursorMove, #[case] expected: usize) {
        let text = "(a\n  bcd)\nd";
        assert_eq!(
            move_target(text, SelectionSpan::collapsed(5), motion),
            expected
        );
    }
}
