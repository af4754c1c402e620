use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use log::{info, warn};
use paredit_engine::editing::{
    Command, RopeEditor, SelectionSpan, TextEditor, apply_grouped, current_selection,
};
use paredit_engine::{Operation, Outcome, Session, StructuralEdit};
use std::path::PathBuf;

use crate::args::parse_command;
use crate::clipboard::Clipboard;
use crate::keymap::{Action, CursorMove, KeyMap, line_col, move_target};

pub struct App<C: Clipboard> {
    editor: RopeEditor,
    session: Session,
    clipboard: C,
    keymap: KeyMap,
    path: Option<PathBuf>,
    saved_version: u64,
    status: Option<String>,
    prompt: Option<String>,
    scroll: usize,
    quit_armed: bool,
    quit: bool,
}

impl<C: Clipboard> App<C> {
    pub fn new(
        editor: RopeEditor,
        session: Session,
        clipboard: C,
        keymap: KeyMap,
        path: Option<PathBuf>,
    ) -> Self {
        let saved_version = editor.version();
        Self {
            editor,
            session,
            clipboard,
            keymap,
            path,
            saved_version,
            status: None,
            prompt: None,
            scroll: 0,
            quit_armed: false,
            quit: false,
        }
    }

    pub fn editor(&self) -> &RopeEditor {
        &self.editor
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn help(&self) -> &'static str {
        self.keymap.help()
    }

    pub fn is_dirty(&self) -> bool {
        self.editor.version() != self.saved_version
    }

    pub fn title(&self) -> String {
        let name = self
            .path
            .as_ref()
            .map_or_else(|| "*scratch*".to_string(), |p| p.display().to_string());
        if self.is_dirty() {
            format!("{name} [+]")
        } else {
            name
        }
    }

    pub fn status_line(&self) -> String {
        let (line, col) = line_col(&self.editor.text(), self.editor.selection().cursor);
        let mode = if !self.session.supports(self.editor.language_id()) {
            "paredit n/a"
        } else if self.session.is_enabled() {
            "paredit"
        } else {
            "paredit off"
        };
        let mut status = format!(
            " {} | {mode} | {}:{}",
            self.editor.language_id(),
            line + 1,
            col + 1
        );
        if let Some(message) = &self.status {
            status.push_str(" | ");
            status.push_str(message);
        }
        status
    }

    /// Keep the cursor's line within a view of `height` lines.
    pub fn scroll_to_cursor(&mut self, height: usize) {
        let (line, _) = line_col(&self.editor.text(), self.editor.selection().cursor);
        if line < self.scroll {
            self.scroll = line;
        } else if height > 0 && line >= self.scroll + height {
            self.scroll = line + 1 - height;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let result = if self.prompt.is_some() {
            self.handle_prompt_key(key)
        } else {
            match self.keymap.resolve(&key) {
                Some(action) => {
                    self.status = None;
                    self.perform(action)
                }
                None => Ok(()),
            }
        };
        if let Err(e) = result {
            warn!("{e:#}");
            self.status = Some(format!("{e:#}"));
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(input) = self.prompt.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            KeyCode::Enter => {
                let id = input.trim().to_string();
                self.prompt = None;
                if !id.is_empty() {
                    let op = parse_command(&id)?;
                    self.run_operation(op)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn perform(&mut self, action: Action) -> Result<()> {
        if action != Action::Quit {
            self.quit_armed = false;
        }
        match action {
            Action::Run(op) => self.run_operation(op)?,
            Action::Insert(c) => self.replace_selection(&c.to_string())?,
            Action::Newline => self.replace_selection("\n")?,
            Action::Move { motion, extend } => self.move_cursor(motion, extend),
            Action::DeleteBackward => self.delete_char(true)?,
            Action::DeleteForward => self.delete_char(false)?,
            Action::Undo => {
                if !self.editor.undo() {
                    self.status = Some("Nothing to undo".to_string());
                }
            }
            Action::Redo => {
                if !self.editor.redo() {
                    self.status = Some("Nothing to redo".to_string());
                }
            }
            Action::Paste => match self.clipboard.read_text() {
                Some(text) => self.replace_selection(&text)?,
                None => self.status = Some("Clipboard is empty".to_string()),
            },
            Action::Save => self.save()?,
            Action::Quit => self.request_quit(),
            Action::ToggleStructural => {
                let on = self.session.toggle();
                self.status = Some(format!(
                    "Structural editing {}",
                    if on { "on" } else { "off" }
                ));
            }
            Action::OpenPrompt => self.prompt = Some(String::new()),
        }
        Ok(())
    }

    fn run_operation(&mut self, op: Operation) -> Result<()> {
        let outcome = self
            .session
            .run(op, &mut self.editor, &mut self.clipboard)?;
        match outcome {
            // plain deletes still work where structural editing is off
            Outcome::Skipped => match op {
                Operation::Edit(StructuralEdit::Delete { backward }) => {
                    self.delete_char(backward)?
                }
                _ => self.status = Some(format!("{op} is not available here")),
            },
            Outcome::Copied => self.status = Some("Copied".to_string()),
            Outcome::Edited { applied: false } => {
                self.status = Some(format!("{op} was not applied"));
            }
            Outcome::Unchanged | Outcome::Selected(_) | Outcome::Edited { applied: true } => {}
        }
        Ok(())
    }

    /// Replace the selection with `text` as one undo step.
    fn replace_selection(&mut self, text: &str) -> Result<()> {
        let selection = current_selection(&self.editor);
        let mut commands = Vec::with_capacity(2);
        if !selection.is_empty() {
            commands.push(Command::delete_span(selection.start, selection.end));
        }
        if !text.is_empty() {
            commands.push(Command::Insert {
                start: selection.start,
                text: text.to_string(),
            });
        }
        if commands.is_empty() {
            return Ok(());
        }
        apply_grouped(&mut self.editor, &commands)?;
        let cursor = selection.start + text.chars().count();
        self.editor.set_selection(SelectionSpan::collapsed(cursor));
        Ok(())
    }

    fn delete_char(&mut self, backward: bool) -> Result<()> {
        let selection = current_selection(&self.editor);
        if !selection.is_empty() {
            return self.replace_selection("");
        }
        let cursor = selection.cursor;
        let span = if backward {
            (cursor > 0).then(|| (cursor - 1, cursor))
        } else {
            (cursor < self.editor.len()).then(|| (cursor, cursor + 1))
        };
        if let Some((start, end)) = span {
            apply_grouped(&mut self.editor, &[Command::delete_span(start, end)])?;
            self.editor.set_selection(SelectionSpan::collapsed(start));
        }
        Ok(())
    }

    fn move_cursor(&mut self, motion: CursorMove, extend: bool) {
        let selection = self.editor.selection();
        let target = move_target(&self.editor.text(), selection, motion);
        let span = if extend {
            SelectionSpan::from_pair(selection.anchor(), target)
        } else {
            SelectionSpan::collapsed(target)
        };
        self.editor.set_selection(span);
    }

    fn save(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            self.status = Some("No file to save to".to_string());
            return Ok(());
        };
        std::fs::write(path, self.editor.text())?;
        info!("saved {}", path.display());
        self.saved_version = self.editor.version();
        self.status = Some(format!("Saved {}", path.display()));
        Ok(())
    }

    fn request_quit(&mut self) {
        if self.is_dirty() && !self.quit_armed {
            self.quit_armed = true;
            self.status = Some("Unsaved changes, press ^Q again to quit".to_string());
        } else {
            self.quit = true;
        }
    }
}
