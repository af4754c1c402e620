use anyhow::{Context, Result};
use log::info;
use paredit_engine::editing::{RopeEditor, SelectionSpan, TextEditor};
use paredit_engine::{MemoryClipboard, Operation, Session};

/// Commands to run over a document without a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    pub language: String,
    /// Initial selection as `(anchor, cursor)`.
    pub selection: (usize, usize),
    pub commands: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResult {
    pub text: String,
    pub selection: SelectionSpan,
    pub clipboard: Option<String>,
}

/// Run every command in order, each as its own undo step.
pub fn run_batch(
    source: &str,
    request: &BatchRequest,
    session: &mut Session,
) -> Result<BatchResult> {
    let mut editor = RopeEditor::new(request.language.as_str(), source);
    let (anchor, cursor) = request.selection;
    editor.set_selection(SelectionSpan::from_pair(anchor, cursor));
    let mut clipboard = MemoryClipboard::new();

    for op in &request.commands {
        let outcome = session
            .run(*op, &mut editor, &mut clipboard)
            .with_context(|| format!("{op} failed"))?;
        info!("{op}: {outcome:?}");
    }

    Ok(BatchResult {
        text: editor.text(),
        selection: editor.selection(),
        clipboard: clipboard.contents().map(String::from),
    })
}
