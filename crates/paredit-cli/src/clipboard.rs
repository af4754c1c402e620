use log::warn;
use paredit_engine::{ClipboardError, ClipboardSink, MemoryClipboard};

/// A clipboard that can also be pasted from.
pub trait Clipboard: ClipboardSink {
    fn read_text(&mut self) -> Option<String>;
}

/// The system clipboard, with an in-memory copy for when there is none
/// (headless sessions, some terminals over SSH).
pub struct SystemClipboard {
    system: Option<arboard::Clipboard>,
    local: MemoryClipboard,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let system = arboard::Clipboard::new()
            .inspect_err(|e| warn!("system clipboard unavailable, keeping copies local: {e}"))
            .ok();
        Self {
            system,
            local: MemoryClipboard::new(),
        }
    }
}

impl Clipboard for SystemClipboard {
    fn read_text(&mut self) -> Option<String> {
        if let Some(system) = &mut self.system {
            match system.get_text() {
                Ok(text) => return Some(text),
                Err(e) => warn!("could not read system clipboard: {e}"),
            }
        }
        self.local.contents().map(String::from)
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.local.write_text(text)?;
        match &mut self.system {
            Some(system) => system
                .set_text(text.to_string())
                .map_err(|e| ClipboardError::Write(e.to_string())),
            None => Ok(()),
        }
    }
}
