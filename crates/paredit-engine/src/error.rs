/// A host editor refused or could not perform a transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Edit rejected by host: {reason}")]
    Rejected { reason: String },
    #[error("Edit range {start}..{end} is outside the document (length {len})")]
    OutOfBounds { start: usize, end: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("Failed to write clipboard: {0}")]
    Write(String),
}

/// A command identifier that names no operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown operation: {0}")]
pub struct UnknownOperation(pub String);

/// Any failure surfaced by running a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PareditError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_range() {
        let err = EditError::OutOfBounds {
            start: 3,
            end: 9,
            len: 5,
        };
        assert_eq!(
            err.to_string(),
            "Edit range 3..9 is outside the document (length 5)"
        );
    }

    #[test]
    fn wrapped_errors_are_transparent() {
        let err: PareditError = ClipboardError::Write("busy".into()).into();
        assert_eq!(err.to_string(), "Failed to write clipboard: busy");
    }
}
