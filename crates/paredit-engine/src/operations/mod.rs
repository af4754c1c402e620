/*!
 * # Operations
 *
 * The command surface, as a closed table of operations.
 *
 * Each [`Motion`] backs three commands (navigate, yank and cut) through the
 * decorators in [`decorators`]; each [`StructuralEdit`] backs one edit
 * command. Expand, contract and indent-range complete the set. Every
 * operation has a stable identifier such as `paredit.forwardSexp` or
 * `paredit.yankForwardSexp`, and [`Operation::all`] lists them in the order
 * they are registered with a host.
 *
 * ```rust
 * use paredit_engine::operations::{Motion, Operation};
 *
 * let op: Operation = "paredit.cutBackwardSexp".parse().unwrap();
 * assert_eq!(op, Operation::Cut(Motion::BackwardSexp));
 * assert_eq!(op.to_string(), "paredit.cutBackwardSexp");
 * ```
 */

pub mod decorators;
pub mod motion;
pub mod structural;

use std::fmt;
use std::str::FromStr;

pub use decorators::Context;
pub use motion::{Motion, Navigator};
pub use structural::{StructuralEdit, StructuralEditor};

use crate::editing::SelectionSpan;
use crate::error::UnknownOperation;

const PREFIX: &str = "paredit.";

/// What running an operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The session is disabled or the document's language is unsupported.
    Skipped,
    /// Nothing applied: no edit at the cursor or no history to contract to.
    Unchanged,
    Selected(SelectionSpan),
    Copied,
    /// Changes were sent to the host; `applied` is false when it declined.
    Edited { applied: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Navigate(Motion),
    Yank(Motion),
    Cut(Motion),
    ExpandSelection,
    ContractSelection,
    Edit(StructuralEdit),
    IndentRange,
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl Operation {
    /// Every operation, in registration order.
    pub fn all() -> Vec<Operation> {
        let mut ops = Vec::with_capacity(37);
        for motion in Motion::ALL {
            ops.extend([
                Operation::Navigate(motion),
                Operation::Yank(motion),
                Operation::Cut(motion),
            ]);
        }
        ops.extend([Operation::ExpandSelection, Operation::ContractSelection]);
        for edit in StructuralEdit::ALL {
            if edit == StructuralEdit::Transpose {
                ops.push(Operation::IndentRange);
            }
            ops.push(Operation::Edit(edit));
        }
        ops
    }

    /// Command identifier, e.g. `paredit.slurpSexpForward`.
    pub fn id(&self) -> String {
        let name = match self {
            Operation::Navigate(motion) => motion.name().to_string(),
            Operation::Yank(motion) => format!("yank{}", capitalized(motion.name())),
            Operation::Cut(motion) => format!("cut{}", capitalized(motion.name())),
            Operation::ExpandSelection => "sexpRangeExpansion".to_string(),
            Operation::ContractSelection => "sexpRangeContraction".to_string(),
            Operation::Edit(edit) => edit.name().to_string(),
            Operation::IndentRange => "indentRange".to_string(),
        };
        format!("{PREFIX}{name}")
    }

    /// Whether running the operation can change buffer text.
    pub fn modifies_text(&self) -> bool {
        matches!(
            self,
            Operation::Cut(_) | Operation::Edit(_) | Operation::IndentRange
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::all()
            .into_iter()
            .find(|op| op.id() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}
