/*!
 * # Editing Core Module
 *
 * Everything between a structural edit's change list and the host editor.
 *
 * ## Architecture Overview
 *
 * ### 1. Commands
 * - A structural edit reports its result as `(kind, start, argument)` tuples
 * - **`command`** turns them into typed `Command`s without reordering them
 * - Offsets in a change list are already adjusted for the changes before
 *   them, so commands must be applied in the order given
 *
 * ### 2. Buffer Editor
 * - **`buffer`** applies commands one host transaction at a time
 * - All transactions of one command share an undo group; an empty
 *   checkpoint transaction closes the group so undo reverts the whole edit
 * - The first rejected transaction stops the batch; nothing is rolled back
 *
 * ### 3. Selection
 * - **`selection`** turns navigator results into the live selection and asks
 *   the host to scroll it into view
 *
 * ### 4. Hosts
 * - `TextEditor` is the seam to the real editor
 * - **`rope_editor`** provides one over an `xi_rope::Rope`, with undo
 *   snapshots per group, for the terminal front end and for tests
 *
 * ## Usage Pattern
 *
 * ```rust
 * use paredit_engine::editing::*;
 * use paredit_syntax::editor::RawChange;
 *
 * let mut editor = RopeEditor::new("clojure", "(a b) c");
 * let commands = translate(&[RawChange::delete(4, 1), RawChange::insert(6, ")")]);
 *
 * apply_grouped(&mut editor, &commands).unwrap();
 * assert_eq!(editor.text(), "(a b c)");
 *
 * // one undo reverts the whole batch
 * editor.undo();
 * assert_eq!(editor.text(), "(a b) c");
 * ```
 */

pub mod buffer;
pub mod command;
pub mod rope_editor;
pub mod selection;

pub use buffer::{
    EditBuilder, TextEditor, UndoStops, apply_all, apply_grouped, close_on_failure, undo_stop,
};
pub use command::{Command, to_command, touched_span, translate};
pub use rope_editor::RopeEditor;
pub use selection::{SelectionSpan, apply_selection, current_selection};
