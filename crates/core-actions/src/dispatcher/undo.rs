//! Undo / redo dispatch. Delegates into the snapshot log owned by
//! `core-state`; an empty stack is a clean no-op, not an error.

use super::DispatchResult;
use core_state::EditorState;

pub(crate) fn handle_undo(state: &mut EditorState) -> DispatchResult {
    if state.undo() {
        tracing::trace!(target: "actions.dispatch", op = "undo", depth = state.undo_depth(), "undo");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_redo(state: &mut EditorState) -> DispatchResult {
    if state.redo() {
        tracing::trace!(target: "actions.dispatch", op = "redo", depth = state.redo_depth(), "redo");
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
