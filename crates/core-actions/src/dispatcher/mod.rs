//! Dispatcher applying one [`Action`] to the session state.
//!
//! Decomposed into focused sub-modules:
//! * `motion`  - cursor movement
//! * `mode`    - base mode transitions (Normal <-> Insert)
//! * `command` - command line editing, intent execution, save/quit flow
//! * `edit`    - text mutation and clipboard operations
//! * `undo`    - undo / redo
//!
//! Exactly one action is applied to completion per call; any file I/O a
//! handler performs (save, backup) finishes before `dispatch` returns, so the
//! host never interleaves input with an in-flight save.

use crate::Action;
use core_files::FileIo;
use core_state::EditorState;
use std::time::Duration;
use tracing::trace;

mod command;
pub mod command_parser;
mod edit;
mod mode;
mod motion;
mod undo;

/// Session-scoped collaborators the dispatcher needs beyond the state
/// itself: the persistence boundary and a couple of config-derived knobs.
pub struct SessionContext<'a> {
    pub io: &'a dyn FileIo,
    pub backup_suffix: &'a str,
    /// Lifetime of transient status messages.
    pub message_ttl: Duration,
}

/// Result of dispatching a single action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// A render is needed.
    pub dirty: bool,
    /// The session should terminate.
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// Apply an action to the session. Returns whether a render is needed and
/// whether the session should exit.
pub fn dispatch(action: Action, state: &mut EditorState, ctx: &SessionContext<'_>) -> DispatchResult {
    trace!(target: "actions.dispatch", ?action, mode = ?state.mode, "dispatch");
    match action {
        Action::Motion(kind) => motion::handle_motion(kind, state),
        Action::ModeChange(mc) => mode::handle_mode_change(mc, state, ctx),
        Action::Edit(kind) => edit::handle_edit(kind, state),
        Action::YankLine => edit::handle_yank_line(state),
        Action::DeleteLine => edit::handle_delete_line(state),
        Action::PasteAfter => edit::handle_paste(state, false),
        Action::PasteBefore => edit::handle_paste(state, true),
        Action::Undo => undo::handle_undo(state),
        Action::Redo => undo::handle_redo(state),
        Action::CommandStart
        | Action::CommandChar(_)
        | Action::CommandBackspace
        | Action::CommandCancel
        | Action::CommandExecute => command::handle_command_action(action, state, ctx),
        Action::SaveRequest => command::handle_save_request(state, ctx),
        Action::QuitRequest => command::handle_quit_request(state),
        Action::ConfirmYes | Action::ConfirmNo | Action::ConfirmCancel => {
            command::handle_confirm(action, state, ctx)
        }
    }
}
