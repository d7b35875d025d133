//! Command line editing, intent execution, and the save/quit flow.
//!
//! Overlay transitions live here: opening and editing the `:` buffer,
//! executing parsed intents, the Ctrl-S save confirmation, and both
//! confirmation overlays. Save failures come back as values from
//! `core-files` and are surfaced as transient messages; the buffer and
//! dirty state stay untouched on any failure path.

use super::command_parser::{CommandIntent, parse_command};
use super::{DispatchResult, SessionContext};
use crate::Action;
use core_files::SaveOutcome;
use core_state::{CommandLineState, EditorState, Overlay};
use tracing::{debug, info};

const SAVE_CONFIRM_PROMPT: &str = "Save file? (y/n)";
const QUIT_CONFIRM_PROMPT: &str = "Unsaved changes. Save and quit? (y/n/c)";

pub(crate) fn handle_command_action(
    action: Action,
    state: &mut EditorState,
    ctx: &SessionContext<'_>,
) -> DispatchResult {
    match action {
        Action::CommandStart => {
            state.overlay = Overlay::Command(CommandLineState::begin());
            DispatchResult::dirty()
        }
        Action::CommandChar(c) => {
            if let Overlay::Command(cmd) = &mut state.overlay {
                cmd.push_char(c);
            }
            DispatchResult::dirty()
        }
        Action::CommandBackspace => {
            if let Overlay::Command(cmd) = &mut state.overlay
                && !cmd.backspace()
            {
                // The ':' sentinel itself was erased; cancel.
                state.overlay = Overlay::None;
            }
            DispatchResult::dirty()
        }
        Action::CommandCancel => {
            state.overlay = Overlay::None;
            DispatchResult::dirty()
        }
        Action::CommandExecute => {
            let raw = match &state.overlay {
                Overlay::Command(cmd) => cmd.buffer().to_string(),
                _ => return DispatchResult::clean(),
            };
            state.overlay = Overlay::None;
            execute_intent(parse_command(&raw), state, ctx)
        }
        _ => DispatchResult::clean(),
    }
}

fn execute_intent(
    intent: CommandIntent,
    state: &mut EditorState,
    ctx: &SessionContext<'_>,
) -> DispatchResult {
    debug!(target: "actions.dispatch", ?intent, "execute_command");
    match intent {
        CommandIntent::Write => {
            execute_save(state, ctx);
            DispatchResult::dirty()
        }
        CommandIntent::Quit => handle_quit_request(state),
        CommandIntent::WriteQuit => {
            if execute_save(state, ctx) {
                DispatchResult::quit()
            } else {
                DispatchResult::dirty()
            }
        }
        CommandIntent::ForceQuit => DispatchResult::quit(),
        CommandIntent::Unknown(raw) => {
            state.set_ephemeral(format!("Unknown command: {raw}"), ctx.message_ttl);
            DispatchResult::dirty()
        }
    }
}

/// Ctrl-S: open the save confirmation overlay. Refused outright on a
/// read-only buffer, with the classifier's reason.
pub(crate) fn handle_save_request(
    state: &mut EditorState,
    ctx: &SessionContext<'_>,
) -> DispatchResult {
    if state.read_only.read_only {
        state.set_ephemeral(state.read_only.reason.message(), ctx.message_ttl);
        return DispatchResult::dirty();
    }
    state.overlay = Overlay::SaveConfirm {
        message: SAVE_CONFIRM_PROMPT.to_string(),
    };
    DispatchResult::dirty()
}

/// Esc in normal mode (and `:q`): quit immediately when clean, otherwise
/// ask first.
pub(crate) fn handle_quit_request(state: &mut EditorState) -> DispatchResult {
    if state.dirty {
        state.overlay = Overlay::QuitConfirm {
            message: QUIT_CONFIRM_PROMPT.to_string(),
        };
        DispatchResult::dirty()
    } else {
        DispatchResult::quit()
    }
}

pub(crate) fn handle_confirm(
    action: Action,
    state: &mut EditorState,
    ctx: &SessionContext<'_>,
) -> DispatchResult {
    match (&state.overlay, action) {
        (Overlay::SaveConfirm { .. }, Action::ConfirmYes) => {
            state.overlay = Overlay::None;
            execute_save(state, ctx);
            DispatchResult::dirty()
        }
        (Overlay::SaveConfirm { .. }, Action::ConfirmNo | Action::ConfirmCancel) => {
            state.overlay = Overlay::None;
            DispatchResult::dirty()
        }
        (Overlay::QuitConfirm { .. }, Action::ConfirmYes) => {
            // Save-then-terminate; a failed save keeps the session alive.
            state.overlay = Overlay::None;
            if execute_save(state, ctx) {
                DispatchResult::quit()
            } else {
                DispatchResult::dirty()
            }
        }
        (Overlay::QuitConfirm { .. }, Action::ConfirmNo) => {
            // Explicit discard: terminate without writing.
            state.overlay = Overlay::None;
            DispatchResult::quit()
        }
        (Overlay::QuitConfirm { .. }, Action::ConfirmCancel) => {
            state.overlay = Overlay::None;
            DispatchResult::dirty()
        }
        _ => DispatchResult::clean(),
    }
}

/// Run the backup-then-write pipeline for the session file. On success,
/// clears dirty markers and the whole undo history; on failure leaves all
/// state untouched. Returns whether the save succeeded.
fn execute_save(state: &mut EditorState, ctx: &SessionContext<'_>) -> bool {
    let Some(path) = state.file_name.clone() else {
        state.set_ephemeral("No file name", ctx.message_ttl);
        return false;
    };
    let content = state.buffer.serialize();
    match core_files::save(&path, &content, ctx.backup_suffix, ctx.io) {
        SaveOutcome::Saved { backed_up } => {
            state.mark_saved();
            info!(target: "io", path = %path.display(), backed_up, bytes = content.len(), "file_saved");
            state.set_ephemeral(format!("\"{}\" written", path.display()), ctx.message_ttl);
            true
        }
        SaveOutcome::Failed(err) => {
            state.set_ephemeral(format!("Save failed: {err}"), ctx.message_ttl);
            false
        }
    }
}
