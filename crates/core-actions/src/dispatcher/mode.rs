//! Base mode transitions (Normal <-> Insert).
//!
//! Insert entry is the single choke point for the read-only gate's user
//! feedback: a refused entry surfaces the classifier's reason as a transient
//! message and stays in normal mode. Once in insert mode, mutations on a
//! read-only buffer are silent no-ops by policy.

use super::{DispatchResult, SessionContext};
use crate::ModeChange;
use core_state::{EditorState, Mode};
use core_text::{grapheme, motion};
use tracing::debug;

pub(crate) fn handle_mode_change(
    mc: ModeChange,
    state: &mut EditorState,
    ctx: &SessionContext<'_>,
) -> DispatchResult {
    match mc {
        ModeChange::EnterInsert
        | ModeChange::EnterInsertAfter
        | ModeChange::EnterInsertLineStart
        | ModeChange::EnterInsertLineEnd => {
            if state.read_only.read_only {
                debug!(target: "actions.dispatch", reason = ?state.read_only.reason, "insert_refused_read_only");
                state.set_ephemeral(state.read_only.reason.message(), ctx.message_ttl);
                return DispatchResult::dirty();
            }
            let line = state.buffer.current_line(state.cursor);
            match mc {
                ModeChange::EnterInsertAfter => {
                    if state.cursor.byte < line.len() {
                        state.cursor.byte = grapheme::next_boundary(line, state.cursor.byte);
                    }
                }
                ModeChange::EnterInsertLineStart => state.cursor.byte = 0,
                ModeChange::EnterInsertLineEnd => state.cursor.byte = line.len(),
                _ => {}
            }
            state.mode = Mode::Insert;
            DispatchResult::dirty()
        }
        ModeChange::LeaveInsert => {
            state.mode = Mode::Normal;
            let mut pos = state.cursor;
            motion::normalize_normal_mode(&state.buffer, &mut pos);
            state.cursor = pos;
            DispatchResult::dirty()
        }
    }
}
