//! Text mutation and clipboard handling.
//!
//! Thin delegation into the `core-state` mutation engine, which owns the
//! read-only gate, snapshotting, and dirty tracking. A mutation refused by
//! the gate leaves the state untouched and reports clean (no render needed);
//! the refusal message was already surfaced when insert entry was denied.

use super::DispatchResult;
use crate::EditKind;
use core_state::EditorState;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState) -> DispatchResult {
    let depth_before = state.undo_depth();
    match kind {
        EditKind::InsertChar(c) => {
            let mut buf = [0u8; 4];
            state.insert_char(c.encode_utf8(&mut buf));
        }
        EditKind::Backspace => state.delete_char_before(),
        EditKind::InsertNewline => state.insert_newline(),
        EditKind::DeleteUnder => state.delete_char_under(),
        EditKind::OpenBelow => state.open_line_below(),
        EditKind::OpenAbove => state.open_line_above(),
    }
    if state.undo_depth() != depth_before {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_yank_line(state: &mut EditorState) -> DispatchResult {
    state.yank_line();
    DispatchResult::clean()
}

pub(crate) fn handle_delete_line(state: &mut EditorState) -> DispatchResult {
    let depth_before = state.undo_depth();
    state.delete_line();
    if state.undo_depth() != depth_before {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

pub(crate) fn handle_paste(state: &mut EditorState, before: bool) -> DispatchResult {
    let depth_before = state.undo_depth();
    if before {
        state.paste_before();
    } else {
        state.paste_after();
    }
    if state.undo_depth() != depth_before {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::Mode;
    use core_text::{Buffer, Position};

    fn state(text: &str) -> EditorState {
        EditorState::new(Buffer::from_text(text))
    }

    #[test]
    fn insert_char_encodes_multibyte() {
        let mut st = state("");
        st.mode = Mode::Insert;
        handle_edit(EditKind::InsertChar('é'), &mut st);
        assert_eq!(st.buffer.line(0), Some("é"));
        assert_eq!(st.cursor, Position::new(0, 2));
    }

    #[test]
    fn refused_edit_reports_clean() {
        let mut st = state("abc");
        // InsertChar in normal mode is refused by the engine.
        let r = handle_edit(EditKind::InsertChar('x'), &mut st);
        assert_eq!(r, DispatchResult::clean());
    }

    #[test]
    fn paste_without_clipboard_is_clean() {
        let mut st = state("abc");
        assert_eq!(handle_paste(&mut st, false), DispatchResult::clean());
    }

    #[test]
    fn delete_line_reports_dirty() {
        let mut st = state("abc\ndef");
        assert_eq!(handle_delete_line(&mut st), DispatchResult::dirty());
        assert_eq!(st.buffer.line(0), Some("def"));
    }
}
