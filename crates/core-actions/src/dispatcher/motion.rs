//! Cursor movement handling. Pure position updates through the `core-text`
//! motion functions; the buffer is never touched.

use super::DispatchResult;
use crate::MotionKind;
use core_state::{EditorState, Mode};
use core_text::motion;

pub(crate) fn handle_motion(kind: MotionKind, state: &mut EditorState) -> DispatchResult {
    let mut pos = state.cursor;
    match kind {
        MotionKind::Left => motion::left(&state.buffer, &mut pos),
        MotionKind::Right => motion::right(&state.buffer, &mut pos),
        MotionKind::Up => motion::up(&state.buffer, &mut pos),
        MotionKind::Down => motion::down(&state.buffer, &mut pos),
        MotionKind::LineStart => motion::line_start(&state.buffer, &mut pos),
        MotionKind::LineEnd => motion::line_end(&state.buffer, &mut pos),
        MotionKind::FirstLine => motion::first_line(&state.buffer, &mut pos),
        MotionKind::LastLine => motion::last_line(&state.buffer, &mut pos),
        MotionKind::WordForward => motion::word_forward(&state.buffer, &mut pos),
        MotionKind::WordBackward => motion::word_backward(&state.buffer, &mut pos),
    }
    if matches!(state.mode, Mode::Normal) {
        motion::normalize_normal_mode(&state.buffer, &mut pos);
    }
    if pos == state.cursor {
        return DispatchResult::clean();
    }
    state.cursor = pos;
    DispatchResult::dirty()
}
