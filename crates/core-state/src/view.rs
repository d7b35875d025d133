//! Read-only projection of the session state for rendering.
//!
//! The host never reaches into `EditorState` internals to draw; it asks for
//! a [`RenderView`] and repaints from that. Status text follows a fixed
//! precedence so overlay prompts are never hidden behind stale messages.

use core_text::grapheme;

use crate::{EditorState, Mode, Overlay};

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderView {
    pub lines: Vec<String>,
    pub cursor_line: usize,
    /// Cursor column in grapheme clusters, not bytes.
    pub cursor_col: usize,
    pub mode: Mode,
    pub dirty_lines: Vec<usize>,
    pub is_dirty: bool,
    pub status_text: String,
}

/// Project the current state into a frame description.
///
/// Status precedence: quit prompt, save prompt, command buffer, ephemeral
/// message, then the standard mode/position indicator.
pub fn render_view(state: &EditorState) -> RenderView {
    let mut dirty_lines: Vec<usize> = state.dirty_lines.iter().copied().collect();
    dirty_lines.sort_unstable();
    RenderView {
        lines: state.buffer.snapshot_lines(),
        cursor_line: state.cursor.line,
        cursor_col: cursor_column(state),
        mode: state.mode,
        dirty_lines,
        is_dirty: state.dirty,
        status_text: status_text(state),
    }
}

fn cursor_column(state: &EditorState) -> usize {
    let line = state.buffer.current_line(state.cursor);
    // The cursor always sits on a cluster boundary, so the prefix is valid.
    grapheme::iter(&line[..state.cursor.byte]).count()
}

fn status_text(state: &EditorState) -> String {
    match &state.overlay {
        Overlay::QuitConfirm { message } => return message.clone(),
        Overlay::SaveConfirm { message } => return message.clone(),
        Overlay::Command(cmd) => return cmd.buffer().to_string(),
        Overlay::None => {}
    }
    if let Some(m) = &state.ephemeral_status {
        return m.text.clone();
    }
    let mode = match state.mode {
        Mode::Normal => "NORMAL",
        Mode::Insert => "INSERT",
    };
    let mut text = format!(
        "{mode} | {}:{}",
        state.cursor.line + 1,
        cursor_column(state) + 1
    );
    if state.read_only.read_only {
        text.push_str(" | [RO]");
    } else if state.dirty {
        text.push_str(" | [+]");
    }
    text
}
