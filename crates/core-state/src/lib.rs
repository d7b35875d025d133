//! Editor session state: buffer, cursor, mode, overlay, clipboard, dirty
//! tracking, and the mutation engine that feeds the undo log.
//!
//! Every mutation here is a synchronous state transition: it checks the
//! read-only gate first (read-only buffers make mutations inert no-ops, not
//! errors), captures a before snapshot, applies the change through the
//! grapheme-safe `core-text` primitives, and records exactly one
//! [`undo::Operation`]. Mode routing (which key triggers which mutation)
//! lives in `core-actions`; nothing in this crate reads input.

use std::collections::HashSet;
use std::path::PathBuf;

use core_files::ReadOnlyStatus;
use core_text::{Buffer, Position, motion};
use tracing::trace;

pub mod undo;
pub mod view;

pub use undo::{OpKind, Operation, OperationLog, UNDO_CAPACITY_DEFAULT};
pub use view::{RenderView, render_view};

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal command/navigation mode.
    Normal,
    /// Insert text mode.
    Insert,
}

/// Transient sub-state intercepting input ahead of the base mode.
///
/// A single sum type rather than parallel flags, so the routing precedence
/// (quit prompt over save prompt over command line) is structural.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Command(CommandLineState),
    SaveConfirm { message: String },
    QuitConfirm { message: String },
}

impl Overlay {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Command-line buffer accumulated while the `:` overlay is active.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandLineState {
    buf: String,
}

impl CommandLineState {
    /// Begin a new command; the buffer always carries the leading ':'.
    pub fn begin() -> Self {
        Self {
            buf: String::from(":"),
        }
    }
    pub fn buffer(&self) -> &str {
        &self.buf
    }
    pub fn push_char(&mut self, ch: char) {
        self.buf.push(ch);
    }
    /// Backspace inside the command line. Returns false once the ':' sentinel
    /// itself is erased, which cancels the overlay.
    pub fn backspace(&mut self) -> bool {
        self.buf.pop();
        !self.buf.is_empty()
    }
}

/// Typed clipboard payload. The only kind is linewise; the tag exists so
/// paste can refuse mismatched payloads if other kinds ever appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardPayload {
    Lines(Vec<String>),
}

/// Single-slot session clipboard; each yank/cut overwrites the slot.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Clipboard {
    slot: Option<ClipboardPayload>,
}

impl Clipboard {
    pub fn set_lines(&mut self, lines: Vec<String>) {
        self.slot = Some(ClipboardPayload::Lines(lines));
    }
    pub fn lines(&self) -> Option<&[String]> {
        match &self.slot {
            Some(ClipboardPayload::Lines(lines)) => Some(lines),
            None => None,
        }
    }
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}

/// Transient status message with an expiry instant.
#[derive(Debug, Clone)]
pub struct EphemeralMessage {
    pub text: String,
    pub expires_at: std::time::Instant,
}

/// Top-level editing session state (single buffer, single local actor).
pub struct EditorState {
    pub buffer: Buffer,
    pub cursor: Position,
    pub mode: Mode,
    pub overlay: Overlay,
    pub dirty: bool,
    /// Line-level modified-since-save markers; presentational only.
    pub dirty_lines: HashSet<usize>,
    pub read_only: ReadOnlyStatus,
    pub clipboard: Clipboard,
    undo: OperationLog,
    pub ephemeral_status: Option<EphemeralMessage>,
    pub file_name: Option<PathBuf>,
}

impl EditorState {
    pub fn new(buffer: Buffer) -> Self {
        Self::with_undo_capacity(buffer, UNDO_CAPACITY_DEFAULT)
    }

    pub fn with_undo_capacity(buffer: Buffer, capacity: usize) -> Self {
        Self {
            buffer,
            cursor: Position::origin(),
            mode: Mode::Normal,
            overlay: Overlay::None,
            dirty: false,
            dirty_lines: HashSet::new(),
            read_only: ReadOnlyStatus::writable(),
            clipboard: Clipboard::default(),
            undo: OperationLog::new(capacity),
            ephemeral_status: None,
            file_name: None,
        }
    }

    // ----- status helpers -----

    /// Set an ephemeral status message with a fixed timeout duration.
    pub fn set_ephemeral<S: Into<String>>(&mut self, msg: S, ttl: std::time::Duration) {
        self.ephemeral_status = Some(EphemeralMessage {
            text: msg.into(),
            expires_at: std::time::Instant::now() + ttl,
        });
    }

    /// Tick ephemeral status; returns true if a message expired and was cleared.
    pub fn tick_ephemeral(&mut self) -> bool {
        if let Some(m) = &self.ephemeral_status
            && std::time::Instant::now() >= m.expires_at
        {
            self.ephemeral_status = None;
            return true;
        }
        false
    }

    /// Clear dirty markers and the whole undo history after a successful
    /// save. Undo never crosses a save boundary.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
        self.dirty_lines.clear();
        self.undo.clear();
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }

    // ----- mutation engine -----
    // Every function below is a no-op while the buffer is read-only.

    /// Insert a grapheme cluster at the cursor (Insert mode).
    pub fn insert_char(&mut self, g: &str) {
        if self.read_only.read_only || !matches!(self.mode, Mode::Insert) {
            return;
        }
        let before = self.pre_snapshot();
        let mut pos = self.cursor;
        self.buffer.insert_grapheme(&mut pos, g);
        self.cursor = pos;
        self.touch_line(self.cursor.line);
        self.record(OpKind::InsertChar, before);
        trace!(target: "state.edit", op = "insert_char", grapheme = %g, line = self.cursor.line, byte = self.cursor.byte, "edit");
    }

    /// Backspace (Insert mode): remove the preceding cluster, or join onto
    /// the previous line at column 0. No-op at the start of the buffer.
    pub fn delete_char_before(&mut self) {
        if self.read_only.read_only || !matches!(self.mode, Mode::Insert) {
            return;
        }
        if self.cursor.byte > 0 {
            let before = self.pre_snapshot();
            let mut pos = self.cursor;
            self.buffer.delete_grapheme_before(&mut pos);
            self.cursor = pos;
            self.touch_line(self.cursor.line);
            self.record(OpKind::DeleteChar, before);
        } else if self.cursor.line > 0 {
            let before = self.pre_snapshot();
            let mut pos = self.cursor;
            self.buffer.join_with_previous(&mut pos);
            self.cursor = pos;
            self.touch_line(self.cursor.line);
            self.record(OpKind::JoinLines, before);
        }
    }

    /// Split the current line at the cursor (Insert mode); the cursor moves
    /// to column 0 of the new second line.
    pub fn insert_newline(&mut self) {
        if self.read_only.read_only || !matches!(self.mode, Mode::Insert) {
            return;
        }
        let before = self.pre_snapshot();
        let mut pos = self.cursor;
        self.buffer.split_line(&mut pos);
        self.cursor = pos;
        self.touch_line(self.cursor.line - 1);
        self.touch_line(self.cursor.line);
        self.record(OpKind::SplitLine, before);
    }

    /// Delete the cluster under the cursor (Normal mode `x`); the cursor
    /// re-clamps to the new last valid column (0 on an emptied line).
    pub fn delete_char_under(&mut self) {
        if self.read_only.read_only || !matches!(self.mode, Mode::Normal) {
            return;
        }
        let before = self.pre_snapshot();
        let mut pos = self.cursor;
        if self.buffer.delete_grapheme_at(&mut pos).is_none() {
            return;
        }
        motion::normalize_normal_mode(&self.buffer, &mut pos);
        self.cursor = pos;
        self.touch_line(self.cursor.line);
        self.record(OpKind::DeleteChar, before);
    }

    /// Insert an empty line below the cursor and enter Insert mode (`o`).
    pub fn open_line_below(&mut self) {
        self.open_line_at(self.cursor.line + 1);
    }

    /// Insert an empty line above the cursor and enter Insert mode (`O`).
    pub fn open_line_above(&mut self) {
        self.open_line_at(self.cursor.line);
    }

    fn open_line_at(&mut self, idx: usize) {
        if self.read_only.read_only || !matches!(self.mode, Mode::Normal) {
            return;
        }
        let before = self.pre_snapshot();
        self.buffer.insert_line(idx, String::new());
        self.cursor = Position::new(idx, 0);
        self.mode = Mode::Insert;
        self.touch_line(idx);
        self.record(OpKind::InsertLine, before);
    }

    /// Copy the current line into the clipboard (`yy`); non-mutating.
    pub fn yank_line(&mut self) {
        if self.read_only.read_only {
            return;
        }
        let line = self.buffer.current_line(self.cursor).to_string();
        self.clipboard.set_lines(vec![line]);
        trace!(target: "state.edit", op = "yank_line", line = self.cursor.line, "yank");
    }

    /// Cut the current line (`dd`): clipboard first, then removal. The buffer
    /// invariant reinserts one empty line if the last line was cut; the
    /// cursor clamps to the new last valid line and column.
    pub fn delete_line(&mut self) {
        if self.read_only.read_only || !matches!(self.mode, Mode::Normal) {
            return;
        }
        let before = self.pre_snapshot();
        let Some(removed) = self.buffer.remove_line(self.cursor.line) else {
            return;
        };
        self.clipboard.set_lines(vec![removed]);
        let mut pos = self.cursor;
        if pos.line >= self.buffer.line_count() {
            pos.line = self.buffer.line_count() - 1;
        }
        motion::normalize_normal_mode(&self.buffer, &mut pos);
        self.cursor = pos;
        self.touch_line(self.cursor.line);
        self.record(OpKind::DeleteLine, before);
    }

    /// Paste clipboard lines after the current line (`p`); cursor moves to
    /// the first pasted line, column 0. No-op on an empty clipboard.
    pub fn paste_after(&mut self) {
        self.paste_at(self.cursor.line + 1);
    }

    /// Paste clipboard lines at the current line (`P`).
    pub fn paste_before(&mut self) {
        self.paste_at(self.cursor.line);
    }

    fn paste_at(&mut self, idx: usize) {
        if self.read_only.read_only || !matches!(self.mode, Mode::Normal) {
            return;
        }
        let Some(lines) = self.clipboard.lines().map(<[String]>::to_vec) else {
            return;
        };
        let before = self.pre_snapshot();
        for (offset, line) in lines.iter().enumerate() {
            self.buffer.insert_line(idx + offset, line.clone());
            self.touch_line(idx + offset);
        }
        self.cursor = Position::new(idx, 0);
        self.record(OpKind::InsertLine, before);
    }

    // ----- undo / redo -----

    /// Apply the most recent operation's before snapshot. Returns false on an
    /// empty undo stack.
    pub fn undo(&mut self) -> bool {
        let Some(op) = self.undo.pop_for_undo() else {
            return false;
        };
        let lines = op.lines_before.clone();
        let cursor = op.cursor_before;
        self.buffer.restore_lines(lines);
        self.cursor = cursor;
        self.dirty = true;
        self.touch_line(self.cursor.line);
        true
    }

    /// Re-apply the most recently undone operation's after snapshot.
    pub fn redo(&mut self) -> bool {
        let Some(op) = self.undo.pop_for_redo() else {
            return false;
        };
        let lines = op.lines_after.clone();
        let cursor = op.cursor_after;
        self.buffer.restore_lines(lines);
        self.cursor = cursor;
        self.dirty = true;
        self.touch_line(self.cursor.line);
        true
    }

    // ----- internals -----

    fn pre_snapshot(&self) -> (Vec<String>, Position) {
        (self.buffer.snapshot_lines(), self.cursor)
    }

    fn record(&mut self, kind: OpKind, before: (Vec<String>, Position)) {
        let (lines_before, cursor_before) = before;
        self.undo.push(Operation {
            kind,
            lines_before,
            lines_after: self.buffer.snapshot_lines(),
            cursor_before,
            cursor_after: self.cursor,
        });
        self.dirty = true;
    }

    fn touch_line(&mut self, idx: usize) {
        self.dirty_lines.insert(idx);
    }
}
