//! Input-to-action translation and action dispatch.
//!
//! The controller is split in two stages. The [`KeyTranslator`] turns raw key
//! events into a flat [`Action`] vocabulary using the current state (base
//! mode, active overlay, pending chord key). The dispatcher then applies one
//! action to the session, mutating `core-state` and running file I/O through
//! `core-files`. Keeping translation separate from application means every
//! state transition is testable without a terminal.

pub mod dispatcher;
pub mod key_translator;

pub use dispatcher::command_parser::{CommandIntent, parse_command};
pub use dispatcher::{DispatchResult, SessionContext, dispatch};
pub use key_translator::KeyTranslator;

/// Cursor movement requests (normal mode and arrow keys in insert mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    FirstLine,
    LastLine,
    WordForward,
    WordBackward,
}

/// Buffer mutation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    InsertChar(char),
    Backspace,
    InsertNewline,
    DeleteUnder,
    OpenBelow,
    OpenAbove,
}

/// Base mode transitions. The insert-entry variants differ only in where
/// they put the cursor before switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// `i`: insert at the cursor.
    EnterInsert,
    /// `a`: insert after the cursor.
    EnterInsertAfter,
    /// `I`: insert at the start of the line.
    EnterInsertLineStart,
    /// `A`: insert at the end of the line.
    EnterInsertLineEnd,
    /// Esc in insert mode; clamps the cursor to the normal-mode ceiling.
    LeaveInsert,
}

/// Flat action vocabulary emitted by the translator and consumed by the
/// dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    ModeChange(ModeChange),
    CommandStart,
    CommandChar(char),
    CommandBackspace,
    CommandCancel,
    CommandExecute,
    Undo,
    Redo,
    YankLine,
    DeleteLine,
    PasteAfter,
    PasteBefore,
    /// Ctrl-S: open the save confirmation overlay.
    SaveRequest,
    /// Esc in normal mode: quit, or open the quit confirmation when dirty.
    QuitRequest,
    /// `y` inside a confirmation overlay.
    ConfirmYes,
    /// `n` inside a confirmation overlay.
    ConfirmNo,
    /// `c`/Esc inside the quit confirmation overlay.
    ConfirmCancel,
}
