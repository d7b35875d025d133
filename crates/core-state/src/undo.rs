//! Snapshot-based undo/redo operation log.
//!
//! Each buffer-changing mutation records exactly one [`Operation`] holding
//! full before/after line snapshots plus cursor positions, so undo/redo is a
//! direct snapshot swap rather than diff replay. Memory cost scales with
//! document size times history depth; the capacity bound keeps that in check
//! and is injected so tests can run with synthetic limits.
//!
//! Invariants:
//! * pushing a fresh operation always clears the redo stack, and
//! * the undo stack never exceeds its capacity (oldest entries evicted).

use core_text::Position;
use tracing::trace;

/// Default maximum number of operations retained in undo history.
pub const UNDO_CAPACITY_DEFAULT: usize = 100;

/// Mutation classification carried on each log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    InsertChar,
    DeleteChar,
    InsertLine,
    DeleteLine,
    JoinLines,
    SplitLine,
}

/// One undo log entry: a mutation's full before/after state.
/// Snapshots own independent line storage (no sharing with the live buffer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub kind: OpKind,
    pub lines_before: Vec<String>,
    pub lines_after: Vec<String>,
    pub cursor_before: Position,
    pub cursor_after: Position,
}

#[derive(Debug)]
pub struct OperationLog {
    undo_stack: Vec<Operation>,
    redo_stack: Vec<Operation>,
    capacity: usize,
}

impl Default for OperationLog {
    fn default() -> Self {
        Self::new(UNDO_CAPACITY_DEFAULT)
    }
}

impl OperationLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a fresh mutation. Evicts the oldest entry past capacity and
    /// unconditionally clears the redo stack.
    pub fn push(&mut self, op: Operation) {
        trace!(target: "state.undo", kind = ?op.kind, undo_depth = self.undo_stack.len() + 1, "push_operation");
        self.undo_stack.push(op);
        if self.undo_stack.len() > self.capacity {
            let _ = self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Pop the most recent operation for undo and park it on the redo stack.
    pub fn pop_for_undo(&mut self) -> Option<&Operation> {
        let op = self.undo_stack.pop()?;
        trace!(target: "state.undo", kind = ?op.kind, undo_depth = self.undo_stack.len(), "undo_pop");
        self.redo_stack.push(op);
        self.redo_stack.last()
    }

    /// Pop the most recent undone operation for redo and return it to the
    /// undo stack. Does not clear redo and never evicts (the entry came from
    /// this log, so capacity already held).
    pub fn pop_for_redo(&mut self) -> Option<&Operation> {
        let op = self.redo_stack.pop()?;
        trace!(target: "state.undo", kind = ?op.kind, redo_depth = self.redo_stack.len(), "redo_pop");
        self.undo_stack.push(op);
        self.undo_stack.last()
    }

    /// Drop all history. Called on every successful save; undo never crosses
    /// a save boundary.
    pub fn clear(&mut self) {
        if !self.undo_stack.is_empty() || !self.redo_stack.is_empty() {
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "history_cleared");
        }
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    #[cfg(test)]
    pub(crate) fn oldest_kind(&self) -> Option<OpKind> {
        self.undo_stack.first().map(|op| op.kind)
    }
}
