//! Line-based text buffer abstraction.
//!
//! The buffer is an ordered sequence of lines (no embedded newlines) plus the
//! grapheme-safe splice primitives the mutation layer builds on. Two invariants
//! are enforced here and relied upon everywhere above:
//! * the buffer always holds at least one line (possibly empty), and
//! * every `Position.byte` handed back by buffer/motion APIs sits on a grapheme
//!   cluster boundary of its line.
//!
//! Higher layers (mode-dependent column ceilings, undo snapshots, read-only
//! gating) live in `core-state`; nothing in this crate knows about modes.

pub mod motion;

/// A text buffer as an ordered sequence of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<String>,
}

/// A position inside a buffer expressed as (line index, byte offset within that line).
/// Byte offsets are kept on grapheme cluster boundaries by the APIs that move them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }
    pub fn origin() -> Self {
        Self { line: 0, byte: 0 }
    }
}

impl Buffer {
    /// Construct a buffer from raw text. Splitting on `\n` always yields at
    /// least one line, so the non-empty invariant holds even for `""`.
    pub fn from_text(content: &str) -> Self {
        let lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        debug_assert!(!lines.is_empty());
        Self { lines }
    }

    /// Total number of lines. Always `>= 1`.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Borrow a line by index.
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Byte length of a line, or 0 for an out-of-range index.
    pub fn line_len(&self, idx: usize) -> usize {
        self.lines.get(idx).map_or(0, String::len)
    }

    /// The line under the cursor. Falls back to the last line for an
    /// out-of-range position rather than panicking.
    pub fn current_line(&self, pos: Position) -> &str {
        let idx = pos.line.min(self.lines.len() - 1);
        &self.lines[idx]
    }

    /// Owned copies of every line, in order. Undo snapshots use this so each
    /// log entry carries independent line storage.
    pub fn snapshot_lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    /// Replace the entire content from a line snapshot. An empty snapshot
    /// restores to a single empty line to preserve the buffer invariant.
    pub fn restore_lines(&mut self, lines: Vec<String>) {
        self.lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
    }

    /// Join all lines with `\n` for persistence.
    pub fn serialize(&self) -> String {
        self.lines.join("\n")
    }

    /// Insert a grapheme cluster string at the position and advance the
    /// position past it. Out-of-range positions are clamped first.
    pub fn insert_grapheme(&mut self, pos: &mut Position, g: &str) {
        self.clamp_position(pos);
        let line = &mut self.lines[pos.line];
        line.insert_str(pos.byte, g);
        pos.byte += g.len();
    }

    /// Split the line at the position into two lines; the position moves to
    /// the start of the new second line.
    pub fn split_line(&mut self, pos: &mut Position) {
        self.clamp_position(pos);
        let tail = self.lines[pos.line].split_off(pos.byte);
        self.lines.insert(pos.line + 1, tail);
        pos.line += 1;
        pos.byte = 0;
    }

    /// Join the position's line onto the end of the previous one; the position
    /// moves to the join point. No-op on the first line.
    pub fn join_with_previous(&mut self, pos: &mut Position) {
        if pos.line == 0 || pos.line >= self.lines.len() {
            return;
        }
        let current = self.lines.remove(pos.line);
        pos.line -= 1;
        pos.byte = self.lines[pos.line].len();
        self.lines[pos.line].push_str(&current);
    }

    /// Remove the grapheme cluster ending at the position (backspace within a
    /// line). Returns the removed cluster; no-op at column 0.
    pub fn delete_grapheme_before(&mut self, pos: &mut Position) -> Option<String> {
        self.clamp_position(pos);
        if pos.byte == 0 {
            return None;
        }
        let line = &mut self.lines[pos.line];
        let start = grapheme::prev_boundary(line, pos.byte);
        let removed: String = line.drain(start..pos.byte).collect();
        pos.byte = start;
        Some(removed)
    }

    /// Remove the grapheme cluster at the position. Returns the removed
    /// cluster; no-op at or past line end.
    pub fn delete_grapheme_at(&mut self, pos: &mut Position) -> Option<String> {
        self.clamp_position(pos);
        let line = &mut self.lines[pos.line];
        if pos.byte >= line.len() {
            return None;
        }
        let end = grapheme::next_boundary(line, pos.byte);
        let removed: String = line.drain(pos.byte..end).collect();
        Some(removed)
    }

    /// Insert a line at the index (clamped to the current line count).
    pub fn insert_line(&mut self, idx: usize, text: String) {
        let idx = idx.min(self.lines.len());
        self.lines.insert(idx, text);
    }

    /// Remove and return the line at the index. If that empties the buffer a
    /// single empty line is reinserted so the invariant survives.
    pub fn remove_line(&mut self, idx: usize) -> Option<String> {
        if idx >= self.lines.len() {
            return None;
        }
        let removed = self.lines.remove(idx);
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        Some(removed)
    }

    fn clamp_position(&self, pos: &mut Position) {
        if pos.line >= self.lines.len() {
            pos.line = self.lines.len() - 1;
        }
        let max = self.lines[pos.line].len();
        if pos.byte > max {
            pos.byte = max;
        }
    }
}

/// Grapheme utilities: boundary scanning and the three-way character
/// classification word motions are built on.
pub mod grapheme {
    use unicode_segmentation::UnicodeSegmentation;

    /// Classification of a grapheme cluster for word-boundary scanning.
    /// A token is a maximal run of clusters sharing one class.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum CharClass {
        Word,
        Whitespace,
        Punctuation,
    }

    impl CharClass {
        /// Classify a cluster by its first scalar: alphanumeric or underscore
        /// is a word character, whitespace is whitespace, everything else is
        /// punctuation.
        pub fn of(cluster: &str) -> Self {
            match cluster.chars().next() {
                Some(c) if c == '_' || c.is_alphanumeric() => Self::Word,
                Some(c) if c.is_whitespace() => Self::Whitespace,
                Some(_) => Self::Punctuation,
                None => Self::Whitespace,
            }
        }
    }

    /// Iterate grapheme clusters in a line.
    pub fn iter(line: &str) -> impl Iterator<Item = &str> {
        line.graphemes(true)
    }

    /// Previous grapheme boundary (returns 0 if already at or below the 1st boundary).
    pub fn prev_boundary(line: &str, byte: usize) -> usize {
        if byte == 0 || byte > line.len() {
            return 0;
        }
        let mut last = 0;
        for (idx, _) in line.grapheme_indices(true) {
            if idx >= byte {
                break;
            }
            last = idx;
        }
        last
    }

    /// Next grapheme boundary (returns `line.len()` if at or beyond end).
    pub fn next_boundary(line: &str, byte: usize) -> usize {
        if byte >= line.len() {
            return line.len();
        }
        for (idx, _) in line.grapheme_indices(true) {
            if idx > byte {
                return idx;
            }
        }
        line.len()
    }

    /// Class of the cluster starting at `byte`; `Whitespace` past line end so
    /// end-of-line behaves like a gap for token scans.
    pub fn class_at(line: &str, byte: usize) -> CharClass {
        if byte >= line.len() {
            return CharClass::Whitespace;
        }
        let end = next_boundary(line, byte);
        CharClass::of(&line[byte..end])
    }
}

#[cfg(test)]
mod tests {
    use super::grapheme::{self, CharClass};
    use super::*;

    #[test]
    fn from_text_always_has_a_line() {
        let b = Buffer::from_text("");
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0), Some(""));
    }

    #[test]
    fn from_text_splits_on_newlines() {
        let b = Buffer::from_text("hello\nworld");
        assert_eq!(b.line_count(), 2);
        assert_eq!(b.line(0), Some("hello"));
        assert_eq!(b.line(1), Some("world"));
    }

    #[test]
    fn serialize_round_trips() {
        let text = "one\ntwo\n\nthree";
        let b = Buffer::from_text(text);
        assert_eq!(b.serialize(), text);
    }

    #[test]
    fn insert_grapheme_advances_by_cluster_len() {
        let mut b = Buffer::from_text("ac");
        let mut pos = Position::new(0, 1);
        b.insert_grapheme(&mut pos, "😀");
        assert_eq!(b.line(0), Some("a😀c"));
        assert_eq!(pos.byte, 1 + "😀".len());
    }

    #[test]
    fn split_line_moves_cursor_to_new_line() {
        let mut b = Buffer::from_text("abcd");
        let mut pos = Position::new(0, 2);
        b.split_line(&mut pos);
        assert_eq!(b.line(0), Some("ab"));
        assert_eq!(b.line(1), Some("cd"));
        assert_eq!(pos, Position::new(1, 0));
    }

    #[test]
    fn join_with_previous_lands_on_join_point() {
        let mut b = Buffer::from_text("ab\ncd");
        let mut pos = Position::new(1, 0);
        b.join_with_previous(&mut pos);
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0), Some("abcd"));
        assert_eq!(pos, Position::new(0, 2));
    }

    #[test]
    fn delete_grapheme_before_handles_clusters() {
        let mut b = Buffer::from_text("ab😀");
        let mut pos = Position::new(0, b.line_len(0));
        assert_eq!(b.delete_grapheme_before(&mut pos).as_deref(), Some("😀"));
        assert_eq!(b.line(0), Some("ab"));
        assert_eq!(pos.byte, 2);
    }

    #[test]
    fn delete_grapheme_at_line_end_is_noop() {
        let mut b = Buffer::from_text("hi");
        let mut pos = Position::new(0, 2);
        assert!(b.delete_grapheme_at(&mut pos).is_none());
        assert_eq!(b.line(0), Some("hi"));
    }

    #[test]
    fn remove_last_line_reinserts_empty() {
        let mut b = Buffer::from_text("only");
        assert_eq!(b.remove_line(0).as_deref(), Some("only"));
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0), Some(""));
    }

    #[test]
    fn restore_lines_guards_empty_snapshot() {
        let mut b = Buffer::from_text("x");
        b.restore_lines(Vec::new());
        assert_eq!(b.line_count(), 1);
        assert_eq!(b.line(0), Some(""));
    }

    #[test]
    fn char_class_three_way() {
        assert_eq!(CharClass::of("a"), CharClass::Word);
        assert_eq!(CharClass::of("_"), CharClass::Word);
        assert_eq!(CharClass::of("7"), CharClass::Word);
        assert_eq!(CharClass::of(" "), CharClass::Whitespace);
        assert_eq!(CharClass::of("\t"), CharClass::Whitespace);
        assert_eq!(CharClass::of(","), CharClass::Punctuation);
        assert_eq!(CharClass::of("!"), CharClass::Punctuation);
    }

    #[test]
    fn boundaries_align_on_clusters() {
        let s = "a😀b";
        let after_a = grapheme::next_boundary(s, 0);
        let after_emoji = grapheme::next_boundary(s, after_a);
        assert_eq!(grapheme::prev_boundary(s, after_emoji), after_a);
        assert_eq!(grapheme::prev_boundary(s, after_a), 0);
    }
}
