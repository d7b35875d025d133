//! Cursor motion helpers.
//!
//! These operate purely on a `Buffer` + `Position` pair and never touch line
//! content. Mode-dependent column ceilings are applied by the dispatcher via
//! `normalize_normal_mode`; the raw motions here allow the insert-mode ceiling
//! (one past the last cluster).

use crate::{Buffer, Position, grapheme};
use grapheme::CharClass;

/// Clamp a position for Normal-mode semantics: the cursor must rest on the
/// start byte of a real grapheme cluster, so an end-of-line position on a
/// non-empty line retreats to the last cluster. Empty lines stay at 0.
pub fn normalize_normal_mode(buf: &Buffer, pos: &mut Position) {
    if pos.line >= buf.line_count() {
        pos.line = buf.line_count() - 1;
    }
    let line = buf.current_line(*pos);
    if pos.byte >= line.len() {
        pos.byte = grapheme::prev_boundary(line, line.len());
    }
}

/// Move left one grapheme boundary. Stops at column 0.
pub fn left(buf: &Buffer, pos: &mut Position) {
    if pos.byte == 0 {
        return;
    }
    let line = buf.current_line(*pos);
    pos.byte = grapheme::prev_boundary(line, pos.byte.min(line.len()));
}

/// Move right one grapheme boundary. Stops at line end (insert-mode ceiling).
pub fn right(buf: &Buffer, pos: &mut Position) {
    let line = buf.current_line(*pos);
    let next = grapheme::next_boundary(line, pos.byte);
    if next > pos.byte {
        pos.byte = next;
    }
}

/// Move up one line, re-clamping the byte offset to the new line.
pub fn up(buf: &Buffer, pos: &mut Position) {
    if pos.line == 0 {
        return;
    }
    pos.line -= 1;
    clamp_to_line(buf, pos);
}

/// Move down one line, re-clamping the byte offset to the new line.
pub fn down(buf: &Buffer, pos: &mut Position) {
    if pos.line + 1 >= buf.line_count() {
        return;
    }
    pos.line += 1;
    clamp_to_line(buf, pos);
}

/// Move to column 0 of the current line.
pub fn line_start(_buf: &Buffer, pos: &mut Position) {
    pos.byte = 0;
}

/// Move to end of line (after the last cluster; Normal mode normalizes later).
pub fn line_end(buf: &Buffer, pos: &mut Position) {
    pos.byte = buf.line_len(pos.line);
}

/// Move to the first line, column 0.
pub fn first_line(_buf: &Buffer, pos: &mut Position) {
    pos.line = 0;
    pos.byte = 0;
}

/// Move to the last line, column 0.
pub fn last_line(buf: &Buffer, pos: &mut Position) {
    pos.line = buf.line_count() - 1;
    pos.byte = 0;
}

fn clamp_to_line(buf: &Buffer, pos: &mut Position) {
    let line = buf.current_line(*pos);
    if pos.byte > line.len() {
        pos.byte = line.len();
    }
    // Re-align onto a cluster boundary if the clamp landed mid-cluster.
    if pos.byte < line.len() && !line.is_char_boundary(pos.byte) {
        pos.byte = grapheme::prev_boundary(line, pos.byte);
    }
}

/// Move forward to the next word start using three-class token scanning
/// (word / whitespace / punctuation).
///
/// When the cursor sits at or past the second-to-last cluster of its line the
/// motion advances straight to the next line (skipping leading whitespace) if
/// one exists, else clamps at line end. Otherwise it skips the remainder of
/// the current token by class, then any whitespace, crossing to the next line
/// when the scan runs off the end.
pub fn word_forward(buf: &Buffer, pos: &mut Position) {
    let line = buf.current_line(*pos).to_string();
    let len = line.len();
    let last_start = grapheme::prev_boundary(&line, len);
    let second_last_start = grapheme::prev_boundary(&line, last_start);
    if len == 0 || pos.byte >= second_last_start {
        advance_line_or_clamp(buf, pos, len);
        return;
    }

    let class = grapheme::class_at(&line, pos.byte);
    let mut b = pos.byte;
    while b < len && grapheme::class_at(&line, b) == class {
        b = grapheme::next_boundary(&line, b);
    }
    while b < len && grapheme::class_at(&line, b) == CharClass::Whitespace {
        b = grapheme::next_boundary(&line, b);
    }
    if b >= len {
        advance_line_or_clamp(buf, pos, len);
    } else {
        pos.byte = b;
    }
}

fn advance_line_or_clamp(buf: &Buffer, pos: &mut Position, current_len: usize) {
    if pos.line + 1 < buf.line_count() {
        pos.line += 1;
        let next = buf.current_line(*pos);
        pos.byte = leading_non_whitespace(next);
    } else {
        pos.byte = current_len;
    }
}

/// First non-whitespace cluster start, or 0 for empty / all-whitespace lines
/// (the motion rests at the start of blank lines, matching `w` on `""`).
fn leading_non_whitespace(line: &str) -> usize {
    let mut b = 0;
    while b < line.len() && grapheme::class_at(line, b) == CharClass::Whitespace {
        b = grapheme::next_boundary(line, b);
    }
    if b >= line.len() { 0 } else { b }
}

/// Move backward to the previous word start, mirroring `word_forward`.
///
/// At column 0 the motion steps to the end of the previous line. Otherwise it
/// steps back one cluster and skips whitespace backward; if that strands the
/// cursor on leading whitespace at column 0 with a previous line available,
/// it jumps to that line's last token start, else it scans back to the start
/// of the current token.
pub fn word_backward(buf: &Buffer, pos: &mut Position) {
    if pos.byte == 0 {
        if pos.line == 0 {
            return;
        }
        pos.line -= 1;
        pos.byte = buf.line_len(pos.line);
        return;
    }
    let line = buf.current_line(*pos).to_string();
    let mut b = grapheme::prev_boundary(&line, pos.byte.min(line.len()));
    while b > 0 && grapheme::class_at(&line, b) == CharClass::Whitespace {
        b = grapheme::prev_boundary(&line, b);
    }
    if b == 0 && grapheme::class_at(&line, 0) == CharClass::Whitespace && pos.line > 0 {
        pos.line -= 1;
        let prev = buf.current_line(*pos);
        pos.byte = last_token_start(prev);
        return;
    }
    let class = grapheme::class_at(&line, b);
    while b > 0 {
        let prev_b = grapheme::prev_boundary(&line, b);
        if grapheme::class_at(&line, prev_b) != class {
            break;
        }
        b = prev_b;
    }
    pos.byte = b;
}

/// Start byte of the last token on a line (0 for empty or all-whitespace).
fn last_token_start(line: &str) -> usize {
    let mut end = line.len();
    while end > 0 {
        let prev = grapheme::prev_boundary(line, end);
        if grapheme::class_at(line, prev) != CharClass::Whitespace {
            break;
        }
        end = prev;
    }
    if end == 0 {
        return 0;
    }
    let mut b = grapheme::prev_boundary(line, end);
    let class = grapheme::class_at(line, b);
    while b > 0 {
        let prev = grapheme::prev_boundary(line, b);
        if grapheme::class_at(line, prev) != class {
            break;
        }
        b = prev;
    }
    b
}
