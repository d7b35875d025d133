//! Minimal full-repaint renderer.
//!
//! Repaints the whole frame from a [`RenderView`] on every dirty dispatch.
//! No diffing or partial updates; at single-buffer editing sizes a full
//! repaint per keystroke is well inside terminal throughput.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use core_state::RenderView;

pub fn draw(out: &mut impl Write, view: &RenderView, cols: u16, rows: u16) -> Result<()> {
    if rows == 0 {
        return Ok(());
    }
    let text_rows = rows.saturating_sub(1) as usize;
    queue!(out, Hide, Clear(ClearType::All))?;
    for (row, line) in view.lines.iter().take(text_rows).enumerate() {
        queue!(
            out,
            MoveTo(0, row as u16),
            Print(truncate_cols(line, cols as usize))
        )?;
    }
    queue!(
        out,
        MoveTo(0, rows - 1),
        Clear(ClearType::CurrentLine),
        Print(truncate_cols(&view.status_text, cols as usize))
    )?;
    let cur_row = view.cursor_line.min(text_rows.saturating_sub(1)) as u16;
    let cur_col = view.cursor_col.min(cols.saturating_sub(1) as usize) as u16;
    queue!(out, MoveTo(cur_col, cur_row), Show)?;
    out.flush()?;
    Ok(())
}

fn truncate_cols(line: &str, cols: usize) -> &str {
    match line.char_indices().nth(cols) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
