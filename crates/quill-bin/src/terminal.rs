//! Terminal lifecycle and input translation.
//!
//! The guard owns raw mode and the alternate screen; its `Drop` restores the
//! terminal no matter how the event loop exits. The blocking reader thread
//! translates crossterm events into `core-events` key events and pushes them
//! over the bounded channel with `blocking_send`, parking on backpressure
//! instead of dropping keystrokes.

use std::io::{Write, stdout};
use std::thread::JoinHandle;

use anyhow::Result;
use crossterm::{
    cursor, event, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tokio::sync::mpsc::Sender;
use tracing::{debug, warn};

use core_events::{Event, InputEvent, KeyCode, KeyEvent, KeyModifiers};

pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        let _ = execute!(out, LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();
        let _ = out.flush();
    }
}

/// Spawn the blocking input reader. The thread exits when the channel
/// closes or the terminal event stream errors out.
pub fn spawn_input_thread(tx: Sender<Event>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        loop {
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(e) => {
                    warn!(target: "runtime.input", error = %e, "input_read_failed");
                    let _ = tx.blocking_send(Event::Shutdown);
                    return;
                }
            };
            let Some(translated) = translate_event(ev) else {
                continue;
            };
            if tx.blocking_send(translated).is_err() {
                debug!(target: "runtime.input", "event channel closed, input thread exiting");
                return;
            }
        }
    })
}

fn translate_event(ev: event::Event) -> Option<Event> {
    match ev {
        event::Event::Key(key) if key.kind != event::KeyEventKind::Release => {
            translate_key(key).map(|k| Event::Input(InputEvent::Key(k)))
        }
        event::Event::Resize(cols, rows) => Some(Event::Input(InputEvent::Resize(cols, rows))),
        _ => None,
    }
}

fn translate_key(key: event::KeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Esc => KeyCode::Esc,
        event::KeyCode::Backspace => KeyCode::Backspace,
        event::KeyCode::Up => KeyCode::Up,
        event::KeyCode::Down => KeyCode::Down,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        _ => return None,
    };
    let mut mods = KeyModifiers::empty();
    if key.modifiers.contains(event::KeyModifiers::CONTROL) {
        mods |= KeyModifiers::CTRL;
    }
    if key.modifiers.contains(event::KeyModifiers::ALT) {
        mods |= KeyModifiers::ALT;
    }
    if key.modifiers.contains(event::KeyModifiers::SHIFT) {
        mods |= KeyModifiers::SHIFT;
    }
    Some(KeyEvent { code, mods })
}
