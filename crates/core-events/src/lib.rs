//! Event types and channel policy shared between the input thread and the
//! host event loop.

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// Bounded channel capacity for the runtime event channel. The blocking input
/// thread uses `blocking_send`, which parks until space is available rather
/// than dropping keystrokes; with a single producer and single consumer that
/// backpressure is both rare and lossless.
pub const EVENT_CHANNEL_CAP: usize = 1024;

/// Top-level event consumed by the central loop, one at a time to completion.
#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    /// Periodic monotonic tick used to expire ephemeral status messages
    /// without busy polling.
    Tick,
    Shutdown,
}

/// Normalized input events produced by the terminal reader.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::empty(),
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            code: KeyCode::Char(ch),
            mods: KeyModifiers::CTRL,
        }
    }
}

/// Logical key representations consumed by the key translator. Printable
/// keys are always `Char` (':' arrives as `Char(':')`, not a dedicated
/// variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL  = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const SHIFT = 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

/// Spawn the monotonic tick producer. The task exits as soon as the channel
/// closes, so dropping the final `Sender` clone during shutdown is enough to
/// reap it.
pub fn spawn_tick(tx: Sender<Event>, interval: Duration) -> JoinHandle<()> {
    tracing::debug!(target: "runtime.events", ?interval, "spawning tick source");
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        loop {
            timer.tick().await;
            if tx.send(Event::Tick).await.is_err() {
                break;
            }
        }
    })
}
