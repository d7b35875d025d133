#![allow(dead_code)] // Shared across integration test binaries; each uses a subset.

use core_actions::{DispatchResult, KeyTranslator, SessionContext, dispatch};
use core_events::{KeyCode, KeyEvent};
use core_files::test_io::MemFileIo;
use core_files::{ClassifierLimits, classify};
use core_state::EditorState;
use core_text::Buffer;
use std::path::PathBuf;
use std::time::Duration;

/// In-memory editing session: state + translator + fake persistence,
/// driven one key event at a time like the host loop does.
pub struct Session {
    pub state: EditorState,
    pub translator: KeyTranslator,
    pub io: MemFileIo,
    pub quit: bool,
}

impl Session {
    pub fn open(text: &str) -> Self {
        Self {
            state: EditorState::new(Buffer::from_text(text)),
            translator: KeyTranslator::new(),
            io: MemFileIo::default(),
            quit: false,
        }
    }

    /// Session over a fake on-disk file, classified the way the binary does
    /// it before editing begins.
    pub fn open_file(path: &str, content: &[u8]) -> Self {
        let path = PathBuf::from(path);
        let io = MemFileIo::with_file(&path, content);
        let text = String::from_utf8_lossy(content).into_owned();
        let mut state = EditorState::new(Buffer::from_text(&text));
        state.read_only = classify(&path, &ClassifierLimits::default(), &io);
        state.file_name = Some(path);
        Self {
            state,
            translator: KeyTranslator::new(),
            io,
            quit: false,
        }
    }

    pub fn press(&mut self, key: KeyEvent) -> DispatchResult {
        let Some(action) = self.translator.translate(&self.state, &key) else {
            return DispatchResult::clean();
        };
        let ctx = SessionContext {
            io: &self.io,
            backup_suffix: ".bak",
            message_ttl: Duration::from_secs(3),
        };
        let result = dispatch(action, &mut self.state, &ctx);
        if result.quit {
            self.quit = true;
        }
        result
    }

    pub fn press_char(&mut self, c: char) -> DispatchResult {
        self.press(KeyEvent::plain(KeyCode::Char(c)))
    }

    /// Feed each character of `keys` as a plain key event.
    pub fn type_keys(&mut self, keys: &str) {
        for c in keys.chars() {
            self.press_char(c);
        }
    }

    pub fn press_esc(&mut self) -> DispatchResult {
        self.press(KeyEvent::plain(KeyCode::Esc))
    }

    pub fn press_enter(&mut self) -> DispatchResult {
        self.press(KeyEvent::plain(KeyCode::Enter))
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.buffer.snapshot_lines()
    }

    pub fn saved_content(&self, path: &str) -> Option<Vec<u8>> {
        self.io.files.borrow().get(&PathBuf::from(path)).cloned()
    }
}
