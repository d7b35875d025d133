//! Key event to action translation.
//!
//! Routing precedence (highest first): quit confirmation, save confirmation,
//! command line, Ctrl-chords, base mode. The translator owns the pending key
//! for `dd`/`yy`/`gg` chords: a two-keystroke detector matching consecutive
//! identical keys, not a general sequence parser. Any non-matching key breaks
//! the chord and is translated normally.

use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::{EditorState, Mode, Overlay};
use tracing::trace;

use crate::{Action, EditKind, ModeChange, MotionKind};

#[derive(Debug, Default)]
pub struct KeyTranslator {
    pending: Option<char>,
}

impl KeyTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, state: &EditorState, key: &KeyEvent) -> Option<Action> {
        let action = self.route(state, key);
        trace!(target: "actions.translate", key = %key, ?action, pending = ?self.pending, "translated");
        action
    }

    fn route(&mut self, state: &EditorState, key: &KeyEvent) -> Option<Action> {
        match &state.overlay {
            Overlay::QuitConfirm { .. } => return quit_confirm_key(key),
            Overlay::SaveConfirm { .. } => return save_confirm_key(key),
            Overlay::Command(_) => return command_key(key),
            Overlay::None => {}
        }
        if key.mods.contains(KeyModifiers::CTRL) {
            self.pending = None;
            return match key.code {
                KeyCode::Char('s') => Some(Action::SaveRequest),
                KeyCode::Char('r') => Some(Action::Redo),
                _ => None,
            };
        }
        match state.mode {
            Mode::Normal => self.normal_key(key),
            Mode::Insert => insert_key(key),
        }
    }

    fn normal_key(&mut self, key: &KeyEvent) -> Option<Action> {
        if let KeyCode::Char(c) = key.code
            && matches!(c, 'd' | 'y' | 'g')
        {
            if self.pending.take() == Some(c) {
                return Some(match c {
                    'd' => Action::DeleteLine,
                    'y' => Action::YankLine,
                    _ => Action::Motion(MotionKind::FirstLine),
                });
            }
            self.pending = Some(c);
            return None;
        }
        self.pending = None;
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => Some(Action::Motion(MotionKind::Left)),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::Motion(MotionKind::Right)),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::Motion(MotionKind::Up)),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::Motion(MotionKind::Down)),
            KeyCode::Char('0') => Some(Action::Motion(MotionKind::LineStart)),
            KeyCode::Char('$') => Some(Action::Motion(MotionKind::LineEnd)),
            KeyCode::Char('G') => Some(Action::Motion(MotionKind::LastLine)),
            KeyCode::Char('w') => Some(Action::Motion(MotionKind::WordForward)),
            KeyCode::Char('b') => Some(Action::Motion(MotionKind::WordBackward)),
            KeyCode::Char('x') => Some(Action::Edit(EditKind::DeleteUnder)),
            KeyCode::Char('o') => Some(Action::Edit(EditKind::OpenBelow)),
            KeyCode::Char('O') => Some(Action::Edit(EditKind::OpenAbove)),
            KeyCode::Char('i') => Some(Action::ModeChange(ModeChange::EnterInsert)),
            KeyCode::Char('a') => Some(Action::ModeChange(ModeChange::EnterInsertAfter)),
            KeyCode::Char('I') => Some(Action::ModeChange(ModeChange::EnterInsertLineStart)),
            KeyCode::Char('A') => Some(Action::ModeChange(ModeChange::EnterInsertLineEnd)),
            KeyCode::Char('u') => Some(Action::Undo),
            KeyCode::Char('p') => Some(Action::PasteAfter),
            KeyCode::Char('P') => Some(Action::PasteBefore),
            KeyCode::Char(':') => Some(Action::CommandStart),
            KeyCode::Esc => Some(Action::QuitRequest),
            _ => None,
        }
    }
}

fn insert_key(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::ModeChange(ModeChange::LeaveInsert)),
        KeyCode::Enter => Some(Action::Edit(EditKind::InsertNewline)),
        KeyCode::Backspace => Some(Action::Edit(EditKind::Backspace)),
        KeyCode::Left => Some(Action::Motion(MotionKind::Left)),
        KeyCode::Right => Some(Action::Motion(MotionKind::Right)),
        KeyCode::Up => Some(Action::Motion(MotionKind::Up)),
        KeyCode::Down => Some(Action::Motion(MotionKind::Down)),
        KeyCode::Char(c) => Some(Action::Edit(EditKind::InsertChar(c))),
    }
}

fn command_key(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => Some(Action::CommandExecute),
        KeyCode::Esc => Some(Action::CommandCancel),
        KeyCode::Backspace => Some(Action::CommandBackspace),
        KeyCode::Char(c) => Some(Action::CommandChar(c)),
        _ => None,
    }
}

fn save_confirm_key(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') => Some(Action::ConfirmYes),
        KeyCode::Char('n') | KeyCode::Esc => Some(Action::ConfirmNo),
        _ => None,
    }
}

fn quit_confirm_key(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') => Some(Action::ConfirmYes),
        KeyCode::Char('n') => Some(Action::ConfirmNo),
        KeyCode::Char('c') | KeyCode::Esc => Some(Action::ConfirmCancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::CommandLineState;
    use core_text::Buffer;

    fn state(text: &str) -> EditorState {
        EditorState::new(Buffer::from_text(text))
    }

    fn ch(c: char) -> KeyEvent {
        KeyEvent::plain(KeyCode::Char(c))
    }

    #[test]
    fn double_d_emits_delete_line() {
        let st = state("abc");
        let mut tr = KeyTranslator::new();
        assert_eq!(tr.translate(&st, &ch('d')), None);
        assert_eq!(tr.translate(&st, &ch('d')), Some(Action::DeleteLine));
    }

    #[test]
    fn broken_chord_translates_second_key_normally() {
        let st = state("abc");
        let mut tr = KeyTranslator::new();
        assert_eq!(tr.translate(&st, &ch('d')), None);
        assert_eq!(
            tr.translate(&st, &ch('x')),
            Some(Action::Edit(EditKind::DeleteUnder))
        );
        // The chord state was consumed; a later single 'd' starts fresh.
        assert_eq!(tr.translate(&st, &ch('d')), None);
    }

    #[test]
    fn chord_keys_do_not_cross_match() {
        let st = state("abc");
        let mut tr = KeyTranslator::new();
        assert_eq!(tr.translate(&st, &ch('d')), None);
        assert_eq!(tr.translate(&st, &ch('y')), None);
        assert_eq!(tr.translate(&st, &ch('y')), Some(Action::YankLine));
    }

    #[test]
    fn double_g_is_first_line() {
        let st = state("a\nb");
        let mut tr = KeyTranslator::new();
        assert_eq!(tr.translate(&st, &ch('g')), None);
        assert_eq!(
            tr.translate(&st, &ch('g')),
            Some(Action::Motion(MotionKind::FirstLine))
        );
    }

    #[test]
    fn ctrl_s_is_save_request_in_both_modes() {
        let mut st = state("abc");
        let mut tr = KeyTranslator::new();
        let key = KeyEvent::ctrl('s');
        assert_eq!(tr.translate(&st, &key), Some(Action::SaveRequest));
        st.mode = Mode::Insert;
        assert_eq!(tr.translate(&st, &key), Some(Action::SaveRequest));
    }

    #[test]
    fn insert_mode_chars_are_literal() {
        let mut st = state("abc");
        st.mode = Mode::Insert;
        let mut tr = KeyTranslator::new();
        assert_eq!(
            tr.translate(&st, &ch('d')),
            Some(Action::Edit(EditKind::InsertChar('d')))
        );
    }

    #[test]
    fn command_overlay_intercepts_keys() {
        let mut st = state("abc");
        st.overlay = Overlay::Command(CommandLineState::begin());
        let mut tr = KeyTranslator::new();
        assert_eq!(tr.translate(&st, &ch('w')), Some(Action::CommandChar('w')));
        assert_eq!(
            tr.translate(&st, &KeyEvent::plain(KeyCode::Enter)),
            Some(Action::CommandExecute)
        );
        assert_eq!(
            tr.translate(&st, &KeyEvent::plain(KeyCode::Esc)),
            Some(Action::CommandCancel)
        );
    }

    #[test]
    fn quit_confirm_keys() {
        let mut st = state("abc");
        st.overlay = Overlay::QuitConfirm {
            message: "quit?".into(),
        };
        let mut tr = KeyTranslator::new();
        assert_eq!(tr.translate(&st, &ch('y')), Some(Action::ConfirmYes));
        assert_eq!(tr.translate(&st, &ch('n')), Some(Action::ConfirmNo));
        assert_eq!(tr.translate(&st, &ch('c')), Some(Action::ConfirmCancel));
        assert_eq!(
            tr.translate(&st, &KeyEvent::plain(KeyCode::Esc)),
            Some(Action::ConfirmCancel)
        );
        assert_eq!(tr.translate(&st, &ch('z')), None);
    }

    #[test]
    fn save_confirm_escape_cancels() {
        let mut st = state("abc");
        st.overlay = Overlay::SaveConfirm {
            message: "save?".into(),
        };
        let mut tr = KeyTranslator::new();
        assert_eq!(
            tr.translate(&st, &KeyEvent::plain(KeyCode::Esc)),
            Some(Action::ConfirmNo)
        );
    }

    #[test]
    fn escape_in_normal_is_quit_request() {
        let st = state("abc");
        let mut tr = KeyTranslator::new();
        assert_eq!(
            tr.translate(&st, &KeyEvent::plain(KeyCode::Esc)),
            Some(Action::QuitRequest)
        );
    }
}
