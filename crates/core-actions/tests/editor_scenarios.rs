//! End-to-end keystroke scenarios driven through the translator and
//! dispatcher, the same path the host loop takes.

mod common;

use common::Session;
use core_state::{Mode, Overlay};
use core_text::Position;
use pretty_assertions::assert_eq;

#[test]
fn enter_splits_line_at_cursor() {
    let mut s = Session::open("hello world");
    s.type_keys("wi"); // word forward to 'world', then insert
    assert_eq!(s.state.cursor, Position::new(0, 6));
    s.press_enter();
    assert_eq!(s.lines(), vec!["hello ".to_string(), "world".to_string()]);
    assert_eq!(s.state.cursor, Position::new(1, 0));
    assert!(matches!(s.state.mode, Mode::Insert));
}

#[test]
fn dd_on_only_line_leaves_one_empty_line() {
    let mut s = Session::open("solitary");
    s.type_keys("dd");
    assert_eq!(s.lines(), vec![String::new()]);
    assert_eq!(s.state.cursor, Position::new(0, 0));
    // The cut line is on the clipboard; p restores it below.
    s.press_char('p');
    assert_eq!(s.lines(), vec![String::new(), "solitary".to_string()]);
}

#[test]
fn paste_after_on_single_line_buffer() {
    let mut s = Session::open("alpha");
    s.type_keys("yyp");
    assert_eq!(s.lines(), vec!["alpha".to_string(), "alpha".to_string()]);
    assert_eq!(s.state.cursor, Position::new(1, 0));
}

#[test]
fn dirty_quit_declined_terminates_without_write() {
    let mut s = Session::open_file("/doc/notes.txt", b"original");
    s.type_keys("A changed");
    s.press_esc();
    assert!(s.state.dirty);
    s.type_keys(":q");
    s.press_enter();
    assert!(matches!(s.state.overlay, Overlay::QuitConfirm { .. }));
    assert!(!s.quit);
    s.press_char('n');
    assert!(s.quit, "n terminates the session");
    assert_eq!(
        s.saved_content("/doc/notes.txt").unwrap(),
        b"original",
        "no write happened"
    );
    assert!(s.saved_content("/doc/notes.txt.bak").is_none());
}

#[test]
fn dirty_quit_accepted_saves_then_terminates() {
    let mut s = Session::open_file("/doc/notes.txt", b"original");
    s.type_keys("A!");
    s.press_esc();
    s.type_keys(":q");
    s.press_enter();
    s.press_char('y');
    assert!(s.quit);
    assert_eq!(s.saved_content("/doc/notes.txt").unwrap(), b"original!");
    assert_eq!(
        s.saved_content("/doc/notes.txt.bak").unwrap(),
        b"original",
        "backup holds the pre-save content"
    );
}

#[test]
fn read_only_file_refuses_insert_and_typing() {
    let mut s = Session::open_file("/repo/.git/config", b"[core]");
    assert!(s.state.read_only.read_only);
    s.type_keys("ihello");
    assert!(matches!(s.state.mode, Mode::Normal), "insert entry refused");
    assert_eq!(s.lines(), vec!["[core]".to_string()]);
    assert!(!s.state.dirty);
    let msg = s.state.ephemeral_status.as_ref().map(|m| m.text.clone());
    assert_eq!(
        msg.as_deref(),
        Some("read-only: inside a version control directory")
    );
}

#[test]
fn undo_capacity_caps_recoverable_history() {
    let mut s = Session::open("");
    s.press_char('i');
    for _ in 0..101 {
        s.press_char('x');
    }
    s.press_esc();
    assert_eq!(s.state.undo_depth(), 100);
    let mut undone = 0;
    for _ in 0..101 {
        if s.press_char('u').dirty {
            undone += 1;
        }
    }
    assert_eq!(undone, 100, "only capacity-many undos succeed");
    // The first insertion was evicted and is unrecoverable.
    assert_eq!(s.lines(), vec!["x".to_string()]);
}

#[test]
fn save_hotkey_confirms_then_writes() {
    let mut s = Session::open_file("/doc/a.txt", b"v1");
    s.type_keys("A+");
    s.press(core_events::KeyEvent::ctrl('s'));
    assert!(matches!(s.state.overlay, Overlay::SaveConfirm { .. }));
    s.press_char('y');
    assert_eq!(s.saved_content("/doc/a.txt").unwrap(), b"v1+");
    assert!(!s.state.dirty);
    assert_eq!(s.state.undo_depth(), 0, "save clears undo history");
    assert!(!s.quit);
}

#[test]
fn command_escape_discards_buffer() {
    let mut s = Session::open("x");
    s.type_keys(":wq");
    assert!(matches!(s.state.overlay, Overlay::Command(_)));
    s.press_esc();
    assert!(s.state.overlay.is_none());
    assert!(!s.quit);
}

#[test]
fn unknown_command_is_echoed() {
    let mut s = Session::open("x");
    s.type_keys(":zzz");
    s.press_enter();
    let msg = s.state.ephemeral_status.as_ref().map(|m| m.text.clone());
    assert_eq!(msg.as_deref(), Some("Unknown command: :zzz"));
    assert!(s.state.overlay.is_none());
}
