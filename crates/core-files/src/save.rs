//! Backup-then-write save pipeline.
//!
//! Every save of an existing file first copies the on-disk content to
//! `<path><suffix>` (a single backup slot, overwritten each time). A backup
//! failure aborts the save before the original is touched. Failures are
//! returned as values; nothing here panics or propagates into the state
//! machine.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};

use crate::FileIo;

/// Default backup suffix appended to the original path.
pub const BACKUP_SUFFIX_DEFAULT: &str = ".bak";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("backup failed: {0}")]
    Backup(std::io::Error),
    #[error("write failed: {0}")]
    Write(std::io::Error),
}

/// Result value surfaced to the status line; the session never observes a
/// partially applied save.
#[derive(Debug)]
pub enum SaveOutcome {
    Saved { backed_up: bool },
    Failed(SaveError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }
}

/// Path of the backup slot for `path`.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Save `content` to `path`, backing up existing on-disk content first.
/// A missing original skips the backup step (nothing to preserve).
pub fn save(path: &Path, content: &str, suffix: &str, io: &dyn FileIo) -> SaveOutcome {
    let mut backed_up = false;
    if io.exists(path) {
        let original = match io.read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(target: "files.save", path = %path.display(), error = %e, "backup_read_failed");
                return SaveOutcome::Failed(SaveError::Backup(e));
            }
        };
        let backup = backup_path(path, suffix);
        if let Err(e) = io.write(&backup, &original) {
            error!(target: "files.save", backup = %backup.display(), error = %e, "backup_write_failed");
            return SaveOutcome::Failed(SaveError::Backup(e));
        }
        backed_up = true;
        debug!(target: "files.save", backup = %backup.display(), bytes = original.len(), "backup_written");
    }
    match io.write(path, content.as_bytes()) {
        Ok(()) => {
            debug!(target: "files.save", path = %path.display(), bytes = content.len(), "save_ok");
            SaveOutcome::Saved { backed_up }
        }
        Err(e) => {
            error!(target: "files.save", path = %path.display(), error = %e, "save_write_failed");
            SaveOutcome::Failed(SaveError::Write(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_io::MemFileIo;
    use std::path::PathBuf;

    #[test]
    fn save_new_file_skips_backup() {
        let io = MemFileIo::default();
        let path = PathBuf::from("/doc/new.txt");
        let outcome = save(&path, "fresh", BACKUP_SUFFIX_DEFAULT, &io);
        assert!(matches!(outcome, SaveOutcome::Saved { backed_up: false }));
        assert_eq!(io.files.borrow().get(&path).unwrap(), b"fresh");
        assert!(!io.exists(&backup_path(&path, BACKUP_SUFFIX_DEFAULT)));
    }

    #[test]
    fn save_existing_file_writes_backup_first() {
        let path = PathBuf::from("/doc/notes.txt");
        let io = MemFileIo::with_file(&path, b"old content");
        let outcome = save(&path, "new content", BACKUP_SUFFIX_DEFAULT, &io);
        assert!(matches!(outcome, SaveOutcome::Saved { backed_up: true }));
        let files = io.files.borrow();
        assert_eq!(files.get(&path).unwrap(), b"new content");
        assert_eq!(
            files
                .get(&backup_path(&path, BACKUP_SUFFIX_DEFAULT))
                .unwrap(),
            b"old content"
        );
    }

    #[test]
    fn backup_slot_is_overwritten_not_versioned() {
        let path = PathBuf::from("/doc/notes.txt");
        let io = MemFileIo::with_file(&path, b"v1");
        assert!(save(&path, "v2", BACKUP_SUFFIX_DEFAULT, &io).is_saved());
        assert!(save(&path, "v3", BACKUP_SUFFIX_DEFAULT, &io).is_saved());
        let files = io.files.borrow();
        assert_eq!(
            files
                .get(&backup_path(&path, BACKUP_SUFFIX_DEFAULT))
                .unwrap(),
            b"v2",
            "single backup slot holds the previous save only"
        );
    }

    #[test]
    fn backup_failure_aborts_before_touching_original() {
        let path = PathBuf::from("/doc/notes.txt");
        let io = MemFileIo::with_file(&path, b"precious");
        let mut io = io;
        io.fail_writes_to = Some(backup_path(&path, BACKUP_SUFFIX_DEFAULT));
        let outcome = save(&path, "replacement", BACKUP_SUFFIX_DEFAULT, &io);
        assert!(matches!(outcome, SaveOutcome::Failed(SaveError::Backup(_))));
        assert_eq!(
            io.files.borrow().get(&path).unwrap(),
            b"precious",
            "original untouched after backup failure"
        );
    }

    #[test]
    fn write_failure_is_reported_as_value() {
        let path = PathBuf::from("/doc/locked.txt");
        let mut io = MemFileIo::default();
        io.fail_writes_to = Some(path.clone());
        let outcome = save(&path, "content", BACKUP_SUFFIX_DEFAULT, &io);
        assert!(matches!(outcome, SaveOutcome::Failed(SaveError::Write(_))));
    }
}
