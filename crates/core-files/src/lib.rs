//! File-safety classification and the backup-then-write save pipeline.
//!
//! The editor core never opens file handles itself; everything flows through
//! the [`FileIo`] seam so the classifier and save pipeline can be exercised
//! against synthetic probes in tests. [`StdFileIo`] is the production
//! implementation over `std::fs`.

use std::io;
use std::path::Path;

pub mod classify;
pub mod save;

pub use classify::{ClassifierLimits, ReadOnlyReason, ReadOnlyStatus, classify};
pub use save::{BACKUP_SUFFIX_DEFAULT, SaveError, SaveOutcome, backup_path, save};

/// Result of probing a file prior to editing: total size plus the leading
/// bytes used for binary sniffing.
#[derive(Debug, Clone)]
pub struct FileProbe {
    pub size: u64,
    pub first_bytes: Vec<u8>,
}

/// Persistence collaborator. The classifier uses `probe`, the save pipeline
/// uses `read`/`write`/`exists`; nothing here manages locking or directories.
pub trait FileIo {
    /// Stat the file and read up to `probe_len` leading bytes.
    fn probe(&self, path: &Path, probe_len: usize) -> io::Result<FileProbe>;
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

/// Production `FileIo` over `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdFileIo;

impl FileIo for StdFileIo {
    fn probe(&self, path: &Path, probe_len: usize) -> io::Result<FileProbe> {
        use std::io::Read;
        let size = std::fs::metadata(path)?.len();
        let file = std::fs::File::open(path)?;
        let mut first_bytes = Vec::with_capacity(probe_len.min(size as usize));
        file.take(probe_len as u64).read_to_end(&mut first_bytes)?;
        Ok(FileProbe { size, first_bytes })
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Test support: in-memory `FileIo` used by this crate's tests and by
/// downstream integration suites.
pub mod test_io {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// In-memory `FileIo` with optional injected failures.
    #[derive(Default)]
    pub struct MemFileIo {
        pub files: RefCell<HashMap<PathBuf, Vec<u8>>>,
        pub fail_probe: bool,
        pub fail_writes_to: Option<PathBuf>,
    }

    impl MemFileIo {
        pub fn with_file(path: impl Into<PathBuf>, content: &[u8]) -> Self {
            let io = Self::default();
            io.files.borrow_mut().insert(path.into(), content.to_vec());
            io
        }
    }

    impl FileIo for MemFileIo {
        fn probe(&self, path: &Path, probe_len: usize) -> io::Result<FileProbe> {
            if self.fail_probe {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "probe denied"));
            }
            let files = self.files.borrow();
            let content = files
                .get(path)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))?;
            Ok(FileProbe {
                size: content.len() as u64,
                first_bytes: content[..content.len().min(probe_len)].to_vec(),
            })
        }

        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
        }

        fn write(&self, path: &Path, content: &[u8]) -> io::Result<()> {
            if self.fail_writes_to.as_deref() == Some(path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "write denied"));
            }
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), content.to_vec());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_probe_reads_leading_bytes_only() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("probe.txt");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            f.write_all(b"hello world").unwrap();
        }
        let probe = StdFileIo.probe(&path, 5).unwrap();
        assert_eq!(probe.size, 11);
        assert_eq!(probe.first_bytes, b"hello");
    }

    #[test]
    fn std_probe_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(StdFileIo.probe(&dir.path().join("nope"), 8).is_err());
    }
}
