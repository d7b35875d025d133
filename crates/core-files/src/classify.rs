//! Read-only classification for file paths.
//!
//! Rules run in a fixed order with first match winning: dependency directory,
//! version-control directory, size limit, binary sniff. Probe I/O failures
//! fail open to writable; availability is preferred over caution here, and
//! the policy is load-bearing for callers (a transient stat failure must not
//! lock an otherwise editable file).

use std::path::Path;
use tracing::debug;

use crate::FileIo;

/// Path segments treated as dependency directories.
const DEPENDENCY_SEGMENTS: &[&str] = &["node_modules", "target", "vendor"];
/// Path segments treated as version-control internals.
const VERSION_CONTROL_SEGMENTS: &[&str] = &[".git", ".hg", ".svn"];

/// Injected classifier thresholds so tests can run with synthetic limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierLimits {
    /// Files larger than this are read-only.
    pub max_file_size: u64,
    /// Window sniffed for NUL bytes.
    pub binary_probe_bytes: usize,
}

impl Default for ClassifierLimits {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024,
            binary_probe_bytes: 8 * 1024,
        }
    }
}

/// Why a buffer refuses mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOnlyReason {
    DependencyDir,
    VersionControlDir,
    BinaryContent,
    SizeLimit,
    None,
}

impl ReadOnlyReason {
    /// User-facing refusal text surfaced by the status line.
    pub fn message(self) -> &'static str {
        match self {
            Self::DependencyDir => "read-only: inside a dependency directory",
            Self::VersionControlDir => "read-only: inside a version control directory",
            Self::BinaryContent => "read-only: binary content",
            Self::SizeLimit => "read-only: file exceeds size limit",
            Self::None => "",
        }
    }
}

/// Outcome of classification, computed once per path before editing begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOnlyStatus {
    pub read_only: bool,
    pub reason: ReadOnlyReason,
}

impl ReadOnlyStatus {
    pub fn writable() -> Self {
        Self {
            read_only: false,
            reason: ReadOnlyReason::None,
        }
    }

    fn because(reason: ReadOnlyReason) -> Self {
        Self {
            read_only: true,
            reason,
        }
    }
}

impl Default for ReadOnlyStatus {
    fn default() -> Self {
        Self::writable()
    }
}

/// Classify a path. Ordered rule evaluation, first match wins; the lexical
/// checks never touch the filesystem, so only rules 3 and 4 probe.
pub fn classify(path: &Path, limits: &ClassifierLimits, io: &dyn FileIo) -> ReadOnlyStatus {
    if has_segment(path, DEPENDENCY_SEGMENTS) {
        return ReadOnlyStatus::because(ReadOnlyReason::DependencyDir);
    }
    if has_segment(path, VERSION_CONTROL_SEGMENTS) {
        return ReadOnlyStatus::because(ReadOnlyReason::VersionControlDir);
    }
    let probe = match io.probe(path, limits.binary_probe_bytes) {
        Ok(p) => p,
        Err(e) => {
            // Fail open: a probe failure must not block editing.
            debug!(target: "files.classify", path = %path.display(), error = %e, "probe_failed_fail_open");
            return ReadOnlyStatus::writable();
        }
    };
    if probe.size > limits.max_file_size {
        return ReadOnlyStatus::because(ReadOnlyReason::SizeLimit);
    }
    if probe.first_bytes.contains(&0) {
        return ReadOnlyStatus::because(ReadOnlyReason::BinaryContent);
    }
    ReadOnlyStatus::writable()
}

fn has_segment(path: &Path, segments: &[&str]) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|s| segments.contains(&s))
    })
}
