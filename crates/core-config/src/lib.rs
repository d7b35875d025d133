//! Configuration loading and parsing.
//!
//! Parses `quill.toml` (or an override path provided by the binary). Every
//! field is defaulted, unknown fields are tolerated, and an unreadable or
//! unparsable file falls back to defaults rather than refusing to start; the
//! editor must always come up.

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

use core_files::{BACKUP_SUFFIX_DEFAULT, ClassifierLimits};

/// `[limits]` section: classifier thresholds and undo history depth.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LimitsConfig {
    #[serde(default = "LimitsConfig::default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "LimitsConfig::default_binary_probe_bytes")]
    pub binary_probe_bytes: usize,
    #[serde(default = "LimitsConfig::default_undo_capacity")]
    pub undo_capacity: usize,
}

impl LimitsConfig {
    const fn default_max_file_size() -> u64 {
        1024 * 1024
    }
    const fn default_binary_probe_bytes() -> usize {
        8 * 1024
    }
    const fn default_undo_capacity() -> usize {
        100
    }

    pub fn classifier_limits(&self) -> ClassifierLimits {
        ClassifierLimits {
            max_file_size: self.max_file_size,
            binary_probe_bytes: self.binary_probe_bytes,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size: Self::default_max_file_size(),
            binary_probe_bytes: Self::default_binary_probe_bytes(),
            undo_capacity: Self::default_undo_capacity(),
        }
    }
}

/// `[files]` section: save pipeline knobs.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FilesConfig {
    #[serde(default = "FilesConfig::default_backup_suffix")]
    pub backup_suffix: String,
}

impl FilesConfig {
    fn default_backup_suffix() -> String {
        BACKUP_SUFFIX_DEFAULT.to_string()
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            backup_suffix: Self::default_backup_suffix(),
        }
    }
}

/// `[status]` section: transient message lifetime.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusConfig {
    #[serde(default = "StatusConfig::default_message_ttl_ms")]
    pub message_ttl_ms: u64,
}

impl StatusConfig {
    const fn default_message_ttl_ms() -> u64 {
        3000
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            message_ttl_ms: Self::default_message_ttl_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub status: StatusConfig,
}

/// Best-effort config path following platform conventions: a local
/// `quill.toml` wins over the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("quill.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join("quill.toml");
    }
    PathBuf::from("quill.toml")
}

/// Load the config from `path`, or from [`discover`] when absent. A missing
/// file is normal; a malformed one logs and defaults.
pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<Config>(&content) {
        Ok(config) => {
            info!(target: "config", path = %path.display(), "config loaded");
            Ok(config)
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config parse failed, using defaults");
            Ok(Config::default())
        }
    }
}
