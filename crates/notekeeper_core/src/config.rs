//! Store configuration and backing-file resolution.
//!
//! # Responsibility
//! - Decide where the note file lives.
//! - Decide how startup reacts to an unreadable note file.
//!
//! # Invariants
//! - Resolution order: explicit path > `NOTEKEEPER_FILE` > `notes.json`.
//! - Blank env values are ignored.

use std::path::PathBuf;

pub const NOTES_FILE_ENV: &str = "NOTEKEEPER_FILE";
pub const DEFAULT_NOTES_FILE: &str = "notes.json";

/// Startup behavior when the persisted file exists but cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Surface the persistence error to the caller.
    #[default]
    Strict,
    /// Log a warning and start with an empty collection.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub load_policy: LoadPolicy,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            load_policy: LoadPolicy::default(),
        }
    }

    /// Resolves the backing file from an explicit override or the environment.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let env_value = std::env::var(NOTES_FILE_ENV).ok();
        Self::new(resolve_notes_path(explicit, env_value.as_deref()))
    }

    pub fn with_load_policy(mut self, policy: LoadPolicy) -> Self {
        self.load_policy = policy;
        self
    }
}

fn resolve_notes_path(explicit: Option<PathBuf>, env_value: Option<&str>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return path;
    }
    if let Some(raw) = env_value {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from(DEFAULT_NOTES_FILE)
}
