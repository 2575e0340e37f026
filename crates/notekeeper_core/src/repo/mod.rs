//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the store.
//! - Isolate file format details from service orchestration.
//!
//! # Invariants
//! - `save_notes` always writes the full collection; there are no partial
//!   or incremental writes.
//! - A missing backing file loads as an empty collection.
//! - Read paths reject malformed persisted state instead of masking it.

pub mod json_repo;
pub mod memory_repo;
pub mod record;

use crate::model::note::Note;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, PersistenceError>;

/// Failure reading or writing the persisted note collection.
#[derive(Debug)]
pub enum PersistenceError {
    /// Backing file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Backing file is not a valid note document.
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Collection could not be encoded. Unreachable for `NoteRecord`, whose
    /// fields are all strings; kept so `save_notes` stays total.
    Encode(serde_json::Error),
    /// One record parsed structurally but carries invalid values.
    InvalidRecord { index: usize, message: String },
    /// Injected or backend-specific write failure.
    WriteRejected(String),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "note file `{}` I/O failed: {source}", path.display())
            }
            Self::Malformed { path, source } => {
                write!(f, "note file `{}` is malformed: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::InvalidRecord { index, message } => {
                write!(f, "invalid note record #{index}: {message}")
            }
            Self::WriteRejected(message) => write!(f, "note write rejected: {message}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::InvalidRecord { .. } | Self::WriteRejected(_) => None,
        }
    }
}

/// Whole-collection persistence contract.
pub trait NoteRepository {
    /// Loads every persisted note in stored order.
    fn load_notes(&self) -> RepoResult<Vec<Note>>;
    /// Replaces the persisted collection with `notes`.
    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()>;
}
