//! JSON file-backed note repository.
//!
//! # Responsibility
//! - Read the whole note document on load, overwrite it on save.
//!
//! # Invariants
//! - Document shape is a top-level array of `NoteRecord`.
//! - A missing file is an empty collection, not an error.
//! - Saves are plain overwrites; a crash mid-write can truncate the file.

use crate::model::note::Note;
use crate::repo::record::{decode_records, encode_notes, NoteRecord};
use crate::repo::{NoteRepository, PersistenceError, RepoResult};
use log::{error, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Repository persisting notes to one JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileNoteRepository {
    path: PathBuf,
}

impl JsonFileNoteRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl NoteRepository for JsonFileNoteRepository {
    fn load_notes(&self) -> RepoResult<Vec<Note>> {
        let started_at = Instant::now();
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("event=file_read module=repo status=ok mode=missing count=0");
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=file_read module=repo status=error error_code=io_failed error={}",
                    err
                );
                return Err(self.io_error(err));
            }
        };

        let records: Vec<NoteRecord> = serde_json::from_str(&raw).map_err(|source| {
            error!(
                "event=file_read module=repo status=error error_code=malformed line={} column={}",
                source.line(),
                source.column()
            );
            PersistenceError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;

        let notes = decode_records(records)?;
        info!(
            "event=file_read module=repo status=ok mode=file count={} bytes={} duration_ms={}",
            notes.len(),
            raw.len(),
            started_at.elapsed().as_millis()
        );
        Ok(notes)
    }

    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()> {
        let started_at = Instant::now();
        let body =
            serde_json::to_string_pretty(&encode_notes(notes)).map_err(PersistenceError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        if let Err(err) = std::fs::write(&self.path, body.as_bytes()) {
            error!(
                "event=file_write module=repo status=error error_code=io_failed error={}",
                err
            );
            return Err(self.io_error(err));
        }

        info!(
            "event=file_write module=repo status=ok count={} bytes={} duration_ms={}",
            notes.len(),
            body.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}
