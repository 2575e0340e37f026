//! In-memory note repository.
//!
//! Stores the encoded wire records so load/save exercise the same
//! conversion path as the file repository. Used by tests and adapters that
//! need a store without touching disk.

use crate::model::note::Note;
use crate::repo::record::{decode_records, encode_notes, NoteRecord};
use crate::repo::{NoteRepository, PersistenceError, RepoResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryNoteRepository {
    records: Vec<NoteRecord>,
    save_count: usize,
    reject_saves: bool,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with already-encoded records.
    pub fn with_records(records: Vec<NoteRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Makes every subsequent save fail with `WriteRejected`.
    pub fn reject_saves(&mut self, reject: bool) {
        self.reject_saves = reject;
    }

    pub fn records(&self) -> &[NoteRecord] {
        &self.records
    }

    /// Number of successful saves since construction.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl NoteRepository for MemoryNoteRepository {
    fn load_notes(&self) -> RepoResult<Vec<Note>> {
        decode_records(self.records.clone())
    }

    fn save_notes(&mut self, notes: &[Note]) -> RepoResult<()> {
        if self.reject_saves {
            return Err(PersistenceError::WriteRejected(
                "memory repository is read-only".to_string(),
            ));
        }
        self.records = encode_notes(notes);
        self.save_count += 1;
        Ok(())
    }
}
