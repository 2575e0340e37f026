//! Wire record for the persisted note file.
//!
//! Exactly three fields are stored. `created_at` is not part of the file,
//! so decoded notes are stamped with the load time.

use crate::model::note::Note;
use crate::repo::{PersistenceError, RepoResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// ISO 8601 local date-time; fractional seconds are written only when set.
pub const DEADLINE_WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoteRecord {
    pub title: String,
    pub description: String,
    /// e.g. `2024-03-15T17:30:00`
    pub deadline: String,
}

impl NoteRecord {
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title().to_string(),
            description: note.description().to_string(),
            deadline: note.deadline().format(DEADLINE_WIRE_FORMAT).to_string(),
        }
    }

    /// Decodes the record at position `index` into a fresh note.
    pub fn into_note(self, index: usize) -> RepoResult<Note> {
        let deadline = NaiveDateTime::parse_from_str(&self.deadline, DEADLINE_WIRE_FORMAT)
            .map_err(|err| PersistenceError::InvalidRecord {
                index,
                message: format!("deadline `{}` is not ISO 8601: {err}", self.deadline),
            })?;
        Ok(Note::new(self.title, self.description, deadline))
    }
}

/// Decodes records in order, failing on the first invalid one.
pub fn decode_records(records: Vec<NoteRecord>) -> RepoResult<Vec<Note>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_note(index))
        .collect()
}

pub fn encode_notes(notes: &[Note]) -> Vec<NoteRecord> {
    notes.iter().map(NoteRecord::from_note).collect()
}
