//! Note store: CRUD lifecycle with full-rewrite persistence.
//!
//! # Responsibility
//! - Own the in-memory note collection and its title index.
//! - Persist the full collection after every successful mutation.
//!
//! # Invariants
//! - At most one note per title; create and rename reject collisions, and
//!   load keeps only the first note for a repeated title.
//! - Insertion order is display order and survives save/load.
//! - Failed validation never mutates state and never writes.
//! - Lookup misses on delete/edit/details are silent no-ops.
//! - A failed write keeps the in-memory change; there is no rollback.

use crate::config::{LoadPolicy, StoreConfig};
use crate::model::note::{parse_deadline_input, DeadlineFormatError, Note, NoteDetails};
use crate::repo::json_repo::JsonFileNoteRepository;
use crate::repo::{NoteRepository, PersistenceError};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, NoteStoreError>;

/// Error for note store operations.
#[derive(Debug)]
pub enum NoteStoreError {
    /// Deadline input did not match `YYYY-MM-DD HH:MM:SS`.
    InvalidDeadlineFormat { input: String },
    /// Another note already uses this title.
    DuplicateTitle(String),
    /// Loading or saving the backing file failed.
    Persistence(PersistenceError),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDeadlineFormat { input } => write!(
                f,
                "invalid deadline `{input}`; expected format YYYY-MM-DD HH:MM:SS"
            ),
            Self::DuplicateTitle(title) => write!(f, "a note titled `{title}` already exists"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersistenceError> for NoteStoreError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

impl From<DeadlineFormatError> for NoteStoreError {
    fn from(value: DeadlineFormatError) -> Self {
        Self::InvalidDeadlineFormat { input: value.input }
    }
}

/// Ordered note collection synchronized with a repository.
pub struct NoteStore<R: NoteRepository> {
    repo: R,
    notes: Vec<Note>,
    index: HashMap<String, usize>,
}

impl NoteStore<JsonFileNoteRepository> {
    /// Opens the file-backed store described by `config`.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        Self::load_with_policy(
            JsonFileNoteRepository::new(config.path.clone()),
            config.load_policy,
        )
    }
}

impl<R: NoteRepository> NoteStore<R> {
    /// Loads the persisted collection, failing on unreadable data.
    pub fn load(repo: R) -> StoreResult<Self> {
        Self::load_with_policy(repo, LoadPolicy::Strict)
    }

    pub fn load_with_policy(repo: R, policy: LoadPolicy) -> StoreResult<Self> {
        let started_at = Instant::now();
        let (notes, index) = match (repo.load_notes(), policy) {
            (Ok(notes), _) => keep_first_titles(notes),
            (Err(err), LoadPolicy::Lenient) => {
                warn!(
                    "event=store_load module=store status=degraded policy=lenient error={}",
                    err
                );
                (Vec::new(), HashMap::new())
            }
            (Err(err), LoadPolicy::Strict) => {
                warn!(
                    "event=store_load module=store status=error policy=strict error={}",
                    err
                );
                return Err(err.into());
            }
        };

        info!(
            "event=store_load module=store status=ok count={} duration_ms={}",
            notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Self { repo, notes, index })
    }

    /// Creates a note at the end of display order and persists.
    ///
    /// # Errors
    /// - `InvalidDeadlineFormat` when `deadline` is not `YYYY-MM-DD HH:MM:SS`.
    /// - `DuplicateTitle` when `title` is already used.
    /// - `Persistence` when the write fails; the note stays in memory.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: &str,
    ) -> StoreResult<&Note> {
        let title = title.into();
        let deadline = parse_deadline_input(deadline)?;
        if self.index.contains_key(&title) {
            return Err(NoteStoreError::DuplicateTitle(title));
        }

        let position = self.notes.len();
        self.index.insert(title.clone(), position);
        self.notes.push(Note::new(title, description, deadline));
        debug!("event=note_create module=store position={}", position);

        self.persist("note_create")?;
        Ok(&self.notes[position])
    }

    /// Removes the note with `title` and persists.
    ///
    /// Returns `Ok(None)` without writing when no note matches.
    pub fn delete(&mut self, title: &str) -> StoreResult<Option<Note>> {
        let Some(position) = self.index.remove(title) else {
            debug!("event=note_delete module=store status=miss");
            return Ok(None);
        };

        let removed = self.notes.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }

        self.persist("note_delete")?;
        Ok(Some(removed))
    }

    /// Replaces title, description and deadline of the note with `title`.
    ///
    /// All inputs are validated before any field changes. Returns `Ok(None)`
    /// without writing when no note matches.
    pub fn edit(
        &mut self,
        title: &str,
        new_title: impl Into<String>,
        new_description: impl Into<String>,
        new_deadline: &str,
    ) -> StoreResult<Option<&Note>> {
        if !self.index.contains_key(title) {
            debug!("event=note_edit module=store status=miss");
            return Ok(None);
        }

        let deadline = parse_deadline_input(new_deadline)?;
        self.edit_with_deadline(title, new_title, new_description, deadline)
    }

    /// Like [`NoteStore::edit`] with an already-parsed deadline, so an
    /// unchanged deadline keeps its full precision.
    pub fn edit_with_deadline(
        &mut self,
        title: &str,
        new_title: impl Into<String>,
        new_description: impl Into<String>,
        deadline: NaiveDateTime,
    ) -> StoreResult<Option<&Note>> {
        let Some(&position) = self.index.get(title) else {
            debug!("event=note_edit module=store status=miss");
            return Ok(None);
        };

        let new_title = new_title.into();
        if new_title != title && self.index.contains_key(&new_title) {
            return Err(NoteStoreError::DuplicateTitle(new_title));
        }

        if new_title != title {
            self.index.remove(title);
            self.index.insert(new_title.clone(), position);
        }
        self.notes[position].apply_edit(new_title, new_description.into(), deadline);

        self.persist("note_edit")?;
        Ok(Some(&self.notes[position]))
    }

    /// Snapshot for the detail view, or `None` when no note matches.
    pub fn details(&self, title: &str) -> Option<NoteDetails> {
        self.get(title).map(Note::details)
    }

    pub fn get(&self, title: &str) -> Option<&Note> {
        self.index.get(title).map(|&position| &self.notes[position])
    }

    /// Display handles in insertion order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.notes.iter().map(Note::title)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn persist(&mut self, event: &str) -> StoreResult<()> {
        match self.repo.save_notes(&self.notes) {
            Ok(()) => {
                info!(
                    "event={} module=store status=ok count={}",
                    event,
                    self.notes.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event={} module=store status=error error_code=persist_failed error={}",
                    event, err
                );
                Err(err.into())
            }
        }
    }
}

/// Indexes loaded notes, keeping the first note for each title.
///
/// Later notes sharing a title are unreachable by title lookup, so they are
/// dropped with a warning rather than failing the whole load.
fn keep_first_titles(loaded: Vec<Note>) -> (Vec<Note>, HashMap<String, usize>) {
    let mut notes = Vec::with_capacity(loaded.len());
    let mut index = HashMap::with_capacity(loaded.len());
    let mut dropped = Vec::new();

    for (position, note) in loaded.into_iter().enumerate() {
        if index.contains_key(note.title()) {
            dropped.push(position);
            continue;
        }
        index.insert(note.title().to_string(), notes.len());
        notes.push(note);
    }

    if !dropped.is_empty() {
        warn!(
            "event=store_load module=store status=degraded duplicates={} positions={:?}",
            dropped.len(),
            dropped
        );
    }
    (notes, index)
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, NoteStoreError};
    use crate::repo::memory_repo::MemoryNoteRepository;

    fn empty_store() -> NoteStore<MemoryNoteRepository> {
        NoteStore::load(MemoryNoteRepository::new()).expect("empty repository loads")
    }

    #[test]
    fn index_tracks_positions_after_delete() {
        let mut store = empty_store();
        for title in ["a", "b", "c", "d"] {
            store
                .create(title, "", "2030-01-01 00:00:00")
                .expect("create");
        }

        store.delete("b").expect("delete");
        assert_eq!(store.notes().len(), 3);
        assert_eq!(store.notes()[1].title(), "c");
        assert_eq!(store.get("c").map(|n| n.title()), Some("c"));
        assert_eq!(store.get("d").map(|n| n.title()), Some("d"));
        assert!(store.get("b").is_none());
        assert_eq!(store.titles().collect::<Vec<_>>(), vec!["a", "c", "d"]);
    }

    #[test]
    fn rename_moves_index_entry() {
        let mut store = empty_store();
        store.create("old", "", "2030-01-01 00:00:00").expect("create");

        store
            .edit("old", "new", "", "2030-01-01 00:00:00")
            .expect("edit")
            .expect("note exists");
        assert!(store.get("old").is_none());
        assert!(store.get("new").is_some());

        store.create("old", "", "2030-01-01 00:00:00").expect("old title is free");
        assert_eq!(store.titles().collect::<Vec<_>>(), vec!["new", "old"]);
    }

    #[test]
    fn edit_keeping_title_is_not_a_collision() {
        let mut store = empty_store();
        store.create("same", "v1", "2030-01-01 00:00:00").expect("create");

        let edited = store
            .edit("same", "same", "v2", "2031-01-01 00:00:00")
            .expect("edit")
            .expect("note exists");
        assert_eq!(edited.description(), "v2");
    }

    #[test]
    fn errors_render_user_facing_messages() {
        let err = NoteStoreError::InvalidDeadlineFormat {
            input: "x".to_string(),
        };
        assert!(err.to_string().contains("YYYY-MM-DD HH:MM:SS"));
        assert!(NoteStoreError::DuplicateTitle("t".to_string())
            .to_string()
            .contains("`t`"));
    }
}
