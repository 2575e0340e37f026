//! Core domain logic for Notekeeper.
//! This crate is the single source of truth for note identity and persistence.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{LoadPolicy, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{
    format_remaining, parse_deadline_input, DeadlineFormatError, Note, NoteDetails,
};
pub use repo::json_repo::JsonFileNoteRepository;
pub use repo::memory_repo::MemoryNoteRepository;
pub use repo::record::NoteRecord;
pub use repo::{NoteRepository, PersistenceError, RepoResult};
pub use service::note_store::{NoteStore, NoteStoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
