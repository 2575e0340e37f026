//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep CLI/UI adapters decoupled from storage details.

pub mod note_store;
