//! Note domain model.
//!
//! # Responsibility
//! - Define the in-memory note record owned by the store.
//! - Own deadline parsing/formatting rules shared by store and adapters.
//!
//! # Invariants
//! - `created_at` is assigned once at construction and never mutated.
//! - Remaining time is derived on demand and may be negative.

pub mod note;
