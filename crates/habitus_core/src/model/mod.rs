//! Domain model for habit tracking.
//!
//! # Responsibility
//! - Define the canonical habit record shared by store, aggregator and UI.
//! - Define the intents a UI collaborator can deliver to core.
//!
//! # Invariants
//! - Every persisted habit is identified by a store-assigned `HabitId`.
//! - Titles are trimmed and non-empty before they reach storage.

pub mod habit;
pub mod intent;
