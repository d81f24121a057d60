//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the habit store contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Title-addressed writes touch every matching row.
//! - Id-addressed writes return `NotFound` when nothing matched.

pub mod habit_repo;
