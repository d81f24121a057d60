//! Habit domain model.
//!
//! # Responsibility
//! - Define the persisted habit record and its validation rules.
//! - Provide the title normalization used by every write path.
//!
//! # Invariants
//! - `id` is assigned by SQLite `AUTOINCREMENT` and never reused.
//! - `title` is non-empty after trimming.
//! - Only `done` changes after creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned habit identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type HabitId = i64;

/// Validation failures for habit records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Id is zero or negative; SQLite rowids start at 1.
    InvalidId(HabitId),
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "habit title must not be empty"),
            Self::InvalidId(id) => write!(f, "habit id must be positive, got {id}"),
        }
    }
}

impl Error for HabitValidationError {}

/// Canonical habit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Store-assigned identity.
    pub id: HabitId,
    /// Human-facing label. Also the lookup key for title-addressed intents.
    pub title: String,
    /// Whether the habit is marked done.
    pub done: bool,
    /// Unix epoch milliseconds at insertion. Not read by any feature.
    pub created_at: i64,
}

impl Habit {
    /// Validates record invariants.
    ///
    /// # Errors
    /// - `InvalidId` when `id <= 0`.
    /// - `EmptyTitle` when the trimmed title is empty.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.id <= 0 {
            return Err(HabitValidationError::InvalidId(self.id));
        }
        normalize_title(&self.title).ok_or(HabitValidationError::EmptyTitle)?;
        Ok(())
    }
}

/// Trims a user-supplied title.
///
/// Returns `None` for empty or whitespace-only input.
pub fn normalize_title(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
