//! Discrete user intents delivered by a UI collaborator.

use serde::{Deserialize, Serialize};

/// One user action. Every intent is followed by a board refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum HabitIntent {
    /// Text submission from the "new habit" field.
    Add { title: String },
    /// Checkbox change on a habit row. Addressed by title.
    Toggle { title: String, done: bool },
    /// Delete button on a habit row. Addressed by title.
    Delete { title: String },
    /// Re-render without mutation (startup, manual reload).
    Refresh,
}

impl HabitIntent {
    /// Stable event name used in log lines.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "habit_add",
            Self::Toggle { .. } => "habit_toggle",
            Self::Delete { .. } => "habit_delete",
            Self::Refresh => "board_refresh",
        }
    }
}
