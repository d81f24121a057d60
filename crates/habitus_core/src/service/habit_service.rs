//! Habit use-case service and board snapshot.
//!
//! # Responsibility
//! - Apply one UI intent against the store, then rebuild the board.
//! - Emit metadata-only log events per operation.
//!
//! # Invariants
//! - Titles never appear in log output.
//! - Board progress is computed from the same habit list it renders.

use crate::model::habit::{Habit, HabitId};
use crate::model::intent::HabitIntent;
use crate::progress::Progress;
use crate::repo::habit_repo::{HabitRepository, RepoResult};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

/// One rendered habit row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitView {
    pub id: HabitId,
    pub title: String,
    pub done: bool,
}

impl From<Habit> for HabitView {
    fn from(habit: Habit) -> Self {
        Self {
            id: habit.id,
            title: habit.title,
            done: habit.done,
        }
    }
}

/// Everything a UI needs to re-render after an intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitBoard {
    /// Rows in insertion order.
    pub habits: Vec<HabitView>,
    pub progress: Progress,
    /// `progress.ratio()`, for progress-bar widgets.
    pub progress_ratio: f64,
    /// `progress.label()`, e.g. `"25%"`.
    pub progress_label: String,
}

impl HabitBoard {
    fn from_habits(habits: Vec<Habit>) -> Self {
        let progress = Progress::from_habits(&habits);
        Self {
            habits: habits.into_iter().map(HabitView::from).collect(),
            progress,
            progress_ratio: progress.ratio(),
            progress_label: progress.label(),
        }
    }
}

/// Use-case service wrapper over a habit repository.
pub struct HabitService<R: HabitRepository> {
    repo: R,
}

impl<R: HabitRepository> HabitService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        self.repo.list_habits()
    }

    /// Adds a habit. Blank titles are ignored and yield `Ok(None)`.
    pub fn add_habit(&self, title: &str) -> RepoResult<Option<HabitId>> {
        let created = self.repo.add_habit(title)?;
        match created {
            Some(id) => info!("event=habit_add module=service status=ok habit_id={id}"),
            None => debug!("event=habit_add module=service status=skipped reason=blank_title"),
        }
        Ok(created)
    }

    /// Sets `done` on every habit titled `title`. Returns rows changed.
    pub fn toggle_habit(&self, title: &str, done: bool) -> RepoResult<usize> {
        let changed = self.repo.toggle_habit(title, done)?;
        info!("event=habit_toggle module=service status=ok done={done} matched={changed}");
        Ok(changed)
    }

    /// Deletes every habit titled `title`. Returns rows removed.
    pub fn delete_habit(&self, title: &str) -> RepoResult<usize> {
        let removed = self.repo.delete_habit(title)?;
        info!("event=habit_delete module=service status=ok matched={removed}");
        Ok(removed)
    }

    /// Computes progress from store-side counts.
    pub fn compute_progress(&self) -> RepoResult<Progress> {
        Ok(self.repo.habit_counts()?.into())
    }

    /// Builds a fresh board snapshot.
    pub fn board(&self) -> RepoResult<HabitBoard> {
        Ok(HabitBoard::from_habits(self.repo.list_habits()?))
    }

    /// Applies one intent and returns the refreshed board.
    ///
    /// # Errors
    /// Storage failures from either the mutation or the refresh.
    pub fn dispatch(&self, intent: &HabitIntent) -> RepoResult<HabitBoard> {
        let applied = match intent {
            HabitIntent::Add { title } => self.add_habit(title).map(|_| ()),
            HabitIntent::Toggle { title, done } => self.toggle_habit(title, *done).map(|_| ()),
            HabitIntent::Delete { title } => self.delete_habit(title).map(|_| ()),
            HabitIntent::Refresh => Ok(()),
        };
        if let Err(err) = applied {
            error!(
                "event={} module=service status=error error={}",
                intent.event_name(),
                err
            );
            return Err(err);
        }

        let board = self.board()?;
        debug!(
            "event=board_refresh module=service status=ok habits={} done={}",
            board.progress.total, board.progress.done
        );
        Ok(board)
    }
}
