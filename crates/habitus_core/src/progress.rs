//! Completion progress over the current habit set.
//!
//! # Invariants
//! - `ratio()` is always within `[0, 1]`.
//! - An empty habit set reports `0` / `"0%"`.

use crate::model::habit::Habit;
use serde::{Deserialize, Serialize};

/// Done/total tallies as reported by a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HabitCounts {
    pub done: u64,
    pub total: u64,
}

/// Done/total tally with derived ratio and display label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub done: u64,
    pub total: u64,
}

impl Progress {
    /// Tallies an in-memory habit sequence.
    pub fn from_habits(habits: &[Habit]) -> Self {
        let done = habits.iter().filter(|habit| habit.done).count() as u64;
        Self {
            done,
            total: habits.len() as u64,
        }
    }

    /// Builds progress from SQL counts. `done` is clamped to `total`.
    pub fn from_counts(done: u64, total: u64) -> Self {
        Self {
            done: done.min(total),
            total,
        }
    }

    /// Fraction of habits marked done; `0.0` when there are none.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.done as f64 / self.total as f64
    }

    /// Ratio as a whole percentage, rounded to nearest with ties to even.
    pub fn percent(&self) -> u8 {
        (self.ratio() * 100.0).round_ties_even() as u8
    }

    /// Display string such as `"25%"`.
    pub fn label(&self) -> String {
        format!("{}%", self.percent())
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}

impl From<HabitCounts> for Progress {
    fn from(counts: HabitCounts) -> Self {
        Self::from_counts(counts.done, counts.total)
    }
}

#[cfg(test)]
mod tests {
    use super::Progress;
    use crate::model::habit::Habit;

    fn habits(flags: &[bool]) -> Vec<Habit> {
        flags
            .iter()
            .enumerate()
            .map(|(index, done)| Habit {
                id: index as i64 + 1,
                title: format!("habit-{index}"),
                done: *done,
                created_at: 0,
            })
            .collect()
    }

    #[test]
    fn empty_set_is_zero() {
        let progress = Progress::from_habits(&[]);
        assert_eq!(progress.ratio(), 0.0);
        assert_eq!(progress.label(), "0%");
        assert!(!progress.is_complete());
    }

    #[test]
    fn one_of_four_is_quarter() {
        let progress = Progress::from_habits(&habits(&[true, false, false, false]));
        assert_eq!(progress.ratio(), 0.25);
        assert_eq!(progress.label(), "25%");
    }

    #[test]
    fn thirds_round_to_nearest_percent() {
        assert_eq!(Progress::from_counts(1, 3).label(), "33%");
        assert_eq!(Progress::from_counts(2, 3).label(), "67%");
    }

    #[test]
    fn half_percent_ties_round_to_even() {
        let labels: Vec<String> = [1, 3, 5, 7]
            .into_iter()
            .map(|done| Progress::from_counts(done, 8).label())
            .collect();
        assert_eq!(labels, ["12%", "38%", "62%", "88%"]);
    }

    #[test]
    fn all_done_is_complete() {
        let progress = Progress::from_habits(&habits(&[true, true]));
        assert_eq!(progress.label(), "100%");
        assert!(progress.is_complete());
    }

    #[test]
    fn from_counts_clamps_done_to_total() {
        assert_eq!(Progress::from_counts(5, 2).ratio(), 1.0);
    }
}
