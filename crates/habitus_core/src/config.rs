//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve database path and logging settings for front ends.
//!
//! # Invariants
//! - Values are trimmed; blank values fall back to defaults.
//! - Resolution never fails; validation of log settings happens in
//!   `init_logging`.

use crate::logging::default_log_level;
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "HABITUS_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "HABITUS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "HABITUS_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "habitus.db";

/// Resolved settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitusConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays disabled when `None`.
    pub log_dir: Option<String>,
}

impl HabitusConfig {
    /// Reads settings from the process environment.
    ///
    /// `default_db_dir` hosts `habitus.db` when `HABITUS_DB_PATH` is unset.
    pub fn from_env(default_db_dir: &Path) -> Self {
        Self::from_lookup(default_db_dir, |key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary key lookup.
    pub fn from_lookup(default_db_dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = non_blank(lookup(DB_PATH_ENV))
            .map(PathBuf::from)
            .unwrap_or_else(|| default_db_dir.join(DEFAULT_DB_FILE_NAME));
        let log_level =
            non_blank(lookup(LOG_LEVEL_ENV)).unwrap_or_else(|| default_log_level().to_string());
        let log_dir = non_blank(lookup(LOG_DIR_ENV));

        Self {
            db_path,
            log_level,
            log_dir,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
