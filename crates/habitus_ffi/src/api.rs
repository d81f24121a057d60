//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Turn UI events into core `HabitIntent`s and hand back a fresh board.
//! - Keep error semantics simple: every call returns an envelope.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every envelope carries a board; failures carry an empty one.

use habitus_core::db::open_db;
use habitus_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    HabitBoard, HabitIntent, HabitService, HabitusConfig, SqliteHabitRepository,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One habit row as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitItem {
    /// Store-assigned id.
    pub id: i64,
    pub title: String,
    /// Checkbox state.
    pub done: bool,
}

/// Board envelope returned by every habit call.
#[derive(Debug, Clone, PartialEq)]
pub struct HabitBoardResponse {
    /// Whether the intent and the refresh both succeeded.
    pub ok: bool,
    /// Rows in insertion order.
    pub items: Vec<HabitItem>,
    /// Progress-bar value in `[0, 1]`.
    pub progress: f64,
    /// Display percentage such as `25%`.
    pub progress_label: String,
    /// Empty on success; diagnostic text on failure.
    pub message: String,
}

impl HabitBoardResponse {
    fn success(board: HabitBoard) -> Self {
        Self {
            ok: true,
            items: board
                .habits
                .into_iter()
                .map(|habit| HabitItem {
                    id: habit.id,
                    title: habit.title,
                    done: habit.done,
                })
                .collect(),
            progress: board.progress_ratio,
            progress_label: board.progress_label,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            items: Vec::new(),
            progress: 0.0,
            progress_label: "0%".to_string(),
            message: message.into(),
        }
    }
}

/// Loads the current board (startup and manual refresh).
#[flutter_rust_bridge::frb(sync)]
pub fn habits_board() -> HabitBoardResponse {
    run_intent(HabitIntent::Refresh)
}

/// Adds a habit from the text field. Blank input returns the unchanged board.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_add(title: String) -> HabitBoardResponse {
    run_intent(HabitIntent::Add { title })
}

/// Applies a checkbox change to every habit with this title.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_toggle(title: String, done: bool) -> HabitBoardResponse {
    run_intent(HabitIntent::Toggle { title, done })
}

/// Deletes every habit with this title.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_delete(title: String) -> HabitBoardResponse {
    run_intent(HabitIntent::Delete { title })
}

fn run_intent(intent: HabitIntent) -> HabitBoardResponse {
    let event = intent.event_name();
    match with_habit_service(|service| service.dispatch(&intent)) {
        Ok(board) => HabitBoardResponse::success(board),
        Err(err) => {
            warn!("event={event} module=ffi status=error error={err}");
            HabitBoardResponse::failure(format!("{event} failed: {err}"))
        }
    }
}

fn resolve_board_db_path() -> PathBuf {
    BOARD_DB_PATH
        .get_or_init(|| HabitusConfig::from_env(&std::env::temp_dir()).db_path)
        .clone()
}

fn with_habit_service<T>(
    f: impl FnOnce(&HabitService<SqliteHabitRepository<'_>>) -> habitus_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_board_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("habit DB open failed: {err}"))?;
    let repo = SqliteHabitRepository::try_new(&conn)
        .map_err(|err| format!("habit repo init failed: {err}"))?;
    let service = HabitService::new(repo);
    f(&service).map_err(|err| err.to_string())
}
