//! Habit repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `habits` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Empty or whitespace-only titles are never inserted.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Toggle/delete by title apply to all rows sharing that title.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::habit::{normalize_title, Habit, HabitId, HabitValidationError};
use crate::progress::HabitCounts;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const HABIT_SELECT_SQL: &str = "SELECT
    id,
    title,
    done,
    created_at
FROM habits";

const REQUIRED_COLUMNS: &[&str] = &["id", "title", "done", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for habit persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(HabitValidationError),
    Db(DbError),
    NotFound(HabitId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "habit not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted habit data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind required {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HabitValidationError> for RepoError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Habit store contract.
pub trait HabitRepository {
    /// Returns all habits in insertion order.
    fn list_habits(&self) -> RepoResult<Vec<Habit>>;
    /// Inserts a habit with `done = false`.
    ///
    /// Returns `Ok(None)` without touching storage when the title is blank.
    fn add_habit(&self, title: &str) -> RepoResult<Option<HabitId>>;
    /// Sets `done` on every habit whose title matches. Returns rows changed.
    fn toggle_habit(&self, title: &str, done: bool) -> RepoResult<usize>;
    /// Deletes every habit whose title matches. Returns rows removed.
    fn delete_habit(&self, title: &str) -> RepoResult<usize>;
    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>>;
    fn set_done_by_id(&self, id: HabitId, done: bool) -> RepoResult<()>;
    fn delete_by_id(&self, id: HabitId) -> RepoResult<()>;
    fn habit_counts(&self) -> RepoResult<HabitCounts>;
}

/// SQLite-backed habit repository borrowing the process connection.
pub struct SqliteHabitRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHabitRepository<'conn> {
    /// Wraps a connection after checking it carries the habit schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for foreign schemas.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version < expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let columns = table_columns(conn, "habits")?;
        if columns.is_empty() {
            return Err(RepoError::MissingRequiredTable("habits"));
        }
        if let Some(&column) = REQUIRED_COLUMNS
            .iter()
            .find(|required| !columns.iter().any(|column| column.as_str() == **required))
        {
            return Err(RepoError::MissingRequiredColumn {
                table: "habits",
                column,
            });
        }

        Ok(Self { conn })
    }
}

impl HabitRepository for SqliteHabitRepository<'_> {
    fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HABIT_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut habits = Vec::new();

        while let Some(row) = rows.next()? {
            habits.push(parse_habit_row(row)?);
        }

        Ok(habits)
    }

    fn add_habit(&self, title: &str) -> RepoResult<Option<HabitId>> {
        let Some(title) = normalize_title(title) else {
            return Ok(None);
        };

        self.conn.execute(
            "INSERT INTO habits (title, done) VALUES (?1, 0);",
            [title],
        )?;

        Ok(Some(self.conn.last_insert_rowid()))
    }

    fn toggle_habit(&self, title: &str, done: bool) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "UPDATE habits SET done = ?1 WHERE title = ?2;",
            params![bool_to_int(done), title.trim()],
        )?;
        Ok(changed)
    }

    fn delete_habit(&self, title: &str) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM habits WHERE title = ?1;", [title.trim()])?;
        Ok(removed)
    }

    fn get_habit(&self, id: HabitId) -> RepoResult<Option<Habit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HABIT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_habit_row(row)?));
        }

        Ok(None)
    }

    fn set_done_by_id(&self, id: HabitId, done: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE habits SET done = ?1 WHERE id = ?2;",
            params![bool_to_int(done), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_by_id(&self, id: HabitId) -> RepoResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM habits WHERE id = ?1;", [id])?;

        if removed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn habit_counts(&self) -> RepoResult<HabitCounts> {
        let done: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM habits WHERE done = 1;",
            [],
            |row| row.get(0),
        )?;
        let total: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM habits;", [], |row| row.get(0))?;

        Ok(HabitCounts {
            done: count_to_u64(done)?,
            total: count_to_u64(total)?,
        })
    }
}

fn parse_habit_row(row: &Row<'_>) -> RepoResult<Habit> {
    let done = match row.get::<_, i64>("done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid done value `{other}` in habits.done"
            )));
        }
    };

    let habit = Habit {
        id: row.get("id")?,
        title: row.get("title")?,
        done,
        created_at: row.get("created_at")?,
    };
    habit
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("habit {}: {err}", habit.id)))?;
    Ok(habit)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let exists = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    if exists.is_none() {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

fn count_to_u64(value: i64) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative row count `{value}`")))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
