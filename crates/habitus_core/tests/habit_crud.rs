use habitus_core::db::migrations::latest_version;
use habitus_core::db::open_db_in_memory;
use habitus_core::{HabitRepository, RepoError, SqliteHabitRepository};
use rusqlite::Connection;

fn titles(repo: &SqliteHabitRepository<'_>) -> Vec<String> {
    repo.list_habits()
        .unwrap()
        .into_iter()
        .map(|habit| habit.title)
        .collect()
}

#[test]
fn added_habits_list_in_insertion_order_not_done() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    for title in ["Read", "Run", "Meditate"] {
        repo.add_habit(title).unwrap().unwrap();
    }

    let habits = repo.list_habits().unwrap();
    assert_eq!(titles(&repo), vec!["Read", "Run", "Meditate"]);
    assert!(habits.iter().all(|habit| !habit.done));
    assert!(habits.windows(2).all(|pair| pair[0].id < pair[1].id));
}

#[test]
fn blank_titles_are_ignored() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    assert_eq!(repo.add_habit("").unwrap(), None);
    assert_eq!(repo.add_habit("   \t").unwrap(), None);
    assert!(repo.list_habits().unwrap().is_empty());
}

#[test]
fn add_trims_surrounding_whitespace() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    let id = repo.add_habit("  Read  ").unwrap().unwrap();
    let habit = repo.get_habit(id).unwrap().unwrap();
    assert_eq!(habit.title, "Read");
    assert!(habit.created_at > 0);
}

#[test]
fn toggle_roundtrip_by_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    repo.add_habit("Read").unwrap();
    let before = repo.list_habits().unwrap();
    assert!(before.iter().any(|habit| habit.title == "Read" && !habit.done));

    assert_eq!(repo.toggle_habit("Read", true).unwrap(), 1);
    let after = repo.list_habits().unwrap();
    assert!(after.iter().any(|habit| habit.title == "Read" && habit.done));

    assert_eq!(repo.toggle_habit("Read", false).unwrap(), 1);
    assert!(!repo.list_habits().unwrap()[0].done);
}

#[test]
fn toggle_with_duplicate_titles_marks_all_matches() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    repo.add_habit("Read").unwrap();
    repo.add_habit("Read").unwrap();
    repo.add_habit("Run").unwrap();

    assert_eq!(repo.toggle_habit("Read", true).unwrap(), 2);

    let habits = repo.list_habits().unwrap();
    assert!(habits
        .iter()
        .filter(|habit| habit.title == "Read")
        .all(|habit| habit.done));
    assert!(habits
        .iter()
        .filter(|habit| habit.title == "Run")
        .all(|habit| !habit.done));
}

#[test]
fn toggle_or_delete_unknown_title_is_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    repo.add_habit("Read").unwrap();
    assert_eq!(repo.toggle_habit("Swim", true).unwrap(), 0);
    assert_eq!(repo.delete_habit("Swim").unwrap(), 0);
    assert_eq!(titles(&repo), vec!["Read"]);
}

#[test]
fn delete_by_title_removes_every_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    repo.add_habit("Read").unwrap();
    repo.add_habit("Run").unwrap();
    repo.add_habit("Read").unwrap();

    assert_eq!(repo.delete_habit("Read").unwrap(), 2);
    assert_eq!(titles(&repo), vec!["Run"]);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    let first = repo.add_habit("Read").unwrap().unwrap();
    repo.delete_habit("Read").unwrap();
    let second = repo.add_habit("Read").unwrap().unwrap();
    assert!(second > first);
}

#[test]
fn id_addressed_writes_report_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    let id = repo.add_habit("Read").unwrap().unwrap();
    repo.set_done_by_id(id, true).unwrap();
    assert!(repo.get_habit(id).unwrap().unwrap().done);

    repo.delete_by_id(id).unwrap();
    assert!(repo.get_habit(id).unwrap().is_none());

    assert!(matches!(
        repo.set_done_by_id(id, false),
        Err(RepoError::NotFound(missing)) if missing == id
    ));
    assert!(matches!(
        repo.delete_by_id(id),
        Err(RepoError::NotFound(missing)) if missing == id
    ));
}

#[test]
fn counts_track_done_and_total() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    assert_eq!(repo.habit_counts().unwrap().total, 0);

    for title in ["a", "b", "c", "d"] {
        repo.add_habit(title).unwrap();
    }
    repo.toggle_habit("b", true).unwrap();

    let counts = repo.habit_counts().unwrap();
    assert_eq!(counts.done, 1);
    assert_eq!(counts.total, 4);
}

#[test]
fn list_rejects_invalid_persisted_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteHabitRepository::try_new(&conn).unwrap();

    conn.execute("INSERT INTO habits (title, done) VALUES ('   ', 0);", [])
        .unwrap();

    assert!(matches!(
        repo.list_habits(),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteHabitRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_habits_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteHabitRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("habits"))
    ));
}

#[test]
fn repository_rejects_connection_missing_done_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE habits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT 0
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteHabitRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "habits",
            column: "done"
        })
    ));
}
