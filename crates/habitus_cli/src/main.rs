//! Terminal front end for Habitus.
//!
//! # Responsibility
//! - Read one intent per stdin line and print the refreshed board.
//! - Treat an unreachable database as fatal at startup.

use habitus_core::db::open_db;
use habitus_core::{
    init_logging, HabitBoard, HabitIntent, HabitService, HabitusConfig, SqliteHabitRepository,
};
use log::error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

const HELP: &str = "commands: add <title> | done <title> | undo <title> | rm <title> | list | quit";
const BAR_WIDTH: usize = 20;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Intent(HabitIntent),
    Help,
    Quit,
}

fn main() -> ExitCode {
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());
    let config = HabitusConfig::from_env(&cwd);

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!(
                "cannot open habit database `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };
    let repo = match SqliteHabitRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("habit database is not usable: {err}");
            return ExitCode::FAILURE;
        }
    };
    let service = HabitService::new(repo);

    match run(&service, io::stdin().lock(), &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_loop module=cli status=error error={err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    service: &HabitService<SqliteHabitRepository<'_>>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(out, "{HELP}")?;
    write_board(out, &service.dispatch(&HabitIntent::Refresh)?)?;

    for line in input.lines() {
        match parse_command(&line?) {
            Some(Command::Intent(intent)) => write_board(out, &service.dispatch(&intent)?)?,
            Some(Command::Help) => writeln!(out, "{HELP}")?,
            Some(Command::Quit) => break,
            None => {}
        }
    }
    Ok(())
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let title = rest.trim().to_string();

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" => Command::Intent(HabitIntent::Add { title }),
        "done" => Command::Intent(HabitIntent::Toggle { title, done: true }),
        "undo" => Command::Intent(HabitIntent::Toggle { title, done: false }),
        "rm" | "delete" => Command::Intent(HabitIntent::Delete { title }),
        "list" => Command::Intent(HabitIntent::Refresh),
        "quit" | "exit" => Command::Quit,
        _ => Command::Help,
    };
    Some(command)
}

fn write_board(out: &mut impl Write, board: &HabitBoard) -> io::Result<()> {
    let filled = (board.progress_ratio * BAR_WIDTH as f64).round() as usize;
    writeln!(
        out,
        "[{}{}] {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        board.progress_label
    )?;
    for habit in &board.habits {
        let mark = if habit.done { 'x' } else { ' ' };
        writeln!(out, "  [{mark}] {}", habit.title)?;
    }
    if board.progress.is_complete() {
        writeln!(out, "all habits done")?;
    }
    Ok(())
}
