mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::info;

use cli::{Cli, Command};
use taskday::logging::{self, LogTarget};
use taskday::paths::{self, Locations};
use taskday::{output, tui, validate, StreakTracker, TaskStore};

fn resolve_today(cli_today: Option<&str>) -> Result<NaiveDate> {
    match cli_today {
        Some(s) => Ok(validate::parse_due_date(s)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn open_store(db_path: &Path) -> Result<TaskStore> {
    paths::ensure_parent_dir(db_path)?;
    TaskStore::open(db_path)
        .with_context(|| format!("failed to open task database {}", db_path.display()))
}

fn open_tracker(streak_path: PathBuf) -> Result<StreakTracker> {
    paths::ensure_parent_dir(&streak_path)?;
    Ok(StreakTracker::new(streak_path))
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

/// Explicit `--log-file` wins. The page owns the terminal, so it logs to
/// `page_log` when one is available and nowhere otherwise.
fn log_target<'a>(
    log_file: Option<&'a Path>,
    command: &Command,
    page_log: Option<&'a Path>,
) -> LogTarget<'a> {
    match (log_file, command) {
        (Some(path), _) => LogTarget::File(path),
        (None, Command::Page { .. }) => page_log.map_or(LogTarget::Off, LogTarget::File),
        (None, _) => LogTarget::Stderr,
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let locations = Locations {
        db: cli.db.map(PathBuf::from),
        streak_file: cli.streak_file.map(PathBuf::from),
        home: paths::home_dir(),
    };

    let page_log = match (&cli.log_file, &cli.command) {
        (None, Command::Page { .. }) => locations
            .page_log_path()
            .filter(|path| paths::ensure_parent_dir(path).is_ok()),
        _ => None,
    };
    logging::init(log_target(
        cli.log_file.as_deref().map(Path::new),
        &cli.command,
        page_log.as_deref(),
    ))?;

    let today = resolve_today(cli.today.as_deref())?;
    dispatch(cli.command, &locations, today)
}

fn dispatch(command: Command, locations: &Locations, today: NaiveDate) -> Result<()> {
    match command {
        Command::Add {
            name,
            desc,
            due,
            json,
        } => {
            validate::validate_task(&name, &desc)?;
            let due = match due {
                Some(d) => validate::parse_due_date(&d)?,
                None => today,
            };
            let store = open_store(&locations.db_path()?)?;
            let id = store.create(&name, &desc, due)?;
            if json {
                if let Some(task) = store.get(id)? {
                    println!("{}", serde_json::to_string_pretty(&task)?);
                }
            } else {
                println!("{id}");
            }
            eprintln!("Added task '{name}' (due {due})");
        }

        Command::Edit {
            id,
            name,
            desc,
            due,
        } => {
            let store = open_store(&locations.db_path()?)?;
            let Some(task) = store.get(id)? else {
                eprintln!("No task with id {id}; nothing changed");
                return Ok(());
            };
            let name = name.unwrap_or(task.name);
            let desc = desc.unwrap_or(task.description);
            let due = match due {
                Some(d) => validate::parse_due_date(&d)?,
                None => task.due_date,
            };
            validate::validate_task(&name, &desc)?;
            if store.update(id, &name, &desc, due)? {
                eprintln!("Updated task {id}");
            } else {
                eprintln!("No task with id {id}; nothing changed");
            }
        }

        Command::Rm { id } => {
            let store = open_store(&locations.db_path()?)?;
            if store.delete(id)? {
                eprintln!("Deleted task {id}");
            } else {
                eprintln!("No task with id {id}; nothing changed");
            }
        }

        Command::Done { id } => {
            let store = open_store(&locations.db_path()?)?;
            if store.set_completed(id, true)? {
                eprintln!("Marked task {id} as done");
            } else {
                eprintln!("No task with id {id}; nothing changed");
            }
        }

        Command::Reopen { id } => {
            let store = open_store(&locations.db_path()?)?;
            if store.set_completed(id, false)? {
                eprintln!("Reopened task {id}");
            } else {
                eprintln!("No task with id {id}; nothing changed");
            }
        }

        Command::Show { id, json } => {
            let store = open_store(&locations.db_path()?)?;
            let task = store
                .get(id)?
                .with_context(|| format!("task {id} not found"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                print!("{}", output::format_task_detail(&task));
            }
        }

        Command::List { json } => {
            let store = open_store(&locations.db_path()?)?;
            let tasks = store.list_all()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print!("{}", output::format_task_list(&tasks));
            }
        }

        Command::Due { json } => {
            let store = open_store(&locations.db_path()?)?;
            let due_soon = store.due_soon(today)?;
            let expired = store.expired(today)?;
            if json {
                let reminders = output::Reminders {
                    due_soon: &due_soon,
                    expired: &expired,
                };
                println!("{}", serde_json::to_string_pretty(&reminders)?);
            } else {
                print!("{}", output::format_reminders(&due_soon, &expired));
            }
        }

        Command::Streak { peek, json } => {
            let tracker = open_tracker(locations.streak_path()?)?;
            let streak = if peek {
                tracker.load().map(|r| r.streak_count).unwrap_or(0)
            } else {
                tracker.record_visit(today)?
            };
            if json {
                let report = output::StreakReport { streak, today };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", output::format_streak(streak));
            }
        }

        Command::Page { poll_interval } => {
            let db_path = locations.db_path()?;
            let store = open_store(&db_path)?;
            let tracker = open_tracker(locations.streak_path()?)?;
            let streak = tracker.record_visit(today)?;
            info!("page opened on {today} (streak {streak})");
            tui::run(&db_path, &store, today, streak, poll_interval)?;
        }
    }

    Ok(())
}
