//! Command-line shell over `focus_core`.
//!
//! # Responsibility
//! - Wire config, logging, the SQLite-backed store and the viewer clock.
//! - Render the grouped task list as plain text.

use anyhow::{anyhow, bail, Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use focus_core::db::open_db;
use focus_core::{
    due_badge, init_logging, load_home_page, quick_add, save_home_page, Clock, CoreConfig,
    HomePage, KeyValueStore, SqliteKeyValueStore, SystemClock, TaskId, TaskListView, TaskStore,
    ZonedClock,
};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "focus", version, about = "Quick tasks for students")]
struct Cli {
    /// Directory holding the database and logs.
    #[arg(long, env = "FOCUS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "FOCUS_LOG_LEVEL")]
    log_level: Option<String>,

    /// IANA zone used for "today", e.g. Europe/Berlin. Defaults to the system zone.
    #[arg(long, env = "FOCUS_TZ")]
    timezone: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a task; "today" or "tomorrow" in the text sets the due date.
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Show tasks grouped by due date.
    List,
    /// Mark a task done, or open again.
    Toggle { id: String },
    /// Delete a task.
    Delete { id: String },
    /// Delete every completed task.
    ClearCompleted,
    /// Show or change the landing page.
    Home {
        #[command(subcommand)]
        action: Option<HomeAction>,
    },
}

#[derive(Debug, Subcommand)]
enum HomeAction {
    Get,
    /// One of: calendar, assignments, notebook, recap, settings.
    Set { page: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    let clock = resolve_clock(cli.timezone.as_deref())?;

    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("cannot create {}", config.data_dir.display()))?;
    init_logging(&config.log_level, config.log_dir())?;
    info!("event=cli_start module=cli status=ok");

    let conn = open_db(config.db_path())?;
    let storage = SqliteKeyValueStore::new(&conn);

    let store = TaskStore::open(&storage, config.tasks_key.as_str());

    let command = match cli.command {
        Command::Home { action } => return run_home(&storage, action),
        Command::Add { text } => TaskCommand::Add(text.join(" ")),
        Command::List => TaskCommand::List,
        Command::Toggle { id } => TaskCommand::Toggle(id),
        Command::Delete { id } => TaskCommand::Delete(id),
        Command::ClearCompleted => TaskCommand::ClearCompleted,
    };
    run_tasks(
        store,
        clock.as_ref(),
        command,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
}

enum TaskCommand {
    Add(String),
    List,
    Toggle(String),
    Delete(String),
    ClearCompleted,
}

fn resolve_config(cli: &Cli) -> Result<CoreConfig> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => dirs::data_dir()
            .context("no platform data directory; pass --data-dir")?
            .join("focus"),
    };
    let mut config = CoreConfig::new(data_dir);
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;
    Ok(config)
}

fn resolve_clock(timezone: Option<&str>) -> Result<Box<dyn Clock>> {
    let Some(name) = timezone else {
        return Ok(Box::new(SystemClock));
    };
    let zone: Tz = name
        .trim()
        .parse()
        .map_err(|_| anyhow!("unknown timezone `{name}`"))?;
    Ok(Box::new(ZonedClock::system(zone)))
}

/// Runs one task command. Results go to `out`; misses go to `diag` so
/// callers can tell them apart.
fn run_tasks<S: KeyValueStore>(
    mut store: TaskStore<S>,
    clock: &dyn Clock,
    command: TaskCommand,
    out: &mut dyn Write,
    diag: &mut dyn Write,
) -> Result<()> {
    match command {
        TaskCommand::Add(text) => {
            let id = quick_add(&mut store, &text, clock)?;
            writeln!(out, "added {id}")?;
        }
        TaskCommand::List => print_list(&store, clock, out)?,
        TaskCommand::Toggle(id) => {
            if !store.toggle_task(&TaskId::from(id.clone())) {
                writeln!(diag, "no task {id}")?;
            }
        }
        TaskCommand::Delete(id) => {
            if !store.delete_task(&TaskId::from(id.clone())) {
                writeln!(diag, "no task {id}")?;
            }
        }
        TaskCommand::ClearCompleted => {
            let removed = store.clear_completed();
            writeln!(out, "removed {removed} completed task(s)")?;
        }
    }

    if let Some(err) = store.persist_error() {
        bail!("changes were not saved: {err}");
    }
    Ok(())
}

fn print_list<S: KeyValueStore>(
    store: &TaskStore<S>,
    clock: &dyn Clock,
    out: &mut dyn Write,
) -> Result<()> {
    let view = TaskListView::build(store.tasks(), clock);
    if view.is_empty() {
        writeln!(out, "No tasks yet.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{} active, {} completed",
        view.counts.active, view.counts.completed
    )?;
    for group in &view.groups {
        writeln!(out)?;
        writeln!(out, "{} ({})", group.label, group.tasks.len())?;
        for task in &group.tasks {
            let mark = if task.completed { "x" } else { " " };
            let badge = match (task.due_date, task.completed) {
                (Some(due), false) => format!("  [{}]", due_badge(due, clock)),
                _ => String::new(),
            };
            writeln!(out, "  [{mark}] {}  {}{badge}", task.id, task.text)?;
        }
    }
    Ok(())
}

fn run_home(storage: &SqliteKeyValueStore<'_>, action: Option<HomeAction>) -> Result<()> {
    match action.unwrap_or(HomeAction::Get) {
        HomeAction::Get => {
            let page = load_home_page(storage);
            println!("{} ({})", page.label(), page.route());
        }
        HomeAction::Set { page } => {
            let Some(page) = parse_home_page(&page) else {
                bail!("unknown page `{page}`");
            };
            save_home_page(storage, page)?;
            println!("home page set to {}", page.label());
        }
    }
    Ok(())
}

fn parse_home_page(value: &str) -> Option<HomePage> {
    match value.trim().to_ascii_lowercase().as_str() {
        "calendar" => Some(HomePage::Calendar),
        "assignments" | "todo" => Some(HomePage::Assignments),
        "notebook" => Some(HomePage::Notebook),
        "recap" | "weekly-recap" => Some(HomePage::WeeklyRecap),
        "settings" => Some(HomePage::Settings),
        route => HomePage::from_route(route),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_clock, run_tasks, TaskCommand};
    use chrono::{TimeZone, Utc};
    use focus_core::{FixedClock, MemoryKeyValueStore, TaskStore};

    fn run(storage: &MemoryKeyValueStore, command: TaskCommand) -> (String, String) {
        let clock = FixedClock::utc(Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap());
        let mut out = Vec::new();
        let mut diag = Vec::new();
        run_tasks(
            TaskStore::open_default(storage),
            &clock,
            command,
            &mut out,
            &mut diag,
        )
        .unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
        )
    }

    #[test]
    fn unknown_id_is_reported_on_the_diagnostic_stream() {
        let storage = MemoryKeyValueStore::new();

        let (out, diag) = run(&storage, TaskCommand::Toggle("nope".to_string()));
        assert_eq!(out, "");
        assert_eq!(diag, "no task nope\n");

        let (out, diag) = run(&storage, TaskCommand::Delete("nope".to_string()));
        assert_eq!(out, "");
        assert_eq!(diag, "no task nope\n");
    }

    #[test]
    fn added_task_is_listed_under_its_day() {
        let storage = MemoryKeyValueStore::new();
        let (out, diag) = run(&storage, TaskCommand::Add("Submit report tomorrow".to_string()));
        assert!(out.starts_with("added "));
        assert_eq!(diag, "");

        let (out, _) = run(&storage, TaskCommand::List);
        assert!(out.contains("Tomorrow (1)"));
        assert!(out.contains("Submit report  [Tomorrow]"));
    }

    #[test]
    fn timezone_names_are_validated() {
        assert!(resolve_clock(None).is_ok());
        assert!(resolve_clock(Some("America/New_York")).is_ok());
        assert!(resolve_clock(Some("Mars/Olympus")).is_err());
    }
}
