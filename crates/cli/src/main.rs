mod config;
mod error;
mod render;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Weekday};
use clap::{Args, Parser, Subcommand};
use config::Config;
use error::{Error, Result};
use schedule::{Clearance, SearchScope};
use store::{EventDraft, EventPatch, EventStore, journal};

#[derive(Parser)]
#[command(name = "calctl")]
#[command(about = "A command-line calendar manager", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the events journal (overrides CALCTL_DB and the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new event
    Add(AddArgs),
    /// List events (default: today onwards)
    List(ListArgs),
    /// Show one event in full, including its current conflicts
    Show(ShowArgs),
    /// Edit fields of an existing event
    Edit(EditArgs),
    /// Delete one event by id, or every event on a date
    Delete(DeleteArgs),
    /// Search events by text
    Search(SearchArgs),
    /// Day or week agenda
    Agenda(AgendaArgs),
}

#[derive(Args)]
struct AddArgs {
    /// Event title
    #[arg(long)]
    title: String,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    date: String,

    /// Start time (HH:MM)
    #[arg(long)]
    time: String,

    /// Duration in minutes
    #[arg(long)]
    duration: u32,

    /// Location
    #[arg(long)]
    location: Option<String>,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Schedule even if the slot overlaps existing events
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct ListArgs {
    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long, conflicts_with_all = ["today", "week"])]
    from: Option<String>,

    /// Latest date to include (YYYY-MM-DD)
    #[arg(long, conflicts_with_all = ["today", "week"])]
    to: Option<String>,

    /// Only today's events
    #[arg(long, conflicts_with = "week")]
    today: bool,

    /// This week's events
    #[arg(long)]
    week: bool,
}

#[derive(Args)]
struct ShowArgs {
    /// Event id
    id: String,
}

#[derive(Args)]
struct EditArgs {
    /// Event id
    id: String,

    /// New title
    #[arg(long)]
    title: Option<String>,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<String>,

    /// New start time (HH:MM)
    #[arg(long)]
    time: Option<String>,

    /// New duration in minutes
    #[arg(long)]
    duration: Option<u32>,

    /// New location; pass an empty string to clear
    #[arg(long)]
    location: Option<String>,

    /// New description; pass an empty string to clear
    #[arg(long)]
    description: Option<String>,

    /// Apply even if the new slot overlaps existing events
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct DeleteArgs {
    /// Event id
    #[arg(required_unless_present = "date")]
    id: Option<String>,

    /// Delete all events on this date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "id")]
    date: Option<String>,
}

#[derive(Args)]
struct SearchArgs {
    /// Text to look for
    query: String,

    /// Match the title only, not description or location
    #[arg(long)]
    title_only: bool,
}

#[derive(Args)]
struct AgendaArgs {
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<String>,

    /// The whole week containing the date
    #[arg(long)]
    week: bool,
}

fn main() {
    let _logger = init_logging();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so they never corrupt command output. A failed
/// logger setup just means no diagnostics.
fn init_logging() -> Option<flexi_logger::LoggerHandle> {
    let spec = std::env::var("CALCTL_LOG").unwrap_or_else(|_| "warn".to_string());
    flexi_logger::Logger::try_with_str(&spec).ok()?.start().ok()
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::discover()?;
    let db = config.database(cli.db)?;
    let week_start = config.week_start()?;
    log::debug!("using journal at {}", db.display());

    match cli.command {
        Commands::Add(args) => cmd_add(&db, args, cli.json),
        Commands::List(args) => cmd_list(&db, args, cli.json, week_start),
        Commands::Show(args) => cmd_show(&db, args, cli.json),
        Commands::Edit(args) => cmd_edit(&db, args, cli.json),
        Commands::Delete(args) => cmd_delete(&db, args, cli.json),
        Commands::Search(args) => cmd_search(&db, args, cli.json),
        Commands::Agenda(args) => cmd_agenda(&db, args, cli.json, week_start),
    }
}

fn cmd_add(db: &Path, args: AddArgs, json: bool) -> Result<()> {
    let mut store = load_store(db)?;

    let draft = EventDraft {
        title: args.title,
        date: store::parse_date(&args.date)?,
        start_time: store::parse_time(&args.time)?,
        duration_minutes: args.duration,
        location: args.location,
        description: args.description,
    };
    draft.validate()?;

    let clearance = schedule::check(store.events(), &draft.span(), None);
    if args.force {
        if let Clearance::Busy { conflicts } = &clearance {
            eprintln!(
                "Warning: scheduling over {} conflicting event(s)",
                conflicts.len()
            );
        }
    } else {
        clearance.into_result()?;
    }

    let event = store.add(draft)?;
    journal::save(db, &store)?;

    if json {
        render::print_json(&event)?;
    } else {
        println!("Added event {}", event.id);
        render::print_events(&[&event]);
    }
    Ok(())
}

fn cmd_list(db: &Path, args: ListArgs, json: bool, week_start: Weekday) -> Result<()> {
    let store = load_store(db)?;
    let today = Local::now().date_naive();

    let hits = if args.today {
        schedule::on_day(store.events(), today)
    } else if args.week {
        schedule::in_week(store.events(), today, week_start)
    } else if args.from.is_none() && args.to.is_none() {
        schedule::upcoming(store.events(), today)
    } else {
        let from = match &args.from {
            Some(raw) => store::parse_date(raw)?,
            None => NaiveDate::MIN,
        };
        let to = match &args.to {
            Some(raw) => store::parse_date(raw)?,
            None => NaiveDate::MAX,
        };
        schedule::by_range(store.events(), from, to)
    };

    if json {
        render::print_json(&hits)?;
    } else {
        render::print_events(&hits);
    }
    Ok(())
}

fn cmd_show(db: &Path, args: ShowArgs, json: bool) -> Result<()> {
    let store = load_store(db)?;
    let event = store.get(&args.id)?;
    let conflicts = schedule::find_conflicts(store.events(), &event.span(), Some(&event.id));

    if json {
        let value = serde_json::json!({
            "event": event,
            "end_time": event.end().format("%H:%M").to_string(),
            "conflicts": conflicts,
        });
        render::print_json(&value)?;
    } else {
        render::print_event_details(event, &conflicts);
    }
    Ok(())
}

fn cmd_edit(db: &Path, args: EditArgs, json: bool) -> Result<()> {
    let mut store = load_store(db)?;

    let patch = EventPatch {
        title: args.title,
        date: args.date.as_deref().map(store::parse_date).transpose()?,
        start_time: args.time.as_deref().map(store::parse_time).transpose()?,
        duration_minutes: args.duration,
        location: args.location,
        description: args.description,
    };

    // The candidate slot has to be checked before anything commits.
    let current = store.get(&args.id)?;
    let candidate = store::TimeSpan {
        date: patch.date.unwrap_or(current.date),
        start_time: patch.start_time.unwrap_or(current.start_time),
        duration_minutes: patch.duration_minutes.unwrap_or(current.duration_minutes),
    };
    let exclude = current.id.clone();

    let clearance = schedule::check(store.events(), &candidate, Some(&exclude));
    if args.force {
        if let Clearance::Busy { conflicts } = &clearance {
            eprintln!(
                "Warning: rescheduling over {} conflicting event(s)",
                conflicts.len()
            );
        }
    } else {
        clearance.into_result()?;
    }

    let updated = store.update(&args.id, patch)?;
    journal::save(db, &store)?;

    if json {
        render::print_json(&updated)?;
    } else {
        println!("Updated event {}", updated.id);
        render::print_events(&[&updated]);
    }
    Ok(())
}

fn cmd_delete(db: &Path, args: DeleteArgs, json: bool) -> Result<()> {
    let mut store = load_store(db)?;

    match (args.id, args.date) {
        (Some(id), None) => {
            let removed = store
                .remove(&id)
                .ok_or_else(|| store::Error::NotFound(id.clone()))?;
            journal::save(db, &store)?;
            if json {
                render::print_json(&removed)?;
            } else {
                println!("Deleted event {}", removed.id);
            }
        }
        (None, Some(raw)) => {
            let date = store::parse_date(&raw)?;
            let removed = store.remove_by_date(date);
            if !removed.is_empty() {
                journal::save(db, &store)?;
            }
            if json {
                render::print_json(&removed)?;
            } else {
                println!("Deleted {} event(s) on {date}", removed.len());
            }
        }
        _ => return Err(Error::MissingDeleteTarget),
    }
    Ok(())
}

fn cmd_search(db: &Path, args: SearchArgs, json: bool) -> Result<()> {
    let store = load_store(db)?;
    let scope = if args.title_only {
        SearchScope::TitleOnly
    } else {
        SearchScope::All
    };
    let hits = schedule::search(store.events(), &args.query, scope);

    if json {
        render::print_json(&hits)?;
    } else {
        render::print_events(&hits);
    }
    Ok(())
}

fn cmd_agenda(db: &Path, args: AgendaArgs, json: bool, week_start: Weekday) -> Result<()> {
    let store = load_store(db)?;
    let date = match &args.date {
        Some(raw) => store::parse_date(raw)?,
        None => Local::now().date_naive(),
    };

    if args.week {
        let hits = schedule::in_week(store.events(), date, week_start);
        if json {
            let mut by_date: BTreeMap<String, Vec<&store::Event>> = BTreeMap::new();
            for &event in &hits {
                by_date.entry(event.date.to_string()).or_default().push(event);
            }
            let value = serde_json::json!({
                "type": "week",
                "events_by_date": by_date,
                "total_events": hits.len(),
            });
            render::print_json(&value)?;
        } else {
            render::print_week_agenda(&hits);
        }
    } else {
        let hits = schedule::agenda(store.events(), date);
        if json {
            let value = serde_json::json!({
                "type": "day",
                "date": date.to_string(),
                "total_events": hits.len(),
                "events": hits,
            });
            render::print_json(&value)?;
        } else {
            println!("Agenda for {date}");
            render::print_events(&hits);
        }
    }
    Ok(())
}

/// Load the journal, surfacing individually rejected records as warnings
/// instead of aborting the command.
fn load_store(path: &Path) -> Result<EventStore> {
    let report = journal::load(path)?;
    for rejected in &report.rejected {
        eprintln!(
            "Warning: skipped journal record {}: {}",
            rejected.index, rejected.reason
        );
    }
    Ok(report.store)
}
