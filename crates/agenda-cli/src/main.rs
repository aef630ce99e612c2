use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use agenda_engine::{
    find_conflicts, group_by_date, indicator_position, layout_day, layout_week, parse_date,
    upcoming, AgendaConfig, Clock, DayLabels, EnglishDayLabels, Event, EventDraft, EventStore,
    MemoryEventStore, SystemClock, WeekStartDay,
};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "agenda",
    version,
    about = "Timeline layout for agenda views: day/week geometry, grouping, conflicts and the now marker"
)]
struct Cli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    quiet: u8,

    /// TOML settings file
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out one day of events on the timeline canvas
    Layout {
        /// JSON array of events, or - for stdin
        events: String,
        /// Day to lay out (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },

    /// Lay out the week containing a date
    Week {
        /// JSON array of events, or - for stdin
        events: String,
        /// Any day of the week (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// monday or sunday (defaults to the config's week_start)
        #[arg(long = "week-start")]
        week_start: Option<WeekStartDay>,
    },

    /// Group events by day for the agenda list
    List {
        /// JSON array of events, or - for stdin
        events: String,
        /// Only days on or after this date
        #[arg(long)]
        from: Option<String>,
        /// Date used for the Today/Tomorrow/Yesterday labels (defaults to the local date)
        #[arg(long)]
        today: Option<String>,
    },

    /// Report overlapping event pairs on one day
    Conflicts {
        /// JSON array of events, or - for stdin
        events: String,
        /// Day to check (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },

    /// Position of the current-time marker
    Now {
        /// IANA timezone (defaults to the config's default_timezone)
        #[arg(long)]
        timezone: Option<String>,
        /// Instant to place instead of the system clock (RFC 3339)
        #[arg(long)]
        at: Option<String>,
    },

    /// Validate an event before it is stored
    Validate {
        #[arg(long)]
        title: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        /// Length in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: i64,
    },
}

/// Owner of events created from the command line.
const CLI_USER: &str = "local";

/// One agenda list heading with its events.
#[derive(Serialize)]
struct ListedDay<'a> {
    date: &'a str,
    label: String,
    events: Vec<&'a Event>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;
    run(cli)
}

fn init_tracing(verbose: u8, quiet: u8) -> Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_ansi(io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[tracing::instrument(skip_all)]
fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AgendaConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AgendaConfig::default(),
    };

    match cli.command {
        Command::Layout { events, date } => {
            let events = read_events(&events)?;
            parse_date(&date).context("invalid --date")?;
            let layout = layout_day(&events, &date, &config.timeline)
                .with_context(|| format!("failed to lay out {date}"))?;
            print_json(&layout)
        }
        Command::Week {
            events,
            date,
            week_start,
        } => {
            let events = read_events(&events)?;
            let week_start = week_start.unwrap_or(config.week_start);
            let layout = layout_week(&events, &date, week_start, &config.timeline)
                .with_context(|| format!("failed to lay out the week of {date}"))?;
            print_json(&layout)
        }
        Command::List {
            events,
            from,
            today,
        } => {
            let events = read_events(&events)?;
            let today = match today {
                Some(raw) => parse_date(&raw).context("invalid --today")?,
                None => Local::now().date_naive(),
            };
            let days = match &from {
                Some(from) => {
                    parse_date(from).context("invalid --from")?;
                    upcoming(&events, from)
                }
                None => group_by_date(&events),
            };
            let listed: Vec<ListedDay<'_>> = days
                .into_iter()
                .map(|day| ListedDay {
                    label: label_for(day.date, today),
                    date: day.date,
                    events: day.events,
                })
                .collect();
            print_json(&listed)
        }
        Command::Conflicts { events, date } => {
            let events = read_events(&events)?;
            parse_date(&date).context("invalid --date")?;
            let day: Vec<Event> = events.into_iter().filter(|e| e.date == date).collect();
            print_json(&find_conflicts(&day))
        }
        Command::Now { timezone, at } => {
            let instant = match at {
                Some(raw) => DateTime::parse_from_rfc3339(&raw)
                    .with_context(|| format!("invalid --at instant '{raw}'"))?
                    .with_timezone(&Utc),
                None => SystemClock.now(),
            };
            let timezone = config.timezone_or_default(timezone.as_deref());
            print_json(&indicator_position(instant, timezone, &config.timeline))
        }
        Command::Validate {
            title,
            date,
            time,
            duration,
        } => {
            let draft = EventDraft {
                title,
                date,
                time,
                duration,
            };
            let valid = draft.validate().context("event rejected")?;
            let mut store = MemoryEventStore::new();
            let event = store.create(CLI_USER, valid)?;
            print_json(&event)
        }
    }
}

fn label_for(date: &str, today: NaiveDate) -> String {
    match parse_date(date) {
        Ok(day) => EnglishDayLabels.label(day, today),
        Err(_) => date.to_string(),
    }
}

/// Read a JSON array of events from `source`, where `-` means stdin.
fn read_events(source: &str) -> Result<Vec<Event>> {
    let raw = if source == "-" {
        io::read_to_string(io::stdin()).context("failed to read events from stdin")?
    } else {
        fs::read_to_string(Path::new(source))
            .with_context(|| format!("failed to read events from {source}"))?
    };
    let events: Vec<Event> =
        serde_json::from_str(&raw).with_context(|| format!("invalid events JSON in {source}"))?;
    debug!(count = events.len(), source, "read events");
    Ok(events)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
