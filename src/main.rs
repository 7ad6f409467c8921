mod commands;
mod config;
mod render;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use custody_core::series::MutationScope;

use config::Config;

#[derive(Parser)]
#[command(name = "custody")]
#[command(about = "Who has the kids today, shared family events and calendar export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the custody schedule
    Setup {
        /// alternating-weeks, 2-2-3 or weekday-weekend
        #[arg(short, long)]
        pattern: String,

        /// Date the rotation starts, with owner A in control (YYYY-MM-DD)
        #[arg(short, long)]
        anchor: String,

        #[arg(long)]
        owner_a: String,

        #[arg(long)]
        owner_b: String,
    },
    /// Show who has custody and when the next handoff is
    Today {
        /// Check another day instead of today (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Show custody for every day of a month
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Add an event, optionally repeating
    Add {
        title: String,

        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Start time (HH:MM); all-day when omitted
        #[arg(short, long)]
        time: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long)]
        notes: Option<String>,

        /// School, Sports, Medical, Activities, Family or Other
        #[arg(short, long, default_value = "Other")]
        category: String,

        /// Repeat daily, weekly, biweekly or monthly
        #[arg(short, long)]
        repeat: Option<String>,

        /// Weekdays for weekly/biweekly repeats (e.g. "mon,wed")
        #[arg(long)]
        days: Option<String>,

        /// Last day a repeat may fall on (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,
    },
    /// List saved events
    Events {
        /// Only show events from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
    },
    /// Edit an event, or part of its series
    Edit {
        /// Event id (or a unique prefix)
        id: String,

        /// this, following or all
        #[arg(short, long, default_value = "this")]
        scope: MutationScope,

        #[arg(long)]
        title: Option<String>,

        /// Move the event (single events only)
        #[arg(long)]
        date: Option<String>,

        /// New start time (HH:MM), or "none" for all-day
        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },
    /// Delete an event, or part of its series
    Delete {
        /// Event id (or a unique prefix)
        id: String,

        /// this, following or all
        #[arg(short, long, default_value = "this")]
        scope: MutationScope,
    },
    /// Export events and the custody timeline as an .ics file
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Months of custody timeline to include
        #[arg(short, long)]
        months: Option<u32>,

        #[arg(long)]
        no_events: bool,

        #[arg(long)]
        no_custody: bool,
    },
    /// What to pack before the next handoff
    Pack {
        /// Check another day instead of today (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Only show the list when the handoff is this many days away or less
        #[arg(short, long, default_value_t = custody_core::packing::DEFAULT_PACK_WINDOW_DAYS)]
        within: u32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config::load()?;

    match cli.command {
        Commands::Setup {
            pattern,
            anchor,
            owner_a,
            owner_b,
        } => commands::setup::run(&pattern, &anchor, owner_a, owner_b),
        Commands::Today { date } => commands::today::run(&cfg, date.as_deref()),
        Commands::Calendar { month } => commands::calendar::run(&cfg, month.as_deref()),
        Commands::Add {
            title,
            date,
            time,
            location,
            notes,
            category,
            repeat,
            days,
            until,
        } => commands::add::run(
            &cfg,
            commands::add::AddArgs {
                title,
                date,
                time,
                location,
                notes,
                category,
                repeat,
                days,
                until,
            },
        ),
        Commands::Events { from } => commands::events::run(&cfg, from.as_deref()),
        Commands::Edit {
            id,
            scope,
            title,
            date,
            time,
            location,
            notes,
            category,
        } => commands::edit::run(
            &cfg,
            &id,
            scope,
            commands::edit::EditArgs {
                title,
                date,
                time,
                location,
                notes,
                category,
            },
        ),
        Commands::Delete { id, scope } => commands::delete::run(&cfg, &id, scope),
        Commands::Export {
            output,
            months,
            no_events,
            no_custody,
        } => commands::export::run(&cfg, output.as_deref(), months, !no_events, !no_custody),
        Commands::Pack { date, within } => commands::pack::run(&cfg, date.as_deref(), within),
    }
}
