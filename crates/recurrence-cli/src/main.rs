//! `recur` CLI — expand and plan recurring task schedules from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # List the raw occurrence dates of a weekly series
//! recur expand --start 2025-01-01 --until 2025-01-31 --frequency weekly
//!
//! # Same, as JSON including whether the occurrence cap cut the series short
//! recur expand --start 2025-01-01 --until 2025-12-31 --frequency daily --json
//!
//! # Plan a schedule and emit one JSON line per task to create
//! recur plan --start 2025-01-01T09:30 --until 2025-03-31 --frequency biweekly
//!
//! # Write the plan to a file, with a larger cap
//! recur plan --start 2025-01-01 --until 2025-12-31 --frequency daily \
//!     --max-occurrences 366 -o tasks.jsonl
//! ```

mod sink;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recurrence_engine::calendar::parse_date;
use recurrence_engine::{
    expand_with_limit, plan_schedule, submit_plan, ExpanderConfig, Expansion,
    RecurrenceFrequency, ScheduleRequest, MAX_OCCURRENCES,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing_subscriber::EnvFilter;

use crate::sink::JsonLinesSink;

#[derive(Parser)]
#[command(name = "recur", version, about = "Recurring task schedule expansion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum number of occurrences in one series, the start date included
    #[arg(
        long,
        global = true,
        env = "RECUR_MAX_OCCURRENCES",
        default_value_t = MAX_OCCURRENCES
    )]
    max_occurrences: usize,

    /// Log expansion details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the occurrence dates of a repeating series
    Expand {
        /// First occurrence (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Inclusive "repeat until" date (YYYY-MM-DD)
        #[arg(long)]
        until: String,
        /// daily, weekly, biweekly or monthly
        #[arg(short, long)]
        frequency: RecurrenceFrequency,
        /// Print a JSON object instead of one date per line
        #[arg(long)]
        json: bool,
    },
    /// Validate a schedule and emit the tasks to create as JSON lines
    Plan {
        /// First occurrence (YYYY-MM-DD, optionally with THH:MM)
        #[arg(long)]
        start: String,
        /// Inclusive "repeat until" date; required unless frequency is none
        #[arg(long)]
        until: Option<String>,
        /// none, daily, weekly, biweekly or monthly; omitted means a single task
        #[arg(short, long)]
        frequency: Option<RecurrenceFrequency>,
        /// Time of day attached to every occurrence (HH:MM)
        #[arg(long)]
        time: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Serialize)]
struct ExpandOutput<'a> {
    frequency: RecurrenceFrequency,
    #[serde(flatten)]
    expansion: &'a Expansion,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = ExpanderConfig::with_max_occurrences(cli.max_occurrences);
    config.validate()?;

    match cli.command {
        Commands::Expand {
            start,
            until,
            frequency,
            json,
        } => {
            let start = parse_date(&start).context("Invalid --start")?;
            let until = parse_date(&until).context("Invalid --until")?;
            let expansion = expand_with_limit(start, until, frequency, config.max_occurrences)
                .context("Failed to expand recurrence")?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                let output = ExpandOutput {
                    frequency,
                    expansion: &expansion,
                };
                serde_json::to_writer_pretty(&mut out, &output)?;
                writeln!(out)?;
            } else {
                for date in expansion.dates() {
                    writeln!(out, "{}", date)?;
                }
            }
        }
        Commands::Plan {
            start,
            until,
            frequency,
            time,
            output,
        } => {
            let request = ScheduleRequest {
                start: Some(start),
                until,
                frequency,
                time,
            };
            // Plan fully before opening the output so a rejected schedule writes nothing.
            let plan = plan_schedule(&request, &config).context("Schedule rejected")?;

            let created = match output.as_deref() {
                Some(path) => {
                    let file = File::create(path)
                        .with_context(|| format!("Failed to create file: {}", path))?;
                    let mut sink = JsonLinesSink::new(BufWriter::new(file));
                    let created = submit_plan(&plan, &mut sink)?;
                    sink.finish()
                        .with_context(|| format!("Failed to write file: {}", path))?;
                    created
                }
                None => {
                    let mut sink = JsonLinesSink::new(io::stdout().lock());
                    let created = submit_plan(&plan, &mut sink)?;
                    sink.finish().context("Failed to write to stdout")?;
                    created
                }
            };
            tracing::info!(created, frequency = %plan.frequency, "schedule submitted");
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
