//! Generate a periodic schedule from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Quarterly schedule with a short initial stub, modified following on weekends
//! schedule --start 2024-01-10 --end 2025-09-20 --frequency 3M --adjuster MF --calendar bus
//!
//! # Month end rolls and a long final stub, printed as JSON
//! schedule --start 2024-01-31 --end 2024-12-15 --frequency 1M --roll EOM --stub LONG_FINAL --json
//!
//! # A specification stored as JSON
//! schedule --spec swap.json
//! ```
//!
//! Set `RUST_LOG=debug` to log the resolved roll days and walks.

use chrono::prelude::*;
use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use periodic_schedule::json::JSON;
use periodic_schedule::scheduling::{
    BusinessDayAdjustment, Frequency, RollDay, Schedule, ScheduleSpecification, StubConvention,
};
use periodic_schedule::ScheduleError;

/// Generate the periods of a periodic schedule
#[derive(Parser, Debug)]
#[command(name = "schedule")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file containing a schedule specification. Replaces every other specification flag.
    #[arg(long, conflicts_with_all = ["start", "end", "first_regular", "last_regular"])]
    spec: Option<PathBuf>,

    /// Unadjusted start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, required_unless_present = "spec")]
    start: Option<NaiveDateTime>,

    /// Unadjusted end date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date, required_unless_present = "spec")]
    end: Option<NaiveDateTime>,

    /// Period frequency, e.g. 1M, 3M, 6M, 1Y, 2W, 7D or TERM
    #[arg(short, long, default_value = "3M")]
    frequency: Frequency,

    /// Roll day, e.g. EOM, IMM, IMMAUD, 15. Inferred when omitted.
    #[arg(short, long)]
    roll: Option<RollDay>,

    /// Stub convention: NONE, SHORT_INITIAL, LONG_INITIAL, SHORT_FINAL, LONG_FINAL or BOTH
    #[arg(short, long)]
    stub: Option<StubConvention>,

    /// Start of the first regular period, creating an explicit initial stub (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    first_regular: Option<NaiveDateTime>,

    /// End of the last regular period, creating an explicit final stub (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    last_regular: Option<NaiveDateTime>,

    /// Business day adjustment: NO_ADJUST, F, MF, P, MP, MFBM or NEAREST
    #[arg(short, long, default_value = "NO_ADJUST")]
    adjuster: String,

    /// Holiday calendar names separated by commas, e.g. "bus" or "all"
    #[arg(short, long, default_value = "all")]
    calendar: String,

    /// Print the schedule as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn parse_date(value: &str) -> Result<NaiveDateTime, ScheduleError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| ScheduleError::Parse {
            value: value.to_string(),
            target: "date",
        })
}

fn specification(cli: &Cli) -> Result<ScheduleSpecification, Box<dyn Error>> {
    if let Some(path) = &cli.spec {
        let json = fs::read_to_string(path)?;
        return Ok(ScheduleSpecification::from_json(&json)?);
    }
    let (start, end) = match (cli.start, cli.end) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err("--start and --end are required without --spec".into()),
    };
    let mut spec = ScheduleSpecification::try_new(start, end, cli.frequency)?.with_adjustment(
        BusinessDayAdjustment::try_from_names(&cli.adjuster, &cli.calendar)?,
    );
    if let Some(roll) = cli.roll {
        spec = spec.with_roll(roll);
    }
    if let Some(stub) = cli.stub {
        spec = spec.with_stub(stub);
    }
    if let Some(date) = cli.first_regular {
        spec = spec.with_first_regular(date);
    }
    if let Some(date) = cli.last_regular {
        spec = spec.with_last_regular(date);
    }
    Ok(spec)
}

fn run(cli: &Cli) -> Result<String, Box<dyn Error>> {
    let spec = specification(cli)?;
    let schedule = Schedule::try_new(&spec)?;
    log::info!(
        "Generated {} periods with roll {} and stub {}",
        schedule.len(),
        schedule.roll(),
        schedule.stub()
    );
    if cli.json {
        Ok(schedule.to_json_pretty()?)
    } else {
        Ok(schedule.to_string())
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
