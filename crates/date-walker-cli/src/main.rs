use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use date_walker::{resolve_with_options, DateExpression, Hemisphere, ResolveOptions, WeekStartDay};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

const LONG_ABOUT: &str = "\
Resolve a parsed date/time expression against a reference instant.

The expression is the JSON form of a date-walker tree, read from FILE or
stdin. The resolution is printed as JSON: the captured alternatives as
RFC 3339 timestamps, in order, and whether the expression recurs.

EXAMPLES:
    datewalk next_monday.json --reference 2024-03-15T12:00:00Z
    cat expr.json | datewalk --timezone America/New_York --compact";

#[derive(Parser)]
#[command(name = "datewalk")]
#[command(version)]
#[command(about = "Resolve a parsed date/time expression against a reference instant")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// Expression tree as JSON (reads stdin when omitted or `-`)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Reference instant in RFC 3339 (defaults to now)
    #[arg(long, short = 'r', value_name = "RFC3339")]
    reference: Option<String>,

    /// Zone the reference is read in: IANA name or offset such as +02:00
    #[arg(long, short = 't', value_name = "ZONE", default_value = "UTC")]
    timezone: String,

    /// First day of the week for "this week"/"next week"
    #[arg(long, value_enum, default_value_t = WeekStartArg::Monday)]
    week_start: WeekStartArg,

    /// Hemisphere the season table is oriented for
    #[arg(long, value_enum, default_value_t = HemisphereArg::Northern)]
    hemisphere: HemisphereArg,

    /// Print the resolution on one line
    #[arg(long, short = 'c')]
    compact: bool,

    /// Enable verbose logging (-v debug, -vv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WeekStartArg {
    Monday,
    Sunday,
}

impl From<WeekStartArg> for WeekStartDay {
    fn from(arg: WeekStartArg) -> Self {
        match arg {
            WeekStartArg::Monday => WeekStartDay::Monday,
            WeekStartArg::Sunday => WeekStartDay::Sunday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HemisphereArg {
    Northern,
    Southern,
}

impl From<HemisphereArg> for Hemisphere {
    fn from(arg: HemisphereArg) -> Self {
        match arg {
            HemisphereArg::Northern => Hemisphere::Northern,
            HemisphereArg::Southern => Hemisphere::Southern,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let reference = match &cli.reference {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("invalid --reference '{s}'"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    tracing::debug!(%reference, timezone = %cli.timezone, "reference instant");

    let input = read_input(cli.file.as_deref())?;
    let expression = DateExpression::from_json(&input)?;
    let options = ResolveOptions {
        week_start: cli.week_start.into(),
        hemisphere: cli.hemisphere.into(),
        ..ResolveOptions::default()
    };
    let resolution = resolve_with_options(&expression, reference, &cli.timezone, &options)
        .context("failed to resolve expression")?;

    let output = if cli.compact {
        serde_json::to_string(&resolution)?
    } else {
        serde_json::to_string_pretty(&resolution)?
    };
    println!("{output}");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    if level != LevelFilter::OFF {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}
