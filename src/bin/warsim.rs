//! Headless encounter runner
//!
//! Steps an encounter to completion, printing the narration as it happens
//! or a JSON report at the end.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use warsim::core::{load_encounter, EncounterConfig, Result};
use warsim::encounter::{Encounter, EncounterReport, NarrationSink, Silent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Divine war simulation - run one encounter
#[derive(Parser, Debug)]
#[command(name = "warsim")]
#[command(about = "Run a turn-based divine war encounter")]
struct Args {
    /// Encounter file (TOML); the built-in roster when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured turn limit
    #[arg(long)]
    max_turns: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between turns, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Suppress turn-by-turn narration
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warsim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_encounter(path)?,
        None => EncounterConfig::default(),
    };
    if let Some(max_turns) = args.max_turns {
        config.max_turns = max_turns;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let delay = Duration::from_millis(args.delay_ms);

    let report = if args.quiet || args.format == OutputFormat::Json {
        drive(Encounter::new(config, Silent)?, delay)
    } else {
        drive(Encounter::new(config, |line: &str| println!("{}", line))?, delay)
    };

    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => print_summary(&report),
    }
    Ok(())
}

fn drive<S: NarrationSink>(mut encounter: Encounter<S>, delay: Duration) -> EncounterReport {
    while !encounter.step() {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
    encounter.report()
}

fn print_summary(report: &EncounterReport) {
    println!();
    println!("Encounter Result");
    println!("================");
    match report.winner() {
        Some(name) => println!("Winner: {} after {} turns", name, report.turns),
        None => println!("Stalemate after {} turns", report.turns),
    }
    println!("Seed: {}", report.seed);
    for c in &report.combatants {
        println!(
            "  {:<20} {:>6.1}/{:<6.1} {}",
            c.name,
            c.health,
            c.max_health,
            if c.alive { "" } else { "(fallen)" }
        );
    }
}
