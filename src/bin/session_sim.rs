//! Headless session runner
//!
//! Builds the fixed demonstration galaxy, advances it and writes the final
//! session as JSON.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use stellar_dominion::economy::Resource;
use stellar_dominion::session::demo::{demo_setup, demo_systems};
use stellar_dominion::{advance, Session, SimConfig};

/// Session Sim - run the tick engine without a host
#[derive(Parser, Debug)]
#[command(name = "session_sim")]
#[command(about = "Advance a demonstration session and dump it as JSON")]
struct Args {
    /// Number of ticks to advance
    #[arg(long, default_value_t = 100)]
    ticks: u32,

    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// TOML or JSON config overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the final session
    #[arg(long, default_value = "session_output.json")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    let session = Session::new(&config, demo_systems(&config), demo_setup(args.seed))?;

    tracing::info!(ticks = args.ticks, seed = args.seed, "Advancing session");
    let start = Instant::now();
    let session = advance(&session, args.ticks, &config);
    let elapsed = start.elapsed();

    let at_war = session.empires.iter().filter(|e| e.is_ai() && e.at_war()).count();
    let population: u32 = session.planets.iter().map(|p| p.population.total()).sum();
    tracing::info!(
        tick = session.clock.current_tick(),
        planets = session.planets.len(),
        population,
        fleets = session.fleets.len(),
        wars = at_war,
        energy = session.ledger.amount(Resource::Energy),
        minerals = session.ledger.amount(Resource::Minerals),
        era = session.research.current_era,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "Session advanced"
    );
    for notification in &session.history.notifications {
        tracing::info!(tick = notification.tick, kind = ?notification.kind, "{}", notification.message);
    }

    let json = serde_json::to_string_pretty(&session)?;
    std::fs::write(&args.output, json)?;
    tracing::info!(path = %args.output.display(), "Session written");

    Ok(())
}
