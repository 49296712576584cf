/*
 * Fish School Simulation
 *
 * This application simulates a school of fish based on three zones around
 * every fish:
 * 1. Repulsion: Swim away from neighbors that come too close
 * 2. Orientation: Align with the heading of nearby neighbors
 * 3. Attraction: Swim toward neighbors further away
 *
 * Neighbors behind a fish, inside its blind cone, are ignored. The window
 * shows the school in a 3D box with a control panel and keyboard shortcuts;
 * `--headless` runs the simulation without a window and logs statistics.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fish_school::{app, SchoolStats, Simulation, SimulationParams, WallMode};

#[derive(Debug, Parser)]
#[command(name = "fish_school", version, about = "3D fish schooling simulation")]
struct Cli {
    /// TOML file with simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Run this many ticks without a window and log school statistics
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
    /// Start with the second species enabled
    #[arg(long)]
    two_species: bool,
    /// Start with periodic walls
    #[arg(long)]
    periodic: bool,
}

fn main() -> Result<()> {
    init_tracing()?;
    let cli = Cli::parse();
    let params = build_params(&cli)?;

    match cli.headless {
        Some(ticks) => run_headless(params, ticks),
        None => app::run(params).context("failed to start viewer"),
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install tracing subscriber")
}

fn build_params(cli: &Cli) -> Result<SimulationParams> {
    let mut params = match &cli.config {
        Some(path) => {
            let params = SimulationParams::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            info!(path = %path.display(), "Loaded configuration");
            params
        }
        None => SimulationParams::default(),
    };

    if let Some(seed) = cli.seed {
        params.rng_seed = Some(seed);
    }
    if cli.two_species {
        params.two_species = true;
    }
    if cli.periodic {
        params.wall_mode = WallMode::Periodic;
    }
    Ok(params)
}

fn run_headless(params: SimulationParams, ticks: u64) -> Result<()> {
    let mut simulation = Simulation::new(params).context("invalid simulation parameters")?;
    info!(ticks, "Running headless");

    for _ in 0..ticks {
        simulation.step();
        if simulation.tick() % 100 == 0 {
            debug!(tick = simulation.tick(), "Progress");
        }
    }

    for &species in simulation.params().enabled_species() {
        let stats = SchoolStats::measure(simulation.school(species));
        info!(
            %species,
            count = stats.count,
            polarization = stats.polarization,
            centroid = ?stats.centroid,
            "School summary"
        );
    }
    info!(tick = simulation.tick(), "Finished headless run");
    Ok(())
}
