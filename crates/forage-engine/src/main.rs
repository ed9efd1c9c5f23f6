//! Driver binary for the Forage simulation.
//!
//! Wires the configuration, the tick machine, and the frame loop together,
//! then runs until the day limit, extinction, or the frame budget ends the
//! run. Frames go to stdout as JSON lines; logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `FORAGE_CONFIG` or `forage-config.yaml`
//! 3. Seed the random source
//! 4. Spawn the roster, the controlled agent, and the resources
//! 5. Start the stdin reader for steering
//! 6. Run the frame loop
//! 7. Log the result

mod error;
mod input;
mod render;

use std::path::PathBuf;

use forage_core::config::SimulationConfig;
use forage_core::runner::{self, RunOptions};
use forage_core::simulation::Simulation;
use forage_world::RngSource;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::render::JsonLinesRenderer;

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "forage-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or frame output fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging. Stdout carries frames.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("forage-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        seed = config.world.seed,
        max_days = config.world.max_days,
        tick_interval_ms = config.world.tick_interval_ms,
        max_frames = config.world.max_frames,
        agent_count = config.population.agent_count,
        resource_count = config.population.resource_count,
        "Configuration loaded"
    );

    // 3. Seed the random source.
    let rng = match config.world.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    // 4. Build the starting world.
    let mut sim = Simulation::new(&config, rng)?;
    info!(
        roster = sim.roster().len(),
        resources = sim.environment().len(),
        controlled = %sim.controlled_position(),
        "World spawned"
    );

    // 5. Steering from stdin.
    let (tx, mut rx) = mpsc::channel(input::INPUT_BUFFER);
    input::spawn_line_reader(std::io::BufReader::new(std::io::stdin()), tx);

    // 6. Run.
    let options = RunOptions::from_config(&config.world);
    let mut renderer = JsonLinesRenderer::new(std::io::stdout());
    let result = runner::run_simulation(&mut sim, &mut rx, &options, &mut renderer).await;

    // 7. Report.
    runner::log_simulation_end(&result);
    renderer.finish()?;
    Ok(())
}

/// Load configuration from `FORAGE_CONFIG`, then the default path.
///
/// A missing default file falls back to built-in defaults; a missing file
/// named explicitly by `FORAGE_CONFIG` is an error.
fn load_config() -> Result<SimulationConfig, EngineError> {
    if let Some(path) = std::env::var_os("FORAGE_CONFIG").map(PathBuf::from) {
        info!(path = %path.display(), "Loading config from FORAGE_CONFIG");
        return Ok(SimulationConfig::from_file(&path)?);
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        Ok(SimulationConfig::from_file(&default_path)?)
    } else {
        info!("Config file not found, using defaults");
        let mut config = SimulationConfig::default();
        config.world.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}
