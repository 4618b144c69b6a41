//! Tactics Simulation
//!
//! Runs a scenario tick by tick and draws the board as the viewers see it.

use clap::Parser;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tactics_core::collab::{Collaborators, ReaderInput, SimRng};
use tactics_core::config::{Config, DEFAULT_CONFIG_PATH};
use tactics_core::render::{glyph_map, render_board};
use tactics_core::{Result, World};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "tactics_sim")]
#[command(about = "Turn-based tactical board simulation")]
struct Args {
    /// Scenario file (defaults to scenario.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Wait for enter between ticks
    #[arg(long)]
    interactive: bool,

    /// Print one JSON snapshot per tick instead of the board
    #[arg(long)]
    json: bool,

    /// Print the effective scenario as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::load(DEFAULT_CONFIG_PATH)?,
        None => Config::default(),
    };

    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        config.simulation.ticks = ticks;
    }
    if args.interactive {
        config.simulation.interactive = true;
    }
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    if args.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let sim = &config.simulation;
    info!(
        seed = sim.seed,
        ticks = sim.ticks,
        board_size = sim.board_size,
        entities = config.entities.len(),
        "starting simulation"
    );

    let mut world = World::from_config(&config)?;
    let mut collab = if args.json {
        Collaborators::new(SimRng::seeded(sim.seed), ReaderInput::stdin(), io::sink())
    } else {
        Collaborators::terminal(sim.seed)
    };

    let mut stdout = io::stdout();
    if args.json {
        writeln!(stdout, "{}", serde_json::to_string(&world.snapshot())?)?;
    } else {
        let board = render_board(sim.board_size, &glyph_map(world.manager()), None);
        write!(stdout, "{}", board)?;
    }

    for _ in 0..sim.ticks {
        if sim.interactive && collab.input.read_line()?.is_none() {
            info!(tick = world.tick(), "input closed, stopping");
            break;
        }
        world.step(&mut collab)?;
        if args.json {
            writeln!(stdout, "{}", serde_json::to_string(&world.snapshot())?)?;
        }
    }

    info!(ticks = world.tick(), "simulation complete");
    Ok(())
}
