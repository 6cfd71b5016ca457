#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs an Outbreak scenario and prints the grid.

mod render;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use outbreak_core::{CellCoord, Species};
use outbreak_simulation::Simulation;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    render::{render_field, render_frame},
    scenario::{parse_cell, Scenario},
};

#[derive(Debug, Parser)]
#[command(name = "outbreak", version, about = "Zombie pursuit simulation on a grid")]
struct Cli {
    /// Scenario file in TOML format; flags below override its values.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of grid rows.
    #[arg(long)]
    height: Option<u32>,

    /// Number of grid columns.
    #[arg(long)]
    width: Option<u32>,

    /// Seed for the tie-breaking random generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate.
    #[arg(long)]
    ticks: Option<u64>,

    /// Obstacle cell as ROW,COLUMN; may be repeated.
    #[arg(long = "obstacle", value_parser = parse_cell)]
    obstacles: Vec<CellCoord>,

    /// Zombie start cell as ROW,COLUMN; may be repeated.
    #[arg(long = "zombie", value_parser = parse_cell)]
    zombies: Vec<CellCoord>,

    /// Human start cell as ROW,COLUMN; may be repeated.
    #[arg(long = "human", value_parser = parse_cell)]
    humans: Vec<CellCoord>,

    /// Print the grid after every tick instead of only after the last one.
    #[arg(long)]
    every_tick: bool,

    /// Also print the distance field seeded by this population.
    #[arg(long, value_enum)]
    field: Option<FieldSource>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FieldSource {
    Zombies,
    Humans,
}

impl From<FieldSource> for Species {
    fn from(source: FieldSource) -> Self {
        match source {
            FieldSource::Zombies => Species::Zombie,
            FieldSource::Humans => Species::Human,
        }
    }
}

impl Cli {
    fn scenario(&self) -> Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => Scenario::load(path)?,
            None => Scenario::default(),
        };

        if let Some(ticks) = self.ticks {
            scenario.ticks = ticks;
        }

        let config = &mut scenario.simulation;
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.obstacles.extend_from_slice(&self.obstacles);
        config.zombies.extend_from_slice(&self.zombies);
        config.humans.extend_from_slice(&self.humans);

        Ok(scenario)
    }
}

/// Entry point for the Outbreak command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let scenario = cli.scenario()?;
    let mut simulation =
        Simulation::from_config(&scenario.simulation).context("scenario does not fit the grid")?;

    info!(
        height = scenario.simulation.height,
        width = scenario.simulation.width,
        zombies = simulation.num_zombies(),
        humans = simulation.num_humans(),
        ticks = scenario.ticks,
        "starting simulation"
    );

    for _ in 0..scenario.ticks {
        simulation.advance();
        if cli.every_tick {
            print_frame(&simulation);
        }
    }

    if !cli.every_tick {
        print_frame(&simulation);
    }

    if let Some(source) = cli.field {
        println!("{}", render_field(&simulation.distance_field(source.into())));
    }

    Ok(())
}

fn print_frame(simulation: &Simulation) {
    println!(
        "tick {}: {} zombies, {} humans",
        simulation.tick_index(),
        simulation.num_zombies(),
        simulation.num_humans()
    );
    println!(
        "{}",
        render_frame(simulation.grid(), simulation.zombies(), simulation.humans())
    );
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
