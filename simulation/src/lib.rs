#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Driver-facing façade that wires the world to the pursuit system.
//!
//! A [`Simulation`] owns the authoritative world, the pursuit system and the
//! random source used for tie-breaking. Drivers set the scene up through the
//! registration methods, call [`Simulation::advance`] once per frame, and read
//! positions back for rendering between ticks.

use outbreak_core::{CellCoord, Command, CommandError, Event, Species};
use outbreak_system_pursuit::Pursuit;
use outbreak_world::{self as world, query, DistanceField, Grid, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::debug;

pub use outbreak_world::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

/// Seed used when a configuration does not provide one.
pub const DEFAULT_SEED: u64 = 0x5eed_0f_a90c_a1f5;

/// Parameters describing the initial scene of a simulation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of grid rows.
    pub height: u32,
    /// Number of grid columns.
    pub width: u32,
    /// Seed for the tie-breaking random generator.
    pub seed: u64,
    /// Cells blocked before the first tick.
    pub obstacles: Vec<CellCoord>,
    /// Initial zombie positions in insertion order.
    pub zombies: Vec<CellCoord>,
    /// Initial human positions in insertion order.
    pub humans: Vec<CellCoord>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_GRID_HEIGHT,
            width: DEFAULT_GRID_WIDTH,
            seed: DEFAULT_SEED,
            obstacles: Vec::new(),
            zombies: Vec::new(),
            humans: Vec::new(),
        }
    }
}

/// Pursuit-evasion simulation driven one tick at a time.
#[derive(Debug)]
pub struct Simulation<R = ChaCha8Rng> {
    world: World,
    pursuit: Pursuit,
    rng: R,
    events: Vec<Event>,
}

impl Simulation<ChaCha8Rng> {
    /// Builds a simulation from a configuration, seeding a ChaCha generator.
    ///
    /// Fails on the first obstacle or agent that lies outside the grid.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, CommandError> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut simulation = Self::with_rng(config.height, config.width, rng);

        for &cell in &config.obstacles {
            simulation.set_obstacle(cell)?;
        }
        for &cell in &config.zombies {
            let _ = simulation.add_zombie(cell)?;
        }
        for &cell in &config.humans {
            let _ = simulation.add_human(cell)?;
        }

        Ok(simulation)
    }
}

impl<R: Rng> Simulation<R> {
    /// Creates an empty simulation on a grid of the provided dimensions.
    pub fn with_rng(height: u32, width: u32, rng: R) -> Self {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::ConfigureGrid { height, width },
            &mut events,
        );

        Self {
            world,
            pursuit: Pursuit::default(),
            rng,
            events,
        }
    }

    /// Marks a cell as an obstacle.
    pub fn set_obstacle(&mut self, cell: CellCoord) -> Result<(), CommandError> {
        self.submit(Command::PlaceObstacle { cell })
    }

    /// Registers a zombie and returns its insertion index.
    pub fn add_zombie(&mut self, cell: CellCoord) -> Result<usize, CommandError> {
        self.add_agent(Species::Zombie, cell)
    }

    /// Registers a human and returns its insertion index.
    pub fn add_human(&mut self, cell: CellCoord) -> Result<usize, CommandError> {
        self.add_agent(Species::Human, cell)
    }

    /// Registers an agent of either species and returns its insertion index.
    pub fn add_agent(&mut self, species: Species, cell: CellCoord) -> Result<usize, CommandError> {
        let index = query::population(&self.world, species).len();
        self.submit(world::add_agent(species, cell))?;
        Ok(index)
    }

    /// Empties every grid cell, removes all agents and rewinds the clock.
    pub fn clear(&mut self) {
        self.events.clear();
        world::apply(&mut self.world, Command::Reset, &mut self.events);
    }

    /// Runs one tick: both distance fields are computed from the pre-tick
    /// positions, then every zombie and every human moves at most one step.
    pub fn advance(&mut self) {
        self.events.clear();
        world::apply(&mut self.world, Command::Tick, &mut self.events);

        let zombies = query::population_view(&self.world, Species::Zombie);
        let humans = query::population_view(&self.world, Species::Human);
        let mut commands = Vec::new();
        self.pursuit.handle(
            &self.events,
            query::grid(&self.world),
            &zombies,
            &humans,
            &mut self.rng,
            &mut commands,
        );

        for command in commands {
            world::apply(&mut self.world, command, &mut self.events);
        }

        debug!(
            tick = query::tick_index(&self.world),
            moves = self
                .events
                .iter()
                .filter(|event| matches!(event, Event::AgentMoved { .. }))
                .count(),
            "advanced simulation"
        );
    }

    /// Obstacle grid the agents move on.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        query::grid(&self.world)
    }

    /// Zombie positions in insertion order.
    #[must_use]
    pub fn zombies(&self) -> &[CellCoord] {
        query::population(&self.world, Species::Zombie).as_slice()
    }

    /// Human positions in insertion order.
    #[must_use]
    pub fn humans(&self) -> &[CellCoord] {
        query::population(&self.world, Species::Human).as_slice()
    }

    /// Number of zombies.
    #[must_use]
    pub fn num_zombies(&self) -> usize {
        self.zombies().len()
    }

    /// Number of humans.
    #[must_use]
    pub fn num_humans(&self) -> usize {
        self.humans().len()
    }

    /// Number of ticks completed since setup or the last [`Simulation::clear`].
    #[must_use]
    pub fn tick_index(&self) -> u64 {
        query::tick_index(&self.world)
    }

    /// Distance field seeded by the current positions of `species`.
    #[must_use]
    pub fn distance_field(&self, species: Species) -> DistanceField {
        query::distance_field(&self.world, species)
    }

    /// Events produced by the most recent tick, setup call or reset.
    #[must_use]
    pub fn last_events(&self) -> &[Event] {
        &self.events
    }

    fn submit(&mut self, command: Command) -> Result<(), CommandError> {
        self.events.clear();
        world::apply(&mut self.world, command, &mut self.events);

        match self.events.last() {
            Some(Event::CommandRejected { reason }) => Err(*reason),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outbreak_core::GridError;

    #[test]
    fn default_config_matches_world_defaults() {
        let config = SimulationConfig::default();

        assert_eq!(config.height, 30);
        assert_eq!(config.width, 40);
        assert!(config.zombies.is_empty());
    }

    #[test]
    fn setup_reports_out_of_range_cells() {
        let mut simulation = Simulation::with_rng(2, 2, ChaCha8Rng::seed_from_u64(0));

        assert_eq!(
            simulation.add_zombie(CellCoord::new(2, 0)),
            Err(CommandError::Grid(GridError::OutOfBounds {
                cell: CellCoord::new(2, 0),
                height: 2,
                width: 2,
            }))
        );
        assert_eq!(simulation.num_zombies(), 0);
    }

    #[test]
    fn agents_receive_sequential_indices() {
        let mut simulation = Simulation::with_rng(3, 3, ChaCha8Rng::seed_from_u64(0));

        assert_eq!(simulation.add_human(CellCoord::new(0, 0)), Ok(0));
        assert_eq!(simulation.add_human(CellCoord::new(0, 0)), Ok(1));
        assert_eq!(simulation.add_zombie(CellCoord::new(2, 2)), Ok(0));
        assert_eq!(simulation.num_humans(), 2);
    }

    #[test]
    fn clear_resets_scene() {
        let mut simulation = Simulation::with_rng(3, 3, ChaCha8Rng::seed_from_u64(0));
        simulation.set_obstacle(CellCoord::new(1, 1)).expect("in bounds");
        let _ = simulation.add_zombie(CellCoord::new(0, 0)).expect("in bounds");
        simulation.advance();
        assert_eq!(simulation.tick_index(), 1);

        simulation.clear();

        assert_eq!(simulation.tick_index(), 0);
        assert_eq!(simulation.num_zombies(), 0);
        assert_eq!(simulation.grid().obstacles().count(), 0);
        assert_eq!(simulation.last_events(), &[Event::WorldCleared]);
    }
}
