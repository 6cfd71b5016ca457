#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Outbreak.

pub mod distance;
pub mod frontier;
pub mod grid;
pub mod population;

use outbreak_core::{CellCoord, Command, CommandError, Event, Species};
use tracing::debug;

pub use distance::{compute_distance_field, DistanceField};
pub use frontier::Frontier;
pub use grid::{Grid, Neighbors};
pub use population::Population;

/// Number of rows in a freshly created world.
pub const DEFAULT_GRID_HEIGHT: u32 = 30;
/// Number of columns in a freshly created world.
pub const DEFAULT_GRID_WIDTH: u32 = 40;

/// Represents the authoritative Outbreak world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    zombies: Population,
    humans: Population,
    tick_index: u64,
}

impl World {
    /// Creates an empty world using the default grid dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grid: Grid::new(DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH),
            zombies: Population::default(),
            humans: Population::default(),
            tick_index: 0,
        }
    }

    fn population(&self, species: Species) -> &Population {
        match species {
            Species::Zombie => &self.zombies,
            Species::Human => &self.humans,
        }
    }

    fn population_mut(&mut self, species: Species) -> &mut Population {
        match species {
            Species::Zombie => &mut self.zombies,
            Species::Human => &mut self.humans,
        }
    }

    fn execute(&mut self, command: Command) -> Result<Event, CommandError> {
        match command {
            Command::ConfigureGrid { height, width } => {
                self.grid = Grid::new(height, width);
                self.zombies.clear();
                self.humans.clear();
                self.tick_index = 0;
                Ok(Event::GridConfigured { height, width })
            }
            Command::PlaceObstacle { cell } => {
                self.grid.set_obstacle(cell)?;
                Ok(Event::ObstaclePlaced { cell })
            }
            Command::AddAgent { species, cell } => {
                let _ = self.grid.is_empty(cell)?;
                let index = self.population_mut(species).push(cell);
                Ok(Event::AgentAdded {
                    species,
                    index,
                    cell,
                })
            }
            Command::MoveAgent { species, index, to } => {
                if !self.grid.is_empty(to)? {
                    return Err(CommandError::Blocked { cell: to });
                }

                let from = self
                    .population_mut(species)
                    .relocate(index, to)
                    .ok_or(CommandError::UnknownAgent { species, index })?;
                Ok(Event::AgentMoved {
                    species,
                    index,
                    from,
                    to,
                })
            }
            Command::Tick => {
                self.tick_index = self.tick_index.saturating_add(1);
                Ok(Event::TimeAdvanced {
                    tick: self.tick_index,
                })
            }
            Command::Reset => {
                self.grid.clear();
                self.zombies.clear();
                self.humans.clear();
                self.tick_index = 0;
                Ok(Event::WorldCleared)
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that fail validation leave the world untouched and are reported
/// through [`Event::CommandRejected`].
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    let event = match world.execute(command.clone()) {
        Ok(event) => {
            debug!(?command, "applied command");
            event
        }
        Err(reason) => {
            debug!(?command, %reason, "rejected command");
            Event::CommandRejected { reason }
        }
    };
    out_events.push(event);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::slice;

    use super::{compute_distance_field, DistanceField, Grid, Population, World};
    use outbreak_core::{CellCoord, Species};

    /// Provides read-only access to the obstacle grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Provides read-only access to one of the two populations.
    #[must_use]
    pub fn population(world: &World, species: Species) -> &Population {
        world.population(species)
    }

    /// Number of ticks completed since the grid was last configured or reset.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures an owned copy of a population's current positions.
    #[must_use]
    pub fn population_view(world: &World, species: Species) -> PopulationView {
        PopulationView {
            species,
            cells: world.population(species).as_slice().to_vec(),
        }
    }

    /// Computes the distance field seeded by the provided population.
    #[must_use]
    pub fn distance_field(world: &World, species: Species) -> DistanceField {
        compute_distance_field(&world.grid, world.population(species).as_slice())
    }

    /// Read-only snapshot of a population taken at a single instant.
    ///
    /// The snapshot does not observe later world mutations, so systems that
    /// plan against it see every agent at its pre-tick position.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct PopulationView {
        species: Species,
        cells: Vec<CellCoord>,
    }

    impl PopulationView {
        /// Creates a view from explicit positions.
        #[must_use]
        pub fn from_cells(species: Species, cells: Vec<CellCoord>) -> Self {
            Self { species, cells }
        }

        /// Population the snapshot was taken from.
        #[must_use]
        pub const fn species(&self) -> Species {
            self.species
        }

        /// Iterator over captured positions in insertion order.
        pub fn iter(&self) -> slice::Iter<'_, CellCoord> {
            self.cells.iter()
        }

        /// Captured positions in insertion order.
        #[must_use]
        pub fn as_slice(&self) -> &[CellCoord] {
            &self.cells
        }

        /// Number of agents captured.
        #[must_use]
        pub fn len(&self) -> usize {
            self.cells.len()
        }

        /// Reports whether the snapshot holds no agents.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.cells.is_empty()
        }

        /// Consumes the view, yielding the underlying positions.
        #[must_use]
        pub fn into_vec(self) -> Vec<CellCoord> {
            self.cells
        }
    }
}

/// Convenience helper that builds a [`Command::AddAgent`] for the species.
#[must_use]
pub const fn add_agent(species: Species, cell: CellCoord) -> Command {
    Command::AddAgent { species, cell }
}
