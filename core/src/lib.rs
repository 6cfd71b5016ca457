#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Outbreak simulation.
//!
//! This crate defines the message surface that connects drivers, the
//! authoritative world, and pure systems. Drivers and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what actually changed. Systems read immutable snapshots and
//! respond exclusively with new command batches.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the grid with an empty one of the provided dimensions.
    ///
    /// Both populations are discarded alongside the previous grid.
    ConfigureGrid {
        /// Number of rows in the new grid.
        height: u32,
        /// Number of columns in the new grid.
        width: u32,
    },
    /// Marks a single cell as an impassable obstacle.
    PlaceObstacle {
        /// Cell that becomes blocked.
        cell: CellCoord,
    },
    /// Registers a new agent at the end of its species' population.
    AddAgent {
        /// Population that receives the agent.
        species: Species,
        /// Cell the agent starts on.
        cell: CellCoord,
    },
    /// Relocates an existing agent to a new cell.
    MoveAgent {
        /// Population that owns the agent.
        species: Species,
        /// Insertion index of the agent within its population.
        index: usize,
        /// Destination cell.
        to: CellCoord,
    },
    /// Advances the simulation clock by one tick.
    Tick,
    /// Empties every grid cell and both populations and rewinds the clock.
    Reset,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a fresh grid replaced the previous one.
    GridConfigured {
        /// Number of rows in the grid.
        height: u32,
        /// Number of columns in the grid.
        width: u32,
    },
    /// Confirms that a cell became an obstacle.
    ObstaclePlaced {
        /// Cell that is now blocked.
        cell: CellCoord,
    },
    /// Confirms that an agent joined a population.
    AgentAdded {
        /// Population the agent joined.
        species: Species,
        /// Insertion index assigned to the agent.
        index: usize,
        /// Cell the agent occupies.
        cell: CellCoord,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Number of ticks completed, including this one.
        tick: u64,
    },
    /// Confirms that an agent moved between two cells.
    AgentMoved {
        /// Population that owns the agent.
        species: Species,
        /// Insertion index of the agent.
        index: usize,
        /// Cell the agent occupied before moving.
        from: CellCoord,
        /// Cell the agent occupies after moving.
        to: CellCoord,
    },
    /// Confirms that the grid and both populations were emptied.
    WorldCleared,
    /// Reports that a command was not applied.
    CommandRejected {
        /// Specific reason the command failed.
        reason: CommandError,
    },
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.row().abs_diff(other.row()) + self.column().abs_diff(other.column())
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The two agent populations that inhabit the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    /// Pursuers that step orthogonally toward the nearest human.
    Zombie,
    /// Evaders that step in any direction away from the nearest zombie.
    Human,
}

impl Species {
    /// Population whose distance field this species consults when moving.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Zombie => Self::Human,
            Self::Human => Self::Zombie,
        }
    }

    /// Neighborhood this species may step into during a tick.
    #[must_use]
    pub const fn neighborhood(self) -> Neighborhood {
        match self {
            Self::Zombie => Neighborhood::FourWay,
            Self::Human => Neighborhood::EightWay,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zombie => f.write_str("zombie"),
            Self::Human => f.write_str("human"),
        }
    }
}

/// Set of cells considered adjacent to a given cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    /// Orthogonal neighbors only.
    FourWay,
    /// Orthogonal and diagonal neighbors.
    EightWay,
}

/// Binary state of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupancy {
    /// Cell can be traversed and occupied by agents.
    #[default]
    Empty,
    /// Cell blocks movement and distance propagation.
    Obstacle,
}

/// Failures raised by grid queries and mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum GridError {
    /// The coordinate lies outside `[0, height) x [0, width)`.
    #[error("cell {cell} lies outside the {height}x{width} grid")]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
        /// Number of rows in the grid.
        height: u32,
        /// Number of columns in the grid.
        width: u32,
    },
}

/// Reasons a command may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum CommandError {
    /// The command referenced a coordinate outside the grid.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The destination of a move is an obstacle.
    #[error("cell {cell} is blocked by an obstacle")]
    Blocked {
        /// Obstacle cell named by the command.
        cell: CellCoord,
    },
    /// No agent exists at the provided insertion index.
    #[error("no {species} registered at index {index}")]
    UnknownAgent {
        /// Population that was searched.
        species: Species,
        /// Index that was requested.
        index: usize,
    },
}
