//! Multi-source breadth-first distance fields.

use outbreak_core::{CellCoord, Neighborhood};
use tracing::trace;

use crate::{frontier::Frontier, grid::Grid};

/// Dense hop-count grid seeded from a population of source cells.
///
/// Each entry holds the length of the shortest 4-connected, obstacle-avoiding
/// path to the nearest source. Cells no source can reach, obstacles included,
/// keep the sentinel value, which equals the grid area and therefore exceeds
/// every real path length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistanceField {
    height: u32,
    width: u32,
    sentinel: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Number of rows covered by the field.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of columns covered by the field.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Distance stored for unreachable cells.
    #[must_use]
    pub const fn sentinel(&self) -> u32 {
        self.sentinel
    }

    /// Dense distances stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u32] {
        &self.distances
    }

    /// Distance captured for the provided cell, if it lies within the field.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u32> {
        if cell.row() >= self.height || cell.column() >= self.width {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        index(width, cell).and_then(|offset| self.distances.get(offset).copied())
    }

    /// Reports whether some source reaches the cell.
    #[must_use]
    pub fn is_reachable(&self, cell: CellCoord) -> bool {
        self.distance(cell)
            .map_or(false, |distance| distance < self.sentinel)
    }
}

/// Computes the distance field of `sources` over `grid`.
///
/// Duplicate sources are seeded once and sources outside the grid are
/// ignored. An empty source list produces a field filled with the sentinel.
#[must_use]
pub fn compute_distance_field(grid: &Grid, sources: &[CellCoord]) -> DistanceField {
    let sentinel = grid.height().saturating_mul(grid.width());
    let mut field = DistanceField {
        height: grid.height(),
        width: grid.width(),
        sentinel,
        distances: vec![sentinel; grid.area()],
    };

    if field.distances.is_empty() {
        return field;
    }

    let mut frontier = Frontier::with_capacity(sources.len());

    for &source in sources {
        let Some(index) = grid.index(source) else {
            continue;
        };

        if field.distances[index] == 0 {
            continue;
        }

        field.distances[index] = 0;
        frontier.enqueue(source);
    }

    trace!(seeds = frontier.len(), "seeded distance field");

    while let Some(cell) = frontier.dequeue() {
        let Some(current_index) = grid.index(cell) else {
            continue;
        };
        let next_distance = field.distances[current_index] + 1;

        for neighbor in grid.neighbors_within(cell, Neighborhood::FourWay) {
            if !grid.is_open(neighbor) {
                continue;
            }

            let Some(neighbor_index) = grid.index(neighbor) else {
                continue;
            };

            if field.distances[neighbor_index] != sentinel {
                continue;
            }

            field.distances[neighbor_index] = next_distance;
            frontier.enqueue(neighbor);
        }
    }

    field
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}
