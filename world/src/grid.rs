//! Fixed-size occupancy grid with boundary-clipped neighbor enumeration.

use outbreak_core::{CellCoord, GridError, Neighborhood, Occupancy};

/// Row and column offsets of the orthogonal neighbors: north, south, west, east.
const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Row and column offsets of the diagonal neighbors: north-west, north-east,
/// south-west, south-east.
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Dense row-major occupancy map of a bounded rectangular grid.
///
/// The dimensions are fixed when the grid is created. Every coordinate handed
/// out by the neighbor queries lies inside `[0, height) x [0, width)`; callers
/// that pass coordinates outside that range receive [`GridError::OutOfBounds`]
/// instead of a clamped answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    height: u32,
    width: u32,
    cells: Vec<Occupancy>,
}

impl Grid {
    /// Creates a grid of the provided dimensions with every cell empty.
    #[must_use]
    pub fn new(height: u32, width: u32) -> Self {
        let capacity_u64 = u64::from(height) * u64::from(width);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            height,
            width,
            cells: vec![Occupancy::Empty; capacity],
        }
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row() < self.height && cell.column() < self.width
    }

    /// Marks the cell as an obstacle.
    pub fn set_obstacle(&mut self, cell: CellCoord) -> Result<(), GridError> {
        let index = self.checked_index(cell)?;
        self.cells[index] = Occupancy::Obstacle;
        Ok(())
    }

    /// Reports whether the cell is free of obstacles.
    pub fn is_empty(&self, cell: CellCoord) -> Result<bool, GridError> {
        let index = self.checked_index(cell)?;
        Ok(self.cells[index] == Occupancy::Empty)
    }

    /// Orthogonal neighbors of the cell in north, south, west, east order.
    pub fn four_neighbors(&self, cell: CellCoord) -> Result<Neighbors, GridError> {
        self.neighbors(cell, Neighborhood::FourWay)
    }

    /// Orthogonal neighbors followed by the diagonal ones.
    pub fn eight_neighbors(&self, cell: CellCoord) -> Result<Neighbors, GridError> {
        self.neighbors(cell, Neighborhood::EightWay)
    }

    /// Neighbors of the cell under the requested connectivity.
    pub fn neighbors(
        &self,
        cell: CellCoord,
        neighborhood: Neighborhood,
    ) -> Result<Neighbors, GridError> {
        let _ = self.checked_index(cell)?;
        Ok(self.neighbors_within(cell, neighborhood))
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Occupancy::Empty);
    }

    /// Dense occupancy values stored in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Occupancy] {
        &self.cells
    }

    /// Iterates over obstacle cells in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupancy)| **occupancy == Occupancy::Obstacle)
            .filter_map(move |(index, _)| cell_at(index, width))
    }

    /// Row-major offset of the cell, if it lies inside the grid.
    pub(crate) fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Reports whether the cell lies inside the grid and is not an obstacle.
    pub(crate) fn is_open(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .map_or(false, |occupancy| *occupancy == Occupancy::Empty)
    }

    /// Neighbor enumeration for a cell already known to be inside the grid.
    pub(crate) fn neighbors_within(
        &self,
        cell: CellCoord,
        neighborhood: Neighborhood,
    ) -> Neighbors {
        let mut neighbors = Neighbors::default();

        for (row_delta, column_delta) in ORTHOGONAL_OFFSETS {
            if let Some(neighbor) = self.offset(cell, row_delta, column_delta) {
                neighbors.push(neighbor);
            }
        }

        if neighborhood == Neighborhood::EightWay {
            for (row_delta, column_delta) in DIAGONAL_OFFSETS {
                if let Some(neighbor) = self.offset(cell, row_delta, column_delta) {
                    neighbors.push(neighbor);
                }
            }
        }

        neighbors
    }

    fn offset(&self, cell: CellCoord, row_delta: i32, column_delta: i32) -> Option<CellCoord> {
        let row = cell.row().checked_add_signed(row_delta)?;
        let column = cell.column().checked_add_signed(column_delta)?;
        let neighbor = CellCoord::new(row, column);
        self.contains(neighbor).then_some(neighbor)
    }

    fn checked_index(&self, cell: CellCoord) -> Result<usize, GridError> {
        self.index(cell).ok_or(GridError::OutOfBounds {
            cell,
            height: self.height,
            width: self.width,
        })
    }
}

fn cell_at(index: usize, width: u32) -> Option<CellCoord> {
    let width = usize::try_from(width).ok()?;
    if width == 0 {
        return None;
    }

    let row = u32::try_from(index / width).ok()?;
    let column = u32::try_from(index % width).ok()?;
    Some(CellCoord::new(row, column))
}

/// Fixed-capacity iterator over up to eight neighboring cells.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    buffer: [Option<CellCoord>; 8],
    len: usize,
    cursor: usize,
}

impl Neighbors {
    fn push(&mut self, cell: CellCoord) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = Some(cell);
            self.len += 1;
        }
    }
}

impl Iterator for Neighbors {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.len {
            return None;
        }

        let value = self.buffer[self.cursor];
        self.cursor += 1;
        value
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Neighbors {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(neighbors: Result<Neighbors, GridError>) -> Vec<CellCoord> {
        neighbors.expect("cell inside grid").collect()
    }

    #[test]
    fn new_grid_starts_empty() {
        let grid = Grid::new(3, 4);

        assert_eq!(grid.area(), 12);
        assert!(grid.cells().iter().all(|cell| *cell == Occupancy::Empty));
        assert_eq!(grid.obstacles().count(), 0);
    }

    #[test]
    fn obstacles_are_reported_in_row_major_order() {
        let mut grid = Grid::new(3, 3);
        grid.set_obstacle(CellCoord::new(2, 0)).expect("in bounds");
        grid.set_obstacle(CellCoord::new(0, 2)).expect("in bounds");

        assert_eq!(grid.is_empty(CellCoord::new(2, 0)), Ok(false));
        assert_eq!(grid.is_empty(CellCoord::new(1, 1)), Ok(true));
        assert_eq!(
            grid.obstacles().collect::<Vec<_>>(),
            vec![CellCoord::new(0, 2), CellCoord::new(2, 0)]
        );
    }

    #[test]
    fn out_of_bounds_access_is_rejected() {
        let mut grid = Grid::new(2, 3);
        let outside = CellCoord::new(2, 0);
        let expected = GridError::OutOfBounds {
            cell: outside,
            height: 2,
            width: 3,
        };

        assert_eq!(grid.set_obstacle(outside), Err(expected));
        assert_eq!(grid.is_empty(outside), Err(expected));
        assert!(grid.four_neighbors(outside).is_err());
        assert!(grid.eight_neighbors(CellCoord::new(0, 3)).is_err());
    }

    #[test]
    fn four_neighbors_follow_fixed_rotation() {
        let grid = Grid::new(3, 3);

        assert_eq!(
            collect(grid.four_neighbors(CellCoord::new(1, 1))),
            vec![
                CellCoord::new(0, 1),
                CellCoord::new(2, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 2),
            ]
        );
    }

    #[test]
    fn four_neighbors_clip_at_corners() {
        let grid = Grid::new(3, 3);

        assert_eq!(
            collect(grid.four_neighbors(CellCoord::new(0, 0))),
            vec![CellCoord::new(1, 0), CellCoord::new(0, 1)]
        );
        assert_eq!(
            collect(grid.four_neighbors(CellCoord::new(2, 2))),
            vec![CellCoord::new(1, 2), CellCoord::new(2, 1)]
        );
    }

    #[test]
    fn eight_neighbors_append_diagonals() {
        let grid = Grid::new(3, 3);

        assert_eq!(
            collect(grid.eight_neighbors(CellCoord::new(1, 1))),
            vec![
                CellCoord::new(0, 1),
                CellCoord::new(2, 1),
                CellCoord::new(1, 0),
                CellCoord::new(1, 2),
                CellCoord::new(0, 0),
                CellCoord::new(0, 2),
                CellCoord::new(2, 0),
                CellCoord::new(2, 2),
            ]
        );
        assert_eq!(grid.eight_neighbors(CellCoord::new(0, 0)).map(|n| n.len()), Ok(3));
        assert_eq!(grid.eight_neighbors(CellCoord::new(0, 1)).map(|n| n.len()), Ok(5));
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let grid = Grid::new(1, 1);

        assert!(collect(grid.eight_neighbors(CellCoord::new(0, 0))).is_empty());
    }

    #[test]
    fn clear_removes_every_obstacle() {
        let mut grid = Grid::new(2, 2);
        grid.set_obstacle(CellCoord::new(0, 0)).expect("in bounds");
        grid.set_obstacle(CellCoord::new(1, 1)).expect("in bounds");

        grid.clear();

        assert_eq!(grid.obstacles().count(), 0);
        assert_eq!(grid.area(), 4);
    }
}
