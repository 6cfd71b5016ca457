//! FIFO work queue driving breadth-first expansion.

use std::collections::{vec_deque, VecDeque};

use outbreak_core::CellCoord;

/// Ordered set of cells awaiting neighbor expansion.
///
/// Iteration borrows the queue, so inspecting the frontier never consumes it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frontier {
    cells: VecDeque<CellCoord>,
}

impl Frontier {
    /// Creates an empty frontier able to hold `capacity` cells without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends a cell to the back of the queue.
    pub fn enqueue(&mut self, cell: CellCoord) {
        self.cells.push_back(cell);
    }

    /// Removes and returns the oldest queued cell.
    pub fn dequeue(&mut self) -> Option<CellCoord> {
        self.cells.pop_front()
    }

    /// Number of queued cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the queue is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the queued cells from front to back.
    pub fn iter(&self) -> vec_deque::Iter<'_, CellCoord> {
        self.cells.iter()
    }

    /// Drops every queued cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl<'a> IntoIterator for &'a Frontier {
    type Item = &'a CellCoord;
    type IntoIter = vec_deque::Iter<'a, CellCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<CellCoord> for Frontier {
    fn from_iter<I: IntoIterator<Item = CellCoord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
