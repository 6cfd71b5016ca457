//! Ordered storage for agent positions.

use std::slice;

use outbreak_core::CellCoord;

/// Agent positions kept in insertion order.
///
/// Zombies and humans are two instances of this store. Several agents may
/// share a cell; an agent is identified by its insertion index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Population {
    cells: Vec<CellCoord>,
}

impl Population {
    /// Appends an agent and returns its insertion index.
    pub fn push(&mut self, cell: CellCoord) -> usize {
        self.cells.push(cell);
        self.cells.len() - 1
    }

    /// Number of agents in the population.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the population has no agents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Position of the agent at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CellCoord> {
        self.cells.get(index).copied()
    }

    /// Iterates over agent positions in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, CellCoord> {
        self.cells.iter()
    }

    /// Agent positions in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Moves the agent at `index`, returning the cell it left.
    pub fn relocate(&mut self, index: usize, to: CellCoord) -> Option<CellCoord> {
        let slot = self.cells.get_mut(index)?;
        Some(std::mem::replace(slot, to))
    }

    /// Removes every agent.
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a CellCoord;
    type IntoIter = slice::Iter<'a, CellCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_insertion_order() {
        let mut population = Population::default();

        assert_eq!(population.push(CellCoord::new(2, 2)), 0);
        assert_eq!(population.push(CellCoord::new(0, 1)), 1);
        assert_eq!(population.push(CellCoord::new(2, 2)), 2);

        assert_eq!(
            population.iter().copied().collect::<Vec<_>>(),
            vec![
                CellCoord::new(2, 2),
                CellCoord::new(0, 1),
                CellCoord::new(2, 2)
            ]
        );
        assert_eq!(population.len(), 3);
    }

    #[test]
    fn relocate_updates_only_the_addressed_slot() {
        let mut population = Population::default();
        let _ = population.push(CellCoord::new(0, 0));
        let _ = population.push(CellCoord::new(1, 1));

        assert_eq!(
            population.relocate(1, CellCoord::new(1, 2)),
            Some(CellCoord::new(1, 1))
        );
        assert_eq!(population.get(0), Some(CellCoord::new(0, 0)));
        assert_eq!(population.get(1), Some(CellCoord::new(1, 2)));
        assert_eq!(population.relocate(2, CellCoord::new(0, 0)), None);
    }

    #[test]
    fn clear_removes_all_agents() {
        let mut population = Population::default();
        let _ = population.push(CellCoord::new(4, 4));

        population.clear();

        assert!(population.is_empty());
        assert_eq!(population.get(0), None);
    }
}
