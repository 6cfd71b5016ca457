#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy pursuit and flight system that proposes one step per agent per tick.
//!
//! Zombies step orthogonally toward the nearest human; humans step in any of
//! eight directions away from the nearest zombie. Both fields are computed
//! from the population snapshots handed to [`Pursuit::handle`], so no agent's
//! decision depends on another agent's move in the same tick.

use std::cmp::Ordering;

use outbreak_core::{CellCoord, Command, Event, Species};
use outbreak_world::{compute_distance_field, query::PopulationView, DistanceField, Grid};
use rand::{seq::SliceRandom, Rng};
use tracing::trace;

/// Pure system that reacts to clock events and emits move commands.
#[derive(Debug, Default)]
pub struct Pursuit {
    candidates: Vec<CellCoord>,
}

impl Pursuit {
    /// Plans one step for every agent when the events contain a clock advance.
    ///
    /// Zombie moves are emitted before human moves, each in insertion order,
    /// and ties are broken with draws from `rng` in that same order. Agents
    /// whose best option is to stay emit no command.
    pub fn handle<R>(
        &mut self,
        events: &[Event],
        grid: &Grid,
        zombies: &PopulationView,
        humans: &PopulationView,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        let human_field = compute_distance_field(grid, humans.as_slice());
        let zombie_field = compute_distance_field(grid, zombies.as_slice());

        for agents in [zombies, humans] {
            let opposing_field = match agents.species().opponent() {
                Species::Zombie => &zombie_field,
                Species::Human => &human_field,
            };
            self.emit_moves(agents, grid, opposing_field, rng, out);
        }
    }

    fn emit_moves<R>(
        &mut self,
        agents: &PopulationView,
        grid: &Grid,
        opposing_field: &DistanceField,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        let species = agents.species();

        for (index, &cell) in agents.iter().enumerate() {
            let Some(destination) = self.choose_step(species, cell, grid, opposing_field, rng)
            else {
                continue;
            };

            if destination == cell {
                continue;
            }

            trace!(%species, index, from = %cell, to = %destination, "proposed step");
            out.push(Command::MoveAgent {
                species,
                index,
                to: destination,
            });
        }
    }

    /// Picks the agent's next cell among its current cell and open neighbors.
    fn choose_step<R>(
        &mut self,
        species: Species,
        cell: CellCoord,
        grid: &Grid,
        opposing_field: &DistanceField,
        rng: &mut R,
    ) -> Option<CellCoord>
    where
        R: Rng + ?Sized,
    {
        let neighbors = grid.neighbors(cell, species.neighborhood()).ok()?;
        let mut best = opposing_field.distance(cell)?;

        self.candidates.clear();
        self.candidates.push(cell);

        for neighbor in neighbors {
            if grid.is_empty(neighbor) != Ok(true) {
                continue;
            }

            let Some(distance) = opposing_field.distance(neighbor) else {
                continue;
            };

            match preference(species, distance, best) {
                Ordering::Greater => {
                    best = distance;
                    self.candidates.clear();
                    self.candidates.push(neighbor);
                }
                Ordering::Equal => self.candidates.push(neighbor),
                Ordering::Less => {}
            }
        }

        match self.candidates.as_slice() {
            [] => None,
            [only] => Some(*only),
            candidates => candidates.choose(rng).copied(),
        }
    }
}

/// Ranks `candidate` against `best`; `Greater` means the candidate is preferred.
fn preference(species: Species, candidate: u32, best: u32) -> Ordering {
    match species {
        Species::Zombie => best.cmp(&candidate),
        Species::Human => candidate.cmp(&best),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn field_for(grid: &Grid, sources: &[CellCoord]) -> DistanceField {
        compute_distance_field(grid, sources)
    }

    #[test]
    fn zombies_prefer_smaller_distances() {
        assert_eq!(preference(Species::Zombie, 2, 5), Ordering::Greater);
        assert_eq!(preference(Species::Zombie, 5, 2), Ordering::Less);
        assert_eq!(preference(Species::Zombie, 3, 3), Ordering::Equal);
    }

    #[test]
    fn humans_prefer_larger_distances() {
        assert_eq!(preference(Species::Human, 5, 2), Ordering::Greater);
        assert_eq!(preference(Species::Human, 2, 5), Ordering::Less);
    }

    #[test]
    fn zombie_steps_down_the_gradient() {
        let grid = Grid::new(3, 3);
        let humans = field_for(&grid, &[CellCoord::new(2, 2)]);
        let mut pursuit = Pursuit::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let step =
            pursuit.choose_step(Species::Zombie, CellCoord::new(2, 0), &grid, &humans, &mut rng);

        assert_eq!(step, Some(CellCoord::new(2, 1)));
    }

    #[test]
    fn zombie_never_steps_diagonally() {
        let grid = Grid::new(2, 2);
        let humans = field_for(&grid, &[CellCoord::new(1, 1)]);
        let mut pursuit = Pursuit::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..16 {
            let step = pursuit
                .choose_step(Species::Zombie, CellCoord::new(0, 0), &grid, &humans, &mut rng)
                .expect("agent inside grid");
            assert_eq!(step.manhattan_distance(CellCoord::new(0, 0)), 1);
        }
    }

    #[test]
    fn human_takes_diagonal_escape() {
        let grid = Grid::new(3, 3);
        let zombies = field_for(&grid, &[CellCoord::new(0, 0)]);
        let mut pursuit = Pursuit::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let step =
            pursuit.choose_step(Species::Human, CellCoord::new(1, 1), &grid, &zombies, &mut rng);

        assert_eq!(step, Some(CellCoord::new(2, 2)));
    }

    #[test]
    fn forced_steps_leave_the_random_stream_untouched() {
        let grid = Grid::new(1, 5);
        let humans = field_for(&grid, &[CellCoord::new(0, 4)]);
        let mut pursuit = Pursuit::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let step =
            pursuit.choose_step(Species::Zombie, CellCoord::new(0, 0), &grid, &humans, &mut rng);

        assert_eq!(step, Some(CellCoord::new(0, 1)));
        assert_eq!(rng.next_u64(), ChaCha8Rng::seed_from_u64(42).next_u64());
    }

    #[test]
    fn ties_are_drawn_from_the_whole_candidate_set() {
        let grid = Grid::new(3, 3);
        let humans = field_for(&grid, &[CellCoord::new(2, 2)]);
        let mut pursuit = Pursuit::default();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut seen = Vec::new();

        for _ in 0..64 {
            let step = pursuit
                .choose_step(Species::Zombie, CellCoord::new(1, 1), &grid, &humans, &mut rng)
                .expect("agent inside grid");
            if !seen.contains(&step) {
                seen.push(step);
            }
        }
        seen.sort();

        assert_eq!(seen, vec![CellCoord::new(1, 2), CellCoord::new(2, 1)]);
    }

    #[test]
    fn obstacles_are_never_entered() {
        let mut grid = Grid::new(1, 3);
        grid.set_obstacle(CellCoord::new(0, 1)).expect("in bounds");
        let humans = field_for(&grid, &[CellCoord::new(0, 2)]);
        let mut pursuit = Pursuit::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let step =
            pursuit.choose_step(Species::Zombie, CellCoord::new(0, 0), &grid, &humans, &mut rng);

        assert_eq!(step, Some(CellCoord::new(0, 0)));
    }

    #[test]
    fn agents_outside_the_grid_are_skipped() {
        let grid = Grid::new(2, 2);
        let humans = field_for(&grid, &[CellCoord::new(0, 0)]);
        let mut pursuit = Pursuit::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let step =
            pursuit.choose_step(Species::Zombie, CellCoord::new(4, 4), &grid, &humans, &mut rng);

        assert_eq!(step, None);
    }

    #[test]
    fn handle_ignores_batches_without_clock_events() {
        let grid = Grid::new(1, 3);
        let zombies = PopulationView::from_cells(Species::Zombie, vec![CellCoord::new(0, 0)]);
        let humans = PopulationView::from_cells(Species::Human, vec![CellCoord::new(0, 2)]);
        let mut pursuit = Pursuit::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut commands = Vec::new();

        pursuit.handle(&[], &grid, &zombies, &humans, &mut rng, &mut commands);

        assert!(commands.is_empty());
    }
}
