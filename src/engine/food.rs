use super::grid::{Coordinate, Grid};
use crate::consts;
use log::warn;
use rand::Rng;
use std::collections::HashSet;

/// Picks random cells for new food to appear in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FoodSpawner {
    max_attempts: usize,
}

impl FoodSpawner {
    /// Create a spawner that gives up looking for a free cell after
    /// `max_attempts` samples (at least one sample is always taken)
    pub fn new(max_attempts: usize) -> FoodSpawner {
        FoodSpawner {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Sample cells of `grid` uniformly at random until one not in `occupied`
    /// turns up.
    ///
    /// If no free cell is found within the attempt cap, the last cell sampled
    /// is returned even though it is occupied.  This keeps a nearly-full board
    /// from stalling the game.
    pub fn spawn_one<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grid: Grid,
        occupied: &HashSet<Coordinate>,
    ) -> Coordinate {
        let mut pos = grid.random_cell(rng);
        let mut attempts = 1;
        while occupied.contains(&pos) {
            if attempts >= self.max_attempts {
                warn!(
                    "No free cell found for food after {attempts} attempts; placing it at occupied cell {pos}"
                );
                break;
            }
            pos = grid.random_cell(rng);
            attempts += 1;
        }
        pos
    }

    /// Spawn `count` pieces of food, treating each new piece as occupied for
    /// the ones after it so that the batch does not double up.
    pub fn spawn_many<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grid: Grid,
        occupied: &HashSet<Coordinate>,
        count: usize,
    ) -> Vec<Coordinate> {
        let mut occupied = occupied.clone();
        let mut batch = Vec::with_capacity(count);
        for _ in 0..count {
            let pos = self.spawn_one(rng, grid, &occupied);
            occupied.insert(pos);
            batch.push(pos);
        }
        batch
    }
}

impl Default for FoodSpawner {
    fn default() -> FoodSpawner {
        FoodSpawner::new(consts::MAX_SPAWN_ATTEMPTS)
    }
}
