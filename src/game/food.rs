//! Food lifecycle: timed spawning, expiry of the oldest item, consumption.

use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::grid::{Cell, Grid};
use crate::error::GameError;

/// Above this share of taken cells, pick from the free list instead of sampling
const DENSE_OCCUPANCY: f64 = 0.8;

/// A food item and the instant it appeared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
    pub spawned_at: Instant,
}

impl Food {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.spawned_at)
    }
}

/// Active food, oldest first.
///
/// Foods are only ever appended, so insertion order is also age order and
/// expiry only needs to look at the front.
pub struct FoodManager {
    grid: Grid,
    foods: VecDeque<Food>,
    rng: StdRng,
}

impl FoodManager {
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn with_seed(grid: Grid, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(grid: Grid, rng: StdRng) -> Self {
        Self {
            grid,
            foods: VecDeque::new(),
            rng,
        }
    }

    /// Append a food on a random cell that is neither in `occupied` nor
    /// already food.
    pub fn spawn(&mut self, occupied: &[Cell], now: Instant) -> Result<Food, GameError> {
        let cell = self.pick_free_cell(occupied)?;
        let food = Food {
            cell,
            spawned_at: now,
        };
        self.foods.push_back(food);
        tracing::debug!(x = cell.x, y = cell.y, active = self.foods.len(), "food spawned");
        Ok(food)
    }

    /// Spawn-cadence entry point: adds exactly one food
    pub fn tick_spawn(&mut self, occupied: &[Cell], now: Instant) -> Result<Food, GameError> {
        self.spawn(occupied, now)
    }

    /// Put a food on a chosen cell, under the same uniqueness rule as `spawn`
    pub fn place(&mut self, cell: Cell, occupied: &[Cell], now: Instant) -> Result<Food, GameError> {
        if !self.grid.contains(cell) || occupied.contains(&cell) || self.contains(cell) {
            return Err(GameError::CellOccupied(cell));
        }
        let food = Food {
            cell,
            spawned_at: now,
        };
        self.foods.push_back(food);
        Ok(food)
    }

    /// Remove the first food on `cell`. Returns whether one was removed.
    pub fn consume(&mut self, cell: Cell) -> bool {
        match self.foods.iter().position(|food| food.cell == cell) {
            Some(index) => {
                self.foods.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove the oldest food if it has lived for at least `ttl`.
    ///
    /// Only the front is checked, so at most one food goes per call.
    pub fn expire_oldest(&mut self, now: Instant, ttl: Duration) -> Option<Food> {
        let oldest = self.foods.front()?;
        if oldest.age(now) >= ttl {
            let expired = self.foods.pop_front();
            if let Some(food) = &expired {
                tracing::debug!(x = food.cell.x, y = food.cell.y, "food expired");
            }
            expired
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.foods.clear();
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.foods.iter().any(|food| food.cell == cell)
    }

    pub fn oldest(&self) -> Option<&Food> {
        self.foods.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.foods.iter()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    fn pick_free_cell(&mut self, occupied: &[Cell]) -> Result<Cell, GameError> {
        let taken: HashSet<Cell> = occupied
            .iter()
            .copied()
            .chain(self.foods.iter().map(|food| food.cell))
            .filter(|cell| self.grid.contains(*cell))
            .collect();

        let total = self.grid.cell_count();
        if taken.len() >= total {
            return Err(GameError::NoSpaceAvailable);
        }

        if (taken.len() as f64) <= total as f64 * DENSE_OCCUPANCY {
            for _ in 0..total {
                let cell = Cell::new(
                    self.rng.gen_range(0..self.grid.width()) as i32,
                    self.rng.gen_range(0..self.grid.height()) as i32,
                );
                if !taken.contains(&cell) {
                    return Ok(cell);
                }
            }
        }

        let free: Vec<Cell> = self
            .grid
            .cells()
            .filter(|cell| !taken.contains(cell))
            .collect();
        free.choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoSpaceAvailable)
    }
}
