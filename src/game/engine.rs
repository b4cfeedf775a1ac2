use std::collections::HashSet;
use std::time::Instant;

use super::{
    action::{Direction, DirectionController},
    config::GameConfig,
    food::FoodManager,
    grid::{Cell, Grid},
    snake::Snake,
    state::{RoundState, Snapshot},
};
use crate::error::GameError;

/// What a movement tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved without eating
    Moved,
    /// The snake ate and grew; `score` is the new round score
    Fed { score: u32 },
    /// The head ran into the body. The round has already been reset when
    /// this is returned.
    RoundOver { final_score: u32, length: usize },
}

/// The game engine that owns the round and handles all game logic.
///
/// Timers and input never touch the round directly: each cadence calls one
/// method here and that method runs to completion.
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    state: RoundState,
    round: u64,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig, now: Instant) -> Result<Self, GameError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        Ok(Self::start(config, grid, FoodManager::new(grid), now))
    }

    /// Like [`new`](Self::new), with food placement driven by a fixed seed
    pub fn with_seed(config: GameConfig, seed: u64, now: Instant) -> Result<Self, GameError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        Ok(Self::start(
            config,
            grid,
            FoodManager::with_seed(grid, seed),
            now,
        ))
    }

    /// Resume from an arbitrary round, e.g. a hand-built position
    pub fn from_round(config: GameConfig, state: RoundState) -> Result<Self, GameError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        if state.snake.is_empty() {
            return Err(GameError::invalid("snake", "body must not be empty"));
        }

        let mut body = HashSet::with_capacity(state.snake.len());
        for cell in state.snake.cells() {
            if !grid.contains(*cell) {
                return Err(GameError::invalid(
                    "snake",
                    format!("cell {cell} lies outside the grid"),
                ));
            }
            if !body.insert(*cell) {
                return Err(GameError::invalid(
                    "snake",
                    format!("cell {cell} appears twice in the body"),
                ));
            }
        }

        if let Some(food) = state.foods.iter().find(|food| body.contains(&food.cell)) {
            return Err(GameError::invalid(
                "foods",
                format!("food at {} lies under the snake", food.cell),
            ));
        }
        Ok(Self {
            config,
            grid,
            state,
            round: 1,
        })
    }

    fn start(
        config: GameConfig,
        grid: Grid,
        foods: FoodManager,
        now: Instant,
    ) -> Self {
        let mut engine = Self {
            config,
            grid,
            state: RoundState::new(Snake::starting(&grid), Direction::Right, foods),
            round: 1,
        };
        engine.seed_food(now);
        engine
    }

    /// Advance the snake one cell and settle collision, feeding and reset
    pub fn apply_tick(&mut self, now: Instant) -> TickOutcome {
        let heading = self.state.heading.snapshot();
        let new_head = self.grid.wrap(self.state.snake.head(), heading);

        if self.state.snake.occupies(new_head) {
            let final_score = self.state.score.value();
            let length = self.state.snake.len();
            tracing::info!(
                round = self.round,
                final_score,
                length,
                x = new_head.x,
                y = new_head.y,
                "self collision, round over"
            );
            self.reset_round(now);
            return TickOutcome::RoundOver {
                final_score,
                length,
            };
        }

        let ate_food = self.state.foods.contains(new_head);
        self.state.snake = self.state.snake.advanced(new_head, ate_food);

        if ate_food {
            self.state.score.increment();
            self.state.foods.consume(new_head);
            let score = self.state.score.value();
            tracing::debug!(score, length = self.state.snake.len(), "food eaten");
            return TickOutcome::Fed { score };
        }

        TickOutcome::Moved
    }

    /// Spawn-cadence step. Returns the new food cell, or `None` when the
    /// board is full and the spawn was skipped.
    pub fn spawn_tick(&mut self, now: Instant) -> Option<Cell> {
        match self.state.foods.tick_spawn(self.state.snake.cells(), now) {
            Ok(food) => Some(food.cell),
            Err(err) => {
                tracing::warn!(%err, "skipping food spawn");
                None
            }
        }
    }

    /// Expiry-cadence step. Returns the cell of the food that expired, if any.
    pub fn expire_tick(&mut self, now: Instant) -> Option<Cell> {
        self.state
            .foods
            .expire_oldest(now, self.config.food_ttl())
            .map(|food| food.cell)
    }

    /// Forward a turn request to the heading. Returns false for a reversal.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        self.state.heading.request_change(direction)
    }

    /// Start a fresh round immediately
    pub fn reset(&mut self, now: Instant) {
        tracing::info!(round = self.round, score = self.state.score.value(), "round restarted");
        self.reset_round(now);
    }

    /// Put a food on a specific free cell
    pub fn place_food(&mut self, cell: Cell, now: Instant) -> Result<(), GameError> {
        self.state
            .foods
            .place(cell, self.state.snake.cells(), now)
            .map(|_| ())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.grid, &self.state, self.round)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.state.snake
    }

    pub fn foods(&self) -> &FoodManager {
        &self.state.foods
    }

    pub fn score(&self) -> u32 {
        self.state.score.value()
    }

    pub fn heading(&self) -> Direction {
        self.state.heading.current()
    }

    /// Round counter, bumped on every reset
    pub fn round(&self) -> u64 {
        self.round
    }

    fn reset_round(&mut self, now: Instant) {
        self.state.snake = Snake::starting(&self.grid);
        self.state.heading = DirectionController::new(Direction::Right);
        self.state.score.reset();
        self.state.foods.clear();
        self.seed_food(now);
        self.round += 1;
    }

    fn seed_food(&mut self, now: Instant) {
        if let Err(err) = self.state.foods.spawn(self.state.snake.cells(), now) {
            tracing::warn!(%err, "no room for the opening food");
        }
    }
}
