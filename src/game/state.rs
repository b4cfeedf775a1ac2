use super::action::{Direction, DirectionController};
use super::food::FoodManager;
use super::grid::{Cell, Grid};
use super::score::ScoreTracker;
use super::snake::Snake;

/// Everything that belongs to one round
pub struct RoundState {
    pub snake: Snake,
    pub heading: DirectionController,
    pub foods: FoodManager,
    pub score: ScoreTracker,
}

impl RoundState {
    /// A round with the given body and heading, no food and a zero score
    pub fn new(snake: Snake, direction: Direction, foods: FoodManager) -> Self {
        Self {
            snake,
            heading: DirectionController::new(direction),
            foods,
            score: ScoreTracker::new(),
        }
    }

    /// What occupies `cell`. Food is reported ahead of snake.
    pub fn classify(&self, cell: Cell) -> CellKind {
        if self.foods.contains(cell) {
            CellKind::Food
        } else if self.snake.head() == cell {
            CellKind::SnakeHead
        } else if self.snake.occupies(cell) {
            CellKind::Snake
        } else {
            CellKind::Empty
        }
    }
}

/// Contents of a single cell as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    SnakeHead,
    Snake,
    Food,
}

/// Read-only picture of the board, taken once per state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub score: u32,
    pub length: usize,
    pub round: u64,
    cells: Vec<CellKind>,
    grid: Grid,
}

impl Snapshot {
    pub(crate) fn capture(grid: Grid, state: &RoundState, round: u64) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            score: state.score.value(),
            length: state.snake.len(),
            round,
            cells: grid.cells().map(|cell| state.classify(cell)).collect(),
            grid,
        }
    }

    pub fn classify(&self, cell: Cell) -> CellKind {
        if !self.grid.contains(cell) {
            return CellKind::Empty;
        }
        self.cells[self.grid.index_of(cell)]
    }
}
