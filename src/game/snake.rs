use super::action::Direction;
use super::grid::{Cell, Grid};

/// Length of the body at the start of every round
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// The snake body, head at index 0 and tail last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    /// Build a body from explicit cells, head first.
    ///
    /// Not checked here; `GameEngine::from_round` rejects empty or
    /// self-overlapping bodies.
    pub fn from_cells(body: Vec<Cell>) -> Self {
        Self { body }
    }

    /// Create a snake whose segments trail behind `head`, opposite to `direction`
    pub fn new(grid: &Grid, head: Cell, direction: Direction, length: usize) -> Self {
        let back = match direction {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        };

        let mut body = Vec::with_capacity(length);
        body.push(head);
        for i in 1..length {
            let prev = body[i - 1];
            body.push(grid.wrap(prev, back));
        }

        Self { body }
    }

    /// The round-start snake: three cells heading Right, head at a third of
    /// the width on the middle row.
    pub fn starting(grid: &Grid) -> Self {
        let head = Cell::new((grid.width() / 3) as i32, (grid.height() / 2) as i32);
        Self::new(grid, head, Direction::Right, INITIAL_SNAKE_LENGTH)
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    /// Whether any segment, head or tail included, sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Produce the next body: `new_head` prepended, tail dropped unless growing
    pub fn advanced(&self, new_head: Cell, grow: bool) -> Snake {
        let keep = if grow { self.body.len() } else { self.body.len() - 1 };
        let mut body = Vec::with_capacity(keep + 1);
        body.push(new_head);
        body.extend_from_slice(&self.body[..keep]);
        Snake { body }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_snake_on_default_grid() {
        let grid = Grid::new(25, 25);
        let snake = Snake::starting(&grid);
        assert_eq!(
            snake.cells(),
            &[Cell::new(8, 12), Cell::new(7, 12), Cell::new(6, 12)]
        );
    }

    #[test]
    fn test_snake_creation_wraps() {
        let grid = Grid::new(10, 10);
        let snake = Snake::new(&grid, Cell::new(1, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.cells()[2], Cell::new(9, 5));
    }

    #[test]
    fn test_advance_keeps_length() {
        let grid = Grid::new(10, 10);
        let snake = Snake::new(&grid, Cell::new(5, 5), Direction::Right, 3);
        let moved = snake.advanced(Cell::new(6, 5), false);
        assert_eq!(
            moved.cells(),
            &[Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]
        );
        // the previous body is untouched
        assert_eq!(snake.head(), Cell::new(5, 5));
    }

    #[test]
    fn test_advance_grows() {
        let grid = Grid::new(10, 10);
        let snake = Snake::new(&grid, Cell::new(5, 5), Direction::Right, 3);
        let grown = snake.advanced(Cell::new(6, 5), true);
        assert_eq!(grown.len(), 4);
        assert_eq!(grown.head(), Cell::new(6, 5));
        assert_eq!(grown.cells()[3], Cell::new(3, 5));
    }

    #[test]
    fn test_occupies() {
        let grid = Grid::new(10, 10);
        let snake = Snake::new(&grid, Cell::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Cell::new(5, 5)));
        assert!(snake.occupies(Cell::new(3, 5)));
        assert!(!snake.occupies(Cell::new(6, 5)));
    }
}
