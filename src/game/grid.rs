use std::fmt;

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Toroidal coordinate space: leaving one edge re-enters at the opposite one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Dimensions are validated by `GameConfig`; both must be positive.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Step one cell in `direction`, wrapping around the edges
    pub fn wrap(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell {
            x: (cell.x + dx + self.width) % self.width,
            y: (cell.y + dy + self.height) % self.height,
        }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }

    /// Row-major index of an in-bounds cell
    pub(crate) fn index_of(&self, cell: Cell) -> usize {
        (cell.y * self.width + cell.x) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_interior() {
        let grid = Grid::new(25, 25);
        let cell = Cell::new(5, 5);
        assert_eq!(grid.wrap(cell, Direction::Right), Cell::new(6, 5));
        assert_eq!(grid.wrap(cell, Direction::Left), Cell::new(4, 5));
        assert_eq!(grid.wrap(cell, Direction::Down), Cell::new(5, 6));
        assert_eq!(grid.wrap(cell, Direction::Up), Cell::new(5, 4));
    }

    #[test]
    fn test_wrap_edges() {
        let grid = Grid::new(25, 20);
        assert_eq!(grid.wrap(Cell::new(24, 3), Direction::Right), Cell::new(0, 3));
        assert_eq!(grid.wrap(Cell::new(0, 3), Direction::Left), Cell::new(24, 3));
        assert_eq!(grid.wrap(Cell::new(7, 0), Direction::Up), Cell::new(7, 19));
        assert_eq!(grid.wrap(Cell::new(7, 19), Direction::Down), Cell::new(7, 0));
    }

    #[test]
    fn test_cells_row_major() {
        let grid = Grid::new(3, 2);
        let cells: Vec<Cell> = grid.cells().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[2], Cell::new(2, 0));
        assert_eq!(cells[3], Cell::new(0, 1));
        for cell in cells {
            assert_eq!(grid.cells().nth(grid.index_of(cell)), Some(cell));
        }
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(20, 20);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(19, 19)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert!(!grid.contains(Cell::new(20, 0)));
        assert!(!grid.contains(Cell::new(0, 20)));
    }

    proptest! {
        #[test]
        fn wrap_stays_in_bounds(
            width in 1usize..64,
            height in 1usize..64,
            x in 0i32..64,
            y in 0i32..64,
            dir in prop::sample::select(Direction::ALL.to_vec()),
        ) {
            let grid = Grid::new(width, height);
            let cell = Cell::new(x % width as i32, y % height as i32);
            prop_assert!(grid.contains(grid.wrap(cell, dir)));
        }
    }
}
