/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Holds the heading between ticks.
///
/// Inputs may arrive several times between two ticks; only the heading live
/// at the next [`snapshot`](Self::snapshot) is applied. A request is dropped
/// when it reverses either the live heading or the heading committed at the
/// last tick, so Right -> Up -> Left between ticks cannot fold the snake back
/// onto its neck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionController {
    current: Direction,
    committed: Direction,
}

impl DirectionController {
    pub fn new(initial: Direction) -> Self {
        Self {
            current: initial,
            committed: initial,
        }
    }

    /// Request a new heading. Returns false if it was ignored as a reversal.
    pub fn request_change(&mut self, proposed: Direction) -> bool {
        if self.current.is_opposite(proposed) || self.committed.is_opposite(proposed) {
            return false;
        }
        self.current = proposed;
        true
    }

    /// Commit the live heading for this tick and return it
    pub fn snapshot(&mut self) -> Direction {
        self.committed = self.current;
        self.committed
    }

    /// Live heading, not yet committed
    pub fn current(&self) -> Direction {
        self.current
    }
}

impl Default for DirectionController {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}
