use thiserror::Error;

use crate::game::Cell;

/// Errors raised by the game core.
///
/// A self-collision is not an error: it ends the round through
/// [`TickOutcome::RoundOver`](crate::game::TickOutcome::RoundOver).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    /// A configuration value is out of range. Fatal at startup.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    /// Every grid cell is taken by the snake or by food.
    #[error("no free cell available for food")]
    NoSpaceAvailable,

    /// A food could not be placed: the cell is taken or off the grid.
    #[error("cell {0} is already occupied")]
    CellOccupied(Cell),
}

impl GameError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        GameError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GameError::invalid("width", "must be at least 3, got 0");
        assert_eq!(
            err.to_string(),
            "invalid configuration: width must be at least 3, got 0"
        );

        let err = GameError::CellOccupied(Cell::new(4, 7));
        assert_eq!(err.to_string(), "cell (4, 7) is already occupied");

        assert_eq!(
            GameError::NoSpaceAvailable.to_string(),
            "no free cell available for food"
        );
    }
}
