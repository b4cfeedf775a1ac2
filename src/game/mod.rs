//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Time enters only as `Instant` arguments, so every cadence can be driven by hand.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod score;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, DirectionController};
pub use config::GameConfig;
pub use engine::{GameEngine, TickOutcome};
pub use food::{Food, FoodManager};
pub use grid::{Cell, Grid};
pub use score::ScoreTracker;
pub use snake::{INITIAL_SNAKE_LENGTH, Snake};
pub use state::{CellKind, RoundState, Snapshot};
