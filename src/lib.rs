//! Wrap Snake - Snake on a toroidal grid with timed food
//!
//! This library provides:
//! - Core game logic (game module): grid, snake, heading, food lifecycle, tick engine
//! - Error taxonomy (error module)
//! - Keyboard mapping (input module) and TUI rendering (render module)
//! - Session counters (metrics module)
//! - The interactive terminal session and its timers (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

pub use error::GameError;
