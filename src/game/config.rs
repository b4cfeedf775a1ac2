use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::snake::INITIAL_SNAKE_LENGTH;
use crate::error::GameError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub width: usize,
    /// Height of the game grid
    pub height: usize,
    /// Milliseconds between movement ticks
    pub tick_interval_ms: u64,
    /// Milliseconds between food spawns
    pub food_spawn_interval_ms: u64,
    /// How long a food stays on the board
    pub food_ttl_ms: u64,
    /// Milliseconds between checks for expired food
    pub food_expiry_check_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 25,
            height: 25,
            tick_interval_ms: 500,
            food_spawn_interval_ms: 3_000,
            food_ttl_ms: 10_000,
            food_expiry_check_ms: 1_000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a TOML file. Missing fields keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Check that every value is usable before the game loop starts
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width < INITIAL_SNAKE_LENGTH {
            return Err(GameError::invalid(
                "width",
                format!(
                    "must be at least {}, got {}",
                    INITIAL_SNAKE_LENGTH, self.width
                ),
            ));
        }

        if self.height == 0 {
            return Err(GameError::invalid("height", "must be positive, got 0"));
        }

        if self.width.checked_mul(self.height).is_none_or(|cells| cells > i32::MAX as usize) {
            return Err(GameError::invalid(
                "width",
                format!("{}x{} grid is too large", self.width, self.height),
            ));
        }

        let intervals = [
            ("tick_interval_ms", self.tick_interval_ms),
            ("food_spawn_interval_ms", self.food_spawn_interval_ms),
            ("food_ttl_ms", self.food_ttl_ms),
            ("food_expiry_check_ms", self.food_expiry_check_ms),
        ];
        for (field, value) in intervals {
            if value == 0 {
                return Err(GameError::invalid(field, "must be positive, got 0"));
            }
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn food_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.food_spawn_interval_ms)
    }

    pub fn food_ttl(&self) -> Duration {
        Duration::from_millis(self.food_ttl_ms)
    }

    pub fn food_expiry_check(&self) -> Duration {
        Duration::from_millis(self.food_expiry_check_ms)
    }
}
