use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use wrap_snake::game::{GameConfig, GameEngine};
use wrap_snake::modes::HumanMode;

#[derive(Parser, Debug)]
#[command(name = "wrap_snake")]
#[command(version, about = "Snake on a wrap-around grid with timed food")]
struct Cli {
    /// TOML file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between movement ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Milliseconds between food spawns
    #[arg(long)]
    spawn_ms: Option<u64>,

    /// Milliseconds a food stays on the board
    #[arg(long)]
    ttl_ms: Option<u64>,

    /// Milliseconds between checks for expired food
    #[arg(long)]
    expiry_check_ms: Option<u64>,

    /// Seed for food placement, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the config file, then flags
    fn resolve_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_toml_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(ms) = self.spawn_ms {
            config.food_spawn_interval_ms = ms;
        }
        if let Some(ms) = self.ttl_ms {
            config.food_ttl_ms = ms;
        }
        if let Some(ms) = self.expiry_check_ms {
            config.food_expiry_check_ms = ms;
        }

        Ok(config)
    }
}

/// The terminal owns stdout and stderr, so logs only go to a file
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.resolve_config()?;
    let now = Instant::now();
    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed, now),
        None => GameEngine::new(config, now),
    }
    .context("Invalid game configuration")?;

    tracing::info!(config = ?engine.config(), seed = ?cli.seed, "starting");

    let mut human_mode = HumanMode::new(engine);
    human_mode.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_flags() {
        let cli = Cli::try_parse_from(["wrap_snake"]).unwrap();
        assert_eq!(cli.resolve_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width = 30\nheight = 18\nfood_ttl_ms = 4000").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["wrap_snake", "--config", &path, "--width", "40", "--tick-ms", "200"])
            .unwrap();
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.width, 40);
        assert_eq!(config.height, 18);
        assert_eq!(config.food_ttl_ms, 4000);
        assert_eq!(config.tick_interval_ms, 200);
        assert_eq!(config.food_spawn_interval_ms, 3000);
    }

    #[test]
    fn test_zero_interval_rejected_before_start() {
        let cli = Cli::try_parse_from(["wrap_snake", "--spawn-ms", "0"]).unwrap();
        let config = cli.resolve_config().unwrap();
        assert!(GameEngine::new(config, Instant::now()).is_err());
    }
}
