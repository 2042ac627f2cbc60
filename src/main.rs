use anyhow::{Context, Result};
use clap::Parser;
use snake::{CliRenderer, GameConfig, Session};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Classic snake in the terminal")]
struct Cli {
    /// TOML file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width including the border
    #[arg(long)]
    width: Option<i32>,

    /// Board height including the border
    #[arg(long)]
    height: Option<i32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file. Nothing is logged without it
    /// since the game draws over the whole terminal
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Install a subscriber writing to `log_file`. Returns false when no file was
/// given: the board owns the terminal during play, so there is nowhere else to log.
fn init_logging(log_file: Option<&PathBuf>) -> Result<bool> {
    let Some(path) = log_file else {
        return Ok(false);
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();

    Ok(true)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config = cli.game_config().context("Invalid game configuration")?;
    tracing::info!(width = config.width, height = config.height, "starting session");

    let mut session = Session::new(config)?;
    let mut renderer = CliRenderer::new();

    let summary = session
        .run(&mut renderer, thread::sleep)
        .context("Terminal error")?;

    println!(
        "Thanks for playing! Games: {}  Best score: {}",
        summary.games_played, summary.best_score
    );
    Ok(())
}
