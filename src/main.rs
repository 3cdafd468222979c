//! # Sanctum Main Entry Point
//!
//! Parses arguments, initializes logging, wires the terminal and narrator
//! boundaries into a session, and runs it to completion.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use sanctum::{
    GameConfig, GameSession, PlainNarrator, RunOutcome, SanctumError, SanctumResult, SeededRandom,
    StdioPrompter,
};

/// Command line arguments for Sanctum.
#[derive(Parser, Debug)]
#[command(name = "sanctum")]
#[command(about = "A turn-based terminal dungeon crawler with LLM-driven storytelling")]
#[command(version)]
struct Args {
    /// Random seed for a replayable run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Path to a JSON GameConfig overriding the built-in tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> SanctumResult<()> {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    log::info!("Starting Sanctum v{}", sanctum::VERSION);

    let config = load_config(args.config.as_deref())?;
    let rng = match args.seed {
        Some(seed) => {
            log::info!("seeded run: {seed}");
            SeededRandom::new(seed)
        }
        None => SeededRandom::from_entropy(),
    };

    let mut session = GameSession::new(
        config,
        Box::new(rng),
        Box::new(PlainNarrator::new()),
        Box::new(StdioPrompter::new()),
    )?;

    match session.run()? {
        RunOutcome::Victory => log::info!("the relic is reclaimed"),
        RunOutcome::Defeat => log::info!("the sanctum keeps its secrets"),
    }
    Ok(())
}

fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> SanctumResult<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    log::info!("loading config from {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    let config: GameConfig = serde_json::from_str(&raw)?;
    config.validate().map_err(|error| match error {
        SanctumError::InvalidConfig(message) => {
            SanctumError::InvalidConfig(format!("{}: {message}", path.display()))
        }
        other => other,
    })?;
    Ok(config)
}
