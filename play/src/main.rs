//! connect4 - play Connect 4 in the terminal against an MCTS AI
//!
//! The AI plays X (+1) and moves first unless `--human-first` is given; the
//! human plays O (-1) and enters column numbers on stdin. Each AI move is
//! chosen by a fresh Monte Carlo Tree Search over the current board.

use anyhow::{Context, Result};
use clap::Parser;
use games_connect4::Board;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::io;
use tracing::info;

mod config;
mod human;
mod session;

use crate::config::Config;
use crate::session::GameSession;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Game output owns stdout; logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let board = Board::with_size(config.rows, config.cols).context("invalid board size")?;

    let rng = match config.seed() {
        Some(seed) => {
            info!(seed, "Using fixed seed");
            ChaCha20Rng::seed_from_u64(seed)
        }
        None => ChaCha20Rng::from_entropy(),
    };

    info!(
        iterations = config.iterations,
        exploration_factor = config.exploration_factor,
        workers = config.workers,
        "MCTS configured"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = GameSession::new(
        board,
        config.mcts_config(),
        config.human_first,
        rng,
        stdin.lock(),
        stdout.lock(),
    );

    session.play()?;
    Ok(())
}
