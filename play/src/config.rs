//! Command-line configuration for the `connect4` binary
//!
//! Defaults come from the central config (config.toml plus `CONNECT4_*`
//! environment overrides). CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use games_connect4::Board;
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}

fn default_exploration_factor() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_factor
}

fn default_workers() -> usize {
    CENTRAL_CONFIG.mcts.workers
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_rows() -> usize {
    CENTRAL_CONFIG.game.rows
}

fn default_cols() -> usize {
    CENTRAL_CONFIG.game.cols
}

fn default_human_first() -> bool {
    CENTRAL_CONFIG.game.human_first
}

#[derive(Parser, Debug, Clone)]
#[command(name = "connect4")]
#[command(about = "Play Connect 4 against a Monte Carlo Tree Search AI")]
#[command(
    long_about = "Play Connect 4 in the terminal. The AI (X) searches each move with
Monte Carlo Tree Search; you play O by typing a column number.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// MCTS iterations per AI move
    #[arg(value_name = "ITERATIONS", default_value_t = default_iterations())]
    pub iterations: u32,

    /// UCB1 exploration factor
    #[arg(long, default_value_t = default_exploration_factor())]
    pub exploration_factor: f64,

    /// Root-parallel search trees (1 = single-threaded)
    #[arg(long, default_value_t = default_workers())]
    pub workers: usize,

    /// RNG seed for a reproducible game (defaults to config, then OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Let the human move first
    #[arg(
        long,
        default_value_t = default_human_first(),
        num_args = 0..=1,
        default_missing_value = "true",
        action = clap::ArgAction::Set
    )]
    pub human_first: bool,

    /// Board rows
    #[arg(long, default_value_t = default_rows())]
    pub rows: usize,

    /// Board columns
    #[arg(long, default_value_t = default_cols())]
    pub cols: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.mcts_config().validate().map_err(|e| anyhow!(e))?;

        Board::with_size(self.rows, self.cols)?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Search parameters for every AI move
    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig::default()
            .with_iterations(self.iterations)
            .with_exploration_factor(self.exploration_factor)
            .with_workers(self.workers)
    }

    /// Seed from the command line, else from the central config
    pub fn seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.mcts.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            iterations: 3000,
            exploration_factor: 2.0,
            workers: 1,
            seed: None,
            human_first: false,
            rows: 6,
            cols: 7,
            log_level: "info".into(),
        }
    }

    #[test]
    fn test_validate_accepts_base_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let mut config = base_config();
        config.iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_search_parameters() {
        let mut config = base_config();
        config.exploration_factor = -0.5;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_board() {
        let mut config = base_config();
        config.cols = 0;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("6x0"), "{}", err);
    }

    #[test]
    fn test_validate_rejects_oversized_board() {
        let mut config = base_config();
        config.rows = usize::MAX / 2;
        config.cols = usize::MAX / 2;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.cols = games_connect4::MAX_DIMENSION + 1;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.rows = games_connect4::MAX_DIMENSION;
        config.cols = games_connect4::MAX_DIMENSION;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_invalid_log_level() {
        let mut config = base_config();
        config.log_level = "verbose".into();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("invalid log level"), "{}", err);
    }

    #[test]
    fn test_mcts_config_mapping() {
        let mut config = base_config();
        config.iterations = 42;
        config.exploration_factor = 0.7;
        config.workers = 3;

        let mcts = config.mcts_config();
        assert_eq!(mcts.iterations, 42);
        assert!((mcts.exploration_factor - 0.7).abs() < f64::EPSILON);
        assert_eq!(mcts.workers, 3);
    }

    #[test]
    fn test_cli_arguments_override_defaults() {
        let config = Config::try_parse_from([
            "connect4",
            "500",
            "--human-first",
            "--seed",
            "9",
            "--workers",
            "2",
        ])
        .unwrap();

        assert_eq!(config.iterations, 500);
        assert!(config.human_first);
        assert_eq!(config.seed(), Some(9));
        assert_eq!(config.workers, 2);
    }

    #[test]
    fn test_human_first_accepts_explicit_value() {
        let config = Config::try_parse_from(["connect4", "--human-first", "false"]).unwrap();
        assert!(!config.human_first);
    }

    #[test]
    fn test_rejects_non_numeric_iterations() {
        assert!(Config::try_parse_from(["connect4", "lots"]).is_err());
    }
}
