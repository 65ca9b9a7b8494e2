//! Default configuration values loaded from config.defaults.toml.
//!
//! The defaults file at the workspace root is embedded at compile time, so the
//! binary runs without any config file present.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    game: GameDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    iterations: u32,
    exploration_factor: f64,
    workers: usize,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GameDefaults {
    rows: usize,
    cols: usize,
    human_first: bool,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn exploration_factor() -> f64 {
    DEFAULTS.mcts.exploration_factor
}
pub fn workers() -> usize {
    DEFAULTS.mcts.workers
}
pub fn seed() -> Option<u64> {
    DEFAULTS.mcts.seed
}

// Game
pub fn rows() -> usize {
    DEFAULTS.game.rows
}
pub fn cols() -> usize {
    DEFAULTS.game.cols
}
pub fn human_first() -> bool {
    DEFAULTS.game.human_first
}
