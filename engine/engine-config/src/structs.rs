//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_exploration_factor() -> f64 {
    defaults::exploration_factor()
}
fn d_workers() -> usize {
    defaults::workers()
}
fn d_seed() -> Option<u64> {
    defaults::seed()
}
fn d_rows() -> usize {
    defaults::rows()
}
fn d_cols() -> usize {
    defaults::cols()
}
fn d_human_first() -> bool {
    defaults::human_first()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub game: GameConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CommonConfig {
    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MctsConfig {
    /// Iterations per AI move
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    /// UCB1 exploration constant
    #[serde(default = "d_exploration_factor")]
    pub exploration_factor: f64,
    /// Root-parallel trees (1 = single-threaded)
    #[serde(default = "d_workers")]
    pub workers: usize,
    /// Fixed RNG seed; None seeds from the OS
    #[serde(default = "d_seed")]
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            exploration_factor: defaults::exploration_factor(),
            workers: defaults::workers(),
            seed: defaults::seed(),
        }
    }
}

/// Board and turn-order configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    #[serde(default = "d_rows")]
    pub rows: usize,
    #[serde(default = "d_cols")]
    pub cols: usize,
    /// The AI moves first unless this is set
    #[serde(default = "d_human_first")]
    pub human_first: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: defaults::rows(),
            cols: defaults::cols(),
            human_first: defaults::human_first(),
        }
    }
}
