//! Monte Carlo Tree Search (MCTS) with UCB1 selection and random rollouts.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` [`GameState`](engine_core::GameState)
//! trait.
//!
//! # Overview
//!
//! Each iteration of the search consists of four phases:
//!
//! 1. **Selection**: Starting at the root, descend through fully expanded
//!    nodes using UCB1 to balance exploration and exploitation
//! 2. **Expansion**: At the first node with an untried legal move, add one
//!    child for the first such move in enumeration order
//! 3. **Rollout**: Play uniformly random moves from the new node until the
//!    game is won or drawn
//! 4. **Backpropagation**: Walk back to the root, adding a visit to every
//!    node and crediting the result with alternating sign
//!
//! After the budget is spent, the root child with the best mean reward is
//! chosen (UCB1 with exploration disabled, exact ties broken at random).
//!
//! # Usage
//!
//! ```rust
//! use engine_core::PLAYER_ONE;
//! use games_connect4::Board;
//! use mcts::{run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let config = MctsConfig::for_testing();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = run_mcts(Board::new(), PLAYER_ONE, config, &mut rng).unwrap();
//!
//! assert!(result.best_move < 7);
//! assert_eq!(result.iterations, 200);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: Number of iterations per search (default: 3000)
//! - `exploration_factor`: UCB1 exploration constant (default: 2.0)
//! - `workers`: Independent root-parallel trees (default: 1)
//!
//! # Randomness
//!
//! All randomness (rollouts and tie-breaking) comes from the `ChaCha20Rng`
//! passed in, so a fixed seed reproduces a search exactly. Root-parallel
//! workers each get their own generator seeded from the caller's.
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                         MctsSearch                          |
//! +-------------------------------------------------------------+
//! |  +-------------+  +-------------+  +---------------------+  |
//! |  |  MctsTree   |  |  selection  |  |      rollout        |  |
//! |  |  (arena)    |  |   (UCB1)    |  |  (random playout)   |  |
//! |  +------+------+  +------+------+  +----------+----------+  |
//! |         |                |                    |             |
//! |         v                v                    v             |
//! |  +-------------------------------------------------------+  |
//! |  |      tree policy -> expand -> rollout -> backprop     |  |
//! |  +-------------------------------------------------------+  |
//! +-------------------------------------------------------------+
//!        run_mcts: one tree, or `workers` trees on a rayon pool
//! ```

pub mod config;
pub mod node;
pub mod parallel;
pub mod rollout;
pub mod search;
pub mod selection;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use parallel::run_root_parallel;
pub use search::{run_mcts, ChildStats, MctsSearch, SearchError, SearchResult};
pub use selection::{best_child, pick_best, ucb1};
pub use tree::{MctsTree, TreeStats};
