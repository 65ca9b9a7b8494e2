//! Core traits and types for the Connect-4 engine
//!
//! This crate provides the abstractions the search engine is written against:
//! - `GameState`: an immutable-semantics board position for a two-player,
//!   zero-sum, perfect-information game
//! - `Player`: signed player ids (`+1`, `-1`, `0` for empty/no winner)
//! - `game_utils`: small helpers shared by the game and the search

pub mod game;
pub mod game_utils;

// Re-export main types for convenience
pub use game::{GameState, Player, EMPTY, PLAYER_ONE, PLAYER_TWO};
pub use game_utils::{backup_reward, is_cell_value, is_player, opponent};
