//! Shared utilities for two-player game implementations
//!
//! Player ids are signed (`+1`/`-1`), so the opponent of a player is its
//! negation and a game result can be used directly as a signed reward.

use crate::game::{Player, EMPTY, PLAYER_ONE, PLAYER_TWO};

/// The other side.
///
/// # Example
/// ```
/// use engine_core::game_utils::opponent;
///
/// assert_eq!(opponent(1), -1);
/// assert_eq!(opponent(-1), 1);
/// ```
#[inline]
pub fn opponent(player: Player) -> Player {
    -player
}

/// True for `+1` and `-1`.
#[inline]
pub fn is_player(value: i8) -> bool {
    value == PLAYER_ONE || value == PLAYER_TWO
}

/// True for any legal cell value (`0`, `+1`, `-1`).
#[inline]
pub fn is_cell_value(value: i8) -> bool {
    value == EMPTY || is_player(value)
}

/// Reward credited to a node during backpropagation.
///
/// `turn` is the side to move at the node, `winner` the rollout result.
/// Nodes store reward from the point of view of the player who moved *into*
/// them, so a win for `winner` is positive exactly when `winner` is the
/// opponent of `turn`.
///
/// # Arguments
/// * `winner` - Rollout result: `+1`, `-1` or `0` for a draw
/// * `turn` - Side to move at the node being updated
///
/// # Example
/// ```
/// use engine_core::game_utils::backup_reward;
///
/// // Player +1 just moved into this node (so -1 is to move) and +1 won
/// assert_eq!(backup_reward(1, -1), 1.0);
///
/// // Same result seen from the parent, where +1 is to move
/// assert_eq!(backup_reward(1, 1), -1.0);
///
/// // Draws contribute nothing
/// assert_eq!(backup_reward(0, 1), 0.0);
/// ```
#[inline]
pub fn backup_reward(winner: Player, turn: Player) -> f64 {
    -(f64::from(turn) * f64::from(winner))
}
