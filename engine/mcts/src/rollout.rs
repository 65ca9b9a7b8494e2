//! Default policy: uniformly random playout to the end of the game.

use engine_core::game_utils::opponent;
use engine_core::{GameState, Player};
use rand_chacha::ChaCha20Rng;

/// Play random legal moves from `state`, starting with `turn`, until the game
/// is won or no move is left. Returns the winner (`0` for a draw).
///
/// Relies on the game reporting `is_terminal()` once it has no legal moves.
pub fn rollout<S: GameState>(
    state: &S,
    turn: Player,
    rng: &mut ChaCha20Rng,
) -> Result<Player, S::Error> {
    let mut state = state.clone();
    let mut turn = turn;

    while !state.is_over() {
        state = state.next_random_state(turn, rng)?;
        turn = opponent(turn);
    }

    Ok(state.winner())
}
