//! Game state trait used by the search engine
//!
//! Positions are values: applying a move never mutates the receiver, it
//! produces a successor. This lets every search-tree node own an independent
//! snapshot of its position.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Signed player id. `+1` and `-1` are the two sides, `0` marks an empty
/// cell or "no winner".
pub type Player = i8;

/// Empty cell / no winner
pub const EMPTY: Player = 0;
/// First player (the AI in the terminal game)
pub const PLAYER_ONE: Player = 1;
/// Second player (the human in the terminal game)
pub const PLAYER_TWO: Player = -1;

/// A position in a two-player game.
///
/// `winner()` and `is_terminal()` are independent predicates: a drawn, full
/// board has no winner and is terminal, while a won position may still have
/// empty cells. Drivers should stop on [`GameState::is_over`].
///
/// # Example
///
/// ```rust
/// use engine_core::{GameState, Player, EMPTY};
/// use std::fmt;
///
/// /// Take 1-3 stones; whoever takes the last stone wins.
/// #[derive(Debug, Clone)]
/// struct Nim {
///     stones: u8,
///     last_taker: Player,
/// }
///
/// #[derive(Debug)]
/// struct BadTake;
///
/// impl fmt::Display for BadTake {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "cannot take that many stones")
///     }
/// }
///
/// impl std::error::Error for BadTake {}
///
/// impl GameState for Nim {
///     type Move = u8;
///     type Error = BadTake;
///
///     fn legal_moves(&self) -> Vec<u8> {
///         (1..=self.stones.min(3)).collect()
///     }
///     fn is_terminal(&self) -> bool {
///         self.stones == 0
///     }
///     fn winner(&self) -> Player {
///         if self.stones == 0 { self.last_taker } else { EMPTY }
///     }
///     fn apply_move(&self, take: u8, player: Player) -> Result<Self, BadTake> {
///         if take == 0 || take > self.stones.min(3) {
///             return Err(BadTake);
///         }
///         Ok(Nim { stones: self.stones - take, last_taker: player })
///     }
/// }
///
/// let pile = Nim { stones: 2, last_taker: EMPTY };
/// let after = pile.apply_move(2, 1).unwrap();
/// assert!(after.is_over());
/// assert_eq!(after.winner(), 1);
/// ```
pub trait GameState: Clone + Send + Sync + std::fmt::Debug + 'static {
    /// A move, e.g. a column index for Connect-4
    type Move: Copy + PartialEq + Send + Sync + std::fmt::Debug + 'static;

    /// Error returned when a move cannot be applied
    type Error: std::error::Error + Send + Sync + 'static;

    /// Moves available from this position, in a stable enumeration order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// True iff no further move can be played (board full).
    fn is_terminal(&self) -> bool;

    /// The winning player, or [`EMPTY`] when nobody has won.
    fn winner(&self) -> Player;

    /// Produce the successor reached by `player` playing `mv`.
    fn apply_move(&self, mv: Self::Move, player: Player) -> Result<Self, Self::Error>;

    /// True when the game has a winner or cannot continue.
    #[inline]
    fn is_over(&self) -> bool {
        self.winner() != EMPTY || self.is_terminal()
    }

    /// Play a uniformly random legal move for `player`.
    ///
    /// Returns an unchanged copy when there is no legal move.
    fn next_random_state(
        &self,
        player: Player,
        rng: &mut ChaCha20Rng,
    ) -> Result<Self, Self::Error> {
        match self.legal_moves().choose(rng) {
            Some(&mv) => self.apply_move(mv, player),
            None => Ok(self.clone()),
        }
    }
}
