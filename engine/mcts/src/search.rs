//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Tree policy: descend with UCB1 while nodes are fully expanded, then
//!    expand the first untried move
//! 2. Rollout: play uniformly random moves to the end of the game
//! 3. Backpropagation: update visits and alternating-sign rewards up to the root
//! 4. Decision: pick the root child with the best mean reward (exploration off)

use engine_core::game_utils::{is_player, opponent};
use engine_core::{GameState, Player};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::parallel;
use crate::rollout::rollout;
use crate::selection::best_child;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Game is already over, no move to search for")]
    GameOver,

    #[error("Move selection on node {0} which has no children")]
    EmptySelection(u32),

    #[error("Game error: {0}")]
    Game(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Visit and reward totals for one root child.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildStats<M> {
    pub mv: M,
    pub visits: u32,
    pub reward: f64,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Best move to play
    pub best_move: M,

    /// Mean reward of the chosen child, from the searching player's view
    pub value: f64,

    /// Number of iterations performed
    pub iterations: u32,

    /// Visit count of the root (1 + iterations for a single tree)
    pub root_visits: u32,

    /// Per-move statistics of the root children, in expansion order
    pub children: Vec<ChildStats<M>>,
}

/// Reject searches that cannot produce a move.
pub(crate) fn check_root<S: GameState>(
    state: &S,
    to_move: Player,
    config: &MctsConfig,
) -> Result<(), SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !is_player(to_move) {
        return Err(SearchError::InvalidState(format!(
            "side to move must be +1 or -1, got {}",
            to_move
        )));
    }
    if state.is_over() {
        return Err(SearchError::GameOver);
    }
    Ok(())
}

/// MCTS search state: one tree, grown from a single root position.
pub struct MctsSearch<S: GameState> {
    tree: MctsTree<S>,
    config: MctsConfig,
    to_move: Player,
    iterations_run: u32,
}

impl<S: GameState> MctsSearch<S> {
    /// Create a new search rooted at `state` with `to_move` to play.
    pub fn new(state: S, to_move: Player, config: MctsConfig) -> Result<Self, SearchError> {
        check_root(&state, to_move, &config)?;

        Ok(Self {
            tree: MctsTree::new(state),
            config,
            to_move,
            iterations_run: 0,
        })
    }

    /// Run the configured number of iterations and pick the best move.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<S::Move>, SearchError> {
        self.run_iterations(self.config.iterations, rng)?;

        let stats = self.tree.stats();
        debug!(
            iterations = self.iterations_run,
            nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            root_visits = stats.root_visits,
            "MCTS search complete"
        );

        self.select_best(rng)
    }

    /// Run `n` more iterations on the current tree.
    pub fn run_iterations(&mut self, n: u32, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        for _ in 0..n {
            self.iterate(rng)?;
        }
        Ok(())
    }

    /// Run a single iteration (tree policy -> rollout -> backpropagate).
    pub fn iterate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        let (leaf_id, turn) = self.tree_policy(rng)?;

        let winner = rollout(&self.tree.get(leaf_id).state, turn, rng)
            .map_err(|e| SearchError::Game(e.to_string()))?;

        self.tree.backpropagate(leaf_id, winner, turn);
        self.iterations_run += 1;

        trace!(
            leaf = leaf_id.0,
            turn = turn,
            winner = winner,
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Walk down from the root and return the node to roll out from together
    /// with the side to move there.
    fn tree_policy(&mut self, rng: &mut ChaCha20Rng) -> Result<(NodeId, Player), SearchError> {
        let mut current = self.tree.root();
        let mut turn = self.to_move;

        loop {
            let node = self.tree.get(current);

            if node.state.is_over() {
                return Ok((current, turn));
            }

            if !node.is_fully_expanded() {
                let child = self.expand(current, turn)?;
                return Ok((child, opponent(turn)));
            }

            current = best_child(&self.tree, current, self.config.exploration_factor, rng)
                .ok_or(SearchError::EmptySelection(current.0))?;
            turn = opponent(turn);
        }
    }

    /// Add a child for the first untried legal move, played by `turn`.
    fn expand(&mut self, node_id: NodeId, turn: Player) -> Result<NodeId, SearchError> {
        let node = self.tree.get(node_id);
        let mv = node.untried_move().ok_or_else(|| {
            SearchError::InvalidState(format!("node {} has no untried move", node_id.0))
        })?;
        let state = node
            .state
            .apply_move(mv, turn)
            .map_err(|e| SearchError::Game(e.to_string()))?;

        Ok(self.tree.add_child(node_id, state, mv))
    }

    /// Choose among the root children with exploration disabled.
    pub fn select_best(
        &self,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult<S::Move>, SearchError> {
        let root_id = self.tree.root();
        let best_id =
            best_child(&self.tree, root_id, 0.0, rng).ok_or(SearchError::EmptySelection(root_id.0))?;

        let root = self.tree.get(root_id);
        let best_move = root
            .children
            .iter()
            .find(|(_, id)| *id == best_id)
            .map(|(mv, _)| *mv)
            .ok_or_else(|| SearchError::InvalidState("best child is not a root child".into()))?;

        Ok(SearchResult {
            best_move,
            value: self.tree.get(best_id).mean_reward(),
            iterations: self.iterations_run,
            root_visits: root.visits,
            children: self.root_children(),
        })
    }

    /// Statistics of every root child, in expansion order.
    pub fn root_children(&self) -> Vec<ChildStats<S::Move>> {
        self.tree
            .get(self.tree.root())
            .children
            .iter()
            .map(|&(mv, id)| {
                let child = self.tree.get(id);
                ChildStats {
                    mv,
                    visits: child.visits,
                    reward: child.reward,
                }
            })
            .collect()
    }

    /// Number of iterations run so far.
    pub fn iterations_run(&self) -> u32 {
        self.iterations_run
    }

    /// Side to move at the root.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<S> {
        &self.tree
    }
}

/// Search `state` for `to_move` and return the chosen move.
///
/// Builds a fresh tree per call. With `config.workers > 1` the budget is split
/// over independent root-parallel trees.
pub fn run_mcts<S: GameState>(
    state: S,
    to_move: Player,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<S::Move>, SearchError> {
    if config.workers > 1 {
        return parallel::run_root_parallel(&state, to_move, &config, rng);
    }

    let mut search = MctsSearch::new(state, to_move, config)?;
    search.run(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::{EMPTY, PLAYER_ONE, PLAYER_TWO};
    use games_connect4::{Board, COLS, ROWS};
    use rand::SeedableRng;

    const WIN_IN_ONE: &str = "
        . . . . . . .
        . . . . . . .
        . . . . . . .
        . . . . . . .
        O O O . . . .
        X X X . . . .
    ";

    fn config(iterations: u32) -> MctsConfig {
        MctsConfig::for_testing().with_iterations(iterations)
    }

    #[test]
    fn test_rejects_finished_games() {
        let won: Board = "
            . . . . . . .
            . . . . . . .
            . . . . . . .
            . . . . . . .
            O O O . . . .
            X X X X . . .
        "
        .parse()
        .unwrap();
        assert!(matches!(
            MctsSearch::new(won, PLAYER_TWO, config(10)),
            Err(SearchError::GameOver)
        ));

        let drawn: Board = "
            X O X O X O X
            X O X O X O X
            O X O X O X O
            O X O X O X O
            X O X O X O X
            X O X O X O X
        "
        .parse()
        .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert!(matches!(
            run_mcts(drawn, PLAYER_ONE, config(10), &mut rng),
            Err(SearchError::GameOver)
        ));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(matches!(
            MctsSearch::new(Board::new(), EMPTY, config(10)),
            Err(SearchError::InvalidState(_))
        ));
        assert!(matches!(
            MctsSearch::new(Board::new(), PLAYER_ONE, config(0)),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_select_best_before_any_iteration() {
        let search = MctsSearch::new(Board::new(), PLAYER_ONE, config(10)).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert!(matches!(
            search.select_best(&mut rng),
            Err(SearchError::EmptySelection(0))
        ));
    }

    #[test]
    fn test_single_iteration_expands_first_column() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let mut search = MctsSearch::new(Board::new(), PLAYER_ONE, config(1)).unwrap();
        let result = search.run(&mut rng).unwrap();

        assert_eq!(result.best_move, 0);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.root_visits, 2);

        let tree = search.tree();
        assert_eq!(tree.len(), 2);
        let (mv, child_id) = tree.get(tree.root()).children[0];
        assert_eq!(mv, 0);

        // Exactly one new disc, on the bottom row of the expanded column
        let child = &tree.get(child_id).state;
        assert_eq!(child.move_count(), 1);
        assert_eq!(child.cell(ROWS - 1, 0), PLAYER_ONE);
        assert_eq!(child.last_move(), Some((5, 0)));
    }

    #[test]
    fn test_expansion_plays_for_side_to_move() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut search = MctsSearch::new(Board::new(), PLAYER_TWO, config(1)).unwrap();
        search.run_iterations(1, &mut rng).unwrap();

        let tree = search.tree();
        let (_, child_id) = tree.get(tree.root()).children[0];
        assert_eq!(tree.get(child_id).state.cell(ROWS - 1, 0), PLAYER_TWO);
    }

    #[test]
    fn test_visit_accounting() {
        let n = 200;
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut search = MctsSearch::new(Board::new(), PLAYER_ONE, config(n)).unwrap();
        search.run_iterations(n, &mut rng).unwrap();

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert_eq!(root.visits, 1 + n);
        assert_eq!(search.iterations_run(), n);

        // Root children are created first, in column order
        let moves: Vec<usize> = root.children.iter().map(|(mv, _)| *mv).collect();
        assert_eq!(moves, (0..COLS).collect::<Vec<_>>());

        // Each iteration passes through exactly one root child
        let child_visits: u32 = root
            .children
            .iter()
            .map(|(_, id)| tree.get(*id).visits)
            .sum();
        assert_eq!(child_visits, root.children.len() as u32 + n);

        // At most one node is created per iteration
        assert!(tree.len() <= 1 + n as usize);
    }

    #[test]
    fn test_no_duplicate_children() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut search = MctsSearch::new(Board::new(), PLAYER_ONE, config(500)).unwrap();
        search.run_iterations(500, &mut rng).unwrap();

        for node in search.tree().arena() {
            let mut moves: Vec<usize> = node.children.iter().map(|(mv, _)| *mv).collect();
            let total = moves.len();
            moves.sort_unstable();
            moves.dedup();
            assert_eq!(moves.len(), total);
            assert!(moves.iter().all(|mv| node.state.try_move(*mv).is_some()));
        }
    }

    #[test]
    fn test_children_states_are_independent() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let mut search = MctsSearch::new(Board::new(), PLAYER_ONE, config(50)).unwrap();
        search.run_iterations(50, &mut rng).unwrap();

        let tree = search.tree();
        assert_eq!(tree.get(tree.root()).state, Board::new());
        for node in tree.arena().iter().skip(1) {
            let parent = tree.get(node.parent);
            assert_eq!(node.state.move_count(), parent.state.move_count() + 1);
        }
    }

    #[test]
    fn test_winning_child_collects_every_visit_as_reward() {
        let board: Board = WIN_IN_ONE.parse().unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut search = MctsSearch::new(board, PLAYER_ONE, config(300)).unwrap();
        let result = search.run(&mut rng).unwrap();

        let winning = result
            .children
            .iter()
            .find(|stats| stats.mv == 3)
            .unwrap();
        assert!(winning.visits > 1);
        assert_eq!(winning.reward, f64::from(winning.visits - 1));
    }

    #[test]
    fn test_same_seed_same_result() {
        let board: Board = WIN_IN_ONE.parse().unwrap();
        let run = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let result = run_mcts(board.clone(), PLAYER_ONE, config(150), &mut rng).unwrap();
            (result.best_move, result.children)
        };
        assert_eq!(run(99), run(99));
    }
}
