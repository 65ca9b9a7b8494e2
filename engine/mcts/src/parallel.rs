//! Root-parallel search.
//!
//! Each worker grows its own tree from the same root with its own
//! `ChaCha20Rng`, seeded from the caller's generator before any thread
//! starts. Trees share nothing while running; their root-child statistics are
//! summed per move afterwards and the final choice goes through the same UCB1
//! scorer with exploration disabled.

use engine_core::{GameState, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::config::MctsConfig;
use crate::search::{check_root, ChildStats, MctsSearch, SearchError, SearchResult};
use crate::selection::{pick_best, ucb1};

/// Split `iterations` over at most `workers` trees, each getting at least one.
pub fn split_budget(iterations: u32, workers: usize) -> Vec<u32> {
    let workers = workers.min(iterations as usize).max(1) as u32;
    let base = iterations / workers;
    let extra = iterations % workers;
    (0..workers)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}

/// Sum per-move statistics across trees, keeping first-seen move order.
fn merge_children<M: Copy + PartialEq>(per_tree: Vec<Vec<ChildStats<M>>>) -> Vec<ChildStats<M>> {
    let mut merged: Vec<ChildStats<M>> = Vec::new();
    for stats in per_tree.into_iter().flatten() {
        match merged.iter_mut().find(|m| m.mv == stats.mv) {
            Some(existing) => {
                existing.visits = existing.visits.saturating_add(stats.visits);
                existing.reward += stats.reward;
            }
            None => merged.push(stats),
        }
    }
    merged
}

/// Run `config.workers` independent searches on a rayon pool and combine them.
pub fn run_root_parallel<S: GameState>(
    state: &S,
    to_move: Player,
    config: &MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<S::Move>, SearchError> {
    check_root(state, to_move, config)?;

    let budgets = split_budget(config.iterations, config.workers);
    let seeds: Vec<u64> = budgets.iter().map(|_| rng.gen()).collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(budgets.len())
        .build()
        .map_err(|e| SearchError::ThreadPool(e.to_string()))?;

    let per_tree: Vec<Vec<ChildStats<S::Move>>> = pool.install(|| {
        budgets
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(&budget, &seed)| {
                let mut worker_rng = ChaCha20Rng::seed_from_u64(seed);
                let worker_config = config.clone().with_iterations(budget).with_workers(1);
                let mut search = MctsSearch::new(state.clone(), to_move, worker_config)?;
                search.run_iterations(budget, &mut worker_rng)?;
                Ok(search.root_children())
            })
            .collect::<Result<Vec<_>, SearchError>>()
    })?;

    let children = merge_children(per_tree);
    let iterations: u32 = budgets.iter().sum();
    let root_visits = iterations.saturating_add(1);

    let scored = children
        .iter()
        .enumerate()
        .map(|(index, child)| (index, ucb1(child.reward, child.visits, root_visits, 0.0)));
    let best = pick_best(scored, rng).ok_or(SearchError::EmptySelection(0))?;
    let chosen = &children[best];

    debug!(
        workers = budgets.len(),
        iterations = iterations,
        children = children.len(),
        best_visits = chosen.visits,
        "Root-parallel MCTS search complete"
    );

    Ok(SearchResult {
        best_move: chosen.mv,
        value: chosen.reward / f64::from(chosen.visits),
        iterations,
        root_visits,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::run_mcts;
    use engine_core::{PLAYER_ONE, PLAYER_TWO};
    use games_connect4::{Board, COLS};

    #[test]
    fn test_split_budget() {
        assert_eq!(split_budget(10, 3), vec![4, 3, 3]);
        assert_eq!(split_budget(8, 4), vec![2, 2, 2, 2]);
        // Never more workers than iterations
        assert_eq!(split_budget(2, 8), vec![1, 1]);
        assert_eq!(split_budget(5, 1), vec![5]);
    }

    #[test]
    fn test_merge_children_sums_per_move() {
        let a = vec![
            ChildStats { mv: 0, visits: 3, reward: 1.0 },
            ChildStats { mv: 1, visits: 2, reward: -1.0 },
        ];
        let b = vec![
            ChildStats { mv: 1, visits: 4, reward: 2.0 },
            ChildStats { mv: 2, visits: 1, reward: 0.0 },
        ];

        let merged = merge_children(vec![a, b]);
        assert_eq!(
            merged,
            vec![
                ChildStats { mv: 0, visits: 3, reward: 1.0 },
                ChildStats { mv: 1, visits: 6, reward: 1.0 },
                ChildStats { mv: 2, visits: 1, reward: 0.0 },
            ]
        );
    }

    #[test]
    fn test_merge_children_saturates_visits() {
        let a = vec![ChildStats { mv: 3, visits: u32::MAX - 1, reward: 1.0 }];
        let b = vec![ChildStats { mv: 3, visits: 5, reward: 1.0 }];

        let merged = merge_children(vec![a, b]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].visits, u32::MAX);
        assert_eq!(merged[0].reward, 2.0);
    }

    #[test]
    fn test_parallel_search_rejects_unbounded_budget() {
        let config = MctsConfig::default()
            .with_iterations(u32::MAX)
            .with_workers(2);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert!(matches!(
            run_root_parallel(&Board::new(), PLAYER_ONE, &config, &mut rng),
            Err(SearchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parallel_search_covers_all_root_moves() {
        let config = MctsConfig::for_testing().with_iterations(400).with_workers(4);
        let mut rng = ChaCha20Rng::seed_from_u64(17);

        let result = run_mcts(Board::new(), PLAYER_ONE, config, &mut rng).unwrap();

        assert_eq!(result.iterations, 400);
        assert_eq!(result.root_visits, 401);
        assert_eq!(result.children.len(), COLS);
        assert!(result.best_move < COLS);
        // Four trees, each with 100 passes through its root children
        let visits: u32 = result.children.iter().map(|c| c.visits).sum();
        assert_eq!(visits, 4 * COLS as u32 + 400);
    }

    #[test]
    fn test_parallel_search_is_reproducible() {
        let config = MctsConfig::for_testing().with_iterations(200).with_workers(3);
        let run = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let result = run_mcts(Board::new(), PLAYER_TWO, config.clone(), &mut rng).unwrap();
            (result.best_move, result.children)
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_parallel_search_rejects_finished_game() {
        let won: Board = "
            . . . . . . .
            . . . . . . .
            X . . . . . .
            X O . . . . .
            X O . . . . .
            X O . . . . .
        "
        .parse()
        .unwrap();
        let config = MctsConfig::for_testing().with_workers(2);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert!(matches!(
            run_root_parallel(&won, PLAYER_TWO, &config, &mut rng),
            Err(SearchError::GameOver)
        ));
    }
}
