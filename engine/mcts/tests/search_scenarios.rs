//! End-to-end search scenarios on Connect 4 positions.
//!
//! These are statistical: each runs a full search over several fixed seeds
//! and requires the expected column in nearly all of them.

use engine_core::{GameState, PLAYER_ONE, PLAYER_TWO};
use games_connect4::Board;
use mcts::{run_mcts, MctsConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn board(text: &str) -> Board {
    text.parse().expect("valid board text")
}

fn count_picks(board: &Board, config: &MctsConfig, seeds: u64, column: usize) -> u64 {
    (0..seeds)
        .filter(|&seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let result = run_mcts(board.clone(), PLAYER_ONE, config.clone(), &mut rng).unwrap();
            result.best_move == column
        })
        .count() as u64
}

#[test]
fn test_takes_horizontal_win() {
    let position = board(
        "
        . . . . . . .
        . . . . . . .
        . . . . . . .
        . . . . . . .
        O O O . . . .
        X X X . . . .
        ",
    );
    let config = MctsConfig::default().with_iterations(500);

    let hits = count_picks(&position, &config, 20, 3);
    assert!(hits >= 18, "winning column chosen in {}/20 searches", hits);

    let after = position.apply_move(3, PLAYER_ONE).unwrap();
    assert_eq!(after.winner(), PLAYER_ONE);
}

#[test]
fn test_blocks_opponent_win() {
    // O threatens to complete the bottom row at column 3
    let position = board(
        "
        . . . . . . .
        . . . . . . .
        . . . . . . .
        . . . . . . .
        . . . . . . X
        O O O . . X X
        ",
    );
    let config = MctsConfig::default().with_iterations(1000);

    let hits = count_picks(&position, &config, 10, 3);
    assert!(hits >= 8, "blocking column chosen in {}/10 searches", hits);

    // Not blocking hands O the game
    let unblocked = position.apply_move(4, PLAYER_ONE).unwrap();
    let lost = unblocked.apply_move(3, PLAYER_TWO).unwrap();
    assert_eq!(lost.winner(), PLAYER_TWO);
}

#[test]
fn test_root_parallel_takes_horizontal_win() {
    let position = board(
        "
        . . . . . . .
        . . . . . . .
        . . . . . . .
        . . . . . . .
        O O O . . . .
        X X X . . . .
        ",
    );
    let config = MctsConfig::default().with_iterations(800).with_workers(4);

    let hits = count_picks(&position, &config, 10, 3);
    assert!(hits >= 9, "winning column chosen in {}/10 searches", hits);
}

#[test]
fn test_single_legal_move_is_chosen() {
    let position = board(
        "
        X O X O X O .
        X O X O X O X
        O X O X O X O
        O X O X O X O
        X O X O X O X
        X O X O X O X
        ",
    );
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let result = run_mcts(position, PLAYER_ONE, MctsConfig::for_testing(), &mut rng).unwrap();

    assert_eq!(result.best_move, 6);
    assert_eq!(result.children.len(), 1);
}

#[test]
fn test_beats_random_opponent() {
    let config = MctsConfig::default().with_iterations(300);
    let mut wins = 0;

    for seed in 0..5 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut position = Board::new();
        let mut player = PLAYER_ONE;

        while !position.is_over() {
            position = if player == PLAYER_ONE {
                let result =
                    run_mcts(position.clone(), PLAYER_ONE, config.clone(), &mut rng).unwrap();
                position.apply_move(result.best_move, PLAYER_ONE).unwrap()
            } else {
                position.next_random_state(PLAYER_TWO, &mut rng).unwrap()
            };
            player = -player;
        }

        if position.winner() == PLAYER_ONE {
            wins += 1;
        }
    }

    assert!(wins >= 4, "won {}/5 games against random play", wins);
}
