//! Terminal game loop: the AI (X, +1) against a human (O, -1)

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use engine_core::{GameState, Player, PLAYER_ONE, PLAYER_TWO};
use games_connect4::Board;
use mcts::{run_mcts, MctsConfig};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

use crate::human::read_human_move;

/// The side searched by MCTS
pub const AI: Player = PLAYER_ONE;
/// The side reading moves from input
pub const HUMAN: Player = PLAYER_TWO;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    AiWins,
    HumanWins,
    Draw,
}

impl Outcome {
    pub fn from_winner(winner: Player) -> Self {
        match winner {
            AI => Outcome::AiWins,
            HUMAN => Outcome::HumanWins,
            _ => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::AiWins => write!(f, "AI wins!"),
            Outcome::HumanWins => write!(f, "Human wins!"),
            Outcome::Draw => write!(f, "It's a draw!"),
        }
    }
}

/// One game from a starting position to the end.
pub struct GameSession<R, W> {
    board: Board,
    search: MctsConfig,
    human_first: bool,
    rng: ChaCha20Rng,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> GameSession<R, W> {
    pub fn new(
        board: Board,
        search: MctsConfig,
        human_first: bool,
        rng: ChaCha20Rng,
        input: R,
        output: W,
    ) -> Self {
        Self {
            board,
            search,
            human_first,
            rng,
            input,
            output,
        }
    }

    /// Alternate moves until someone wins or the board is full.
    pub fn play(&mut self) -> Result<Outcome> {
        info!(
            rows = self.board.rows(),
            cols = self.board.cols(),
            human_first = self.human_first,
            "Game started"
        );

        let mut human_turn = self.human_first;
        if human_turn {
            self.print_board()?;
        }

        while !self.board.is_over() {
            let (player, column) = if human_turn {
                let column = read_human_move(&self.board, &mut self.input, &mut self.output)?;
                (HUMAN, column)
            } else {
                (AI, self.ai_move()?)
            };

            self.board = self
                .board
                .apply_move(column, player)
                .with_context(|| format!("player {} cannot play column {}", player, column))?;
            debug!(player, column, moves = self.board.move_count(), "Move played");

            self.print_board()?;
            human_turn = !human_turn;
        }

        let outcome = Outcome::from_winner(self.board.winner());
        writeln!(self.output, "{}", outcome)?;
        info!(?outcome, moves = self.board.move_count(), "Game over");
        Ok(outcome)
    }

    /// Search the current position with a fresh tree and return the column.
    pub fn ai_move(&mut self) -> Result<usize> {
        let result = run_mcts(self.board.clone(), AI, self.search.clone(), &mut self.rng)
            .context("AI search failed")?;

        info!(
            column = result.best_move,
            value = result.value,
            iterations = result.iterations,
            "AI move chosen"
        );
        Ok(result.best_move)
    }

    fn print_board(&mut self) -> Result<()> {
        writeln!(self.output, "{}", self.board)?;
        Ok(())
    }

    /// Current position
    pub fn board(&self) -> &Board {
        &self.board
    }
}
