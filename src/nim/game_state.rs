use crate::nim::board::Board;
use crate::nim::input::ValidMove;
use crate::nim::player::PlayerNum;
use tracing::{debug, info};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue { next: PlayerNum },
    Winner(PlayerNum),
}

/// One game session: the board, whose turn it is, and the winner once a box
/// has been emptied.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    current: PlayerNum,
    winner: Option<PlayerNum>,
    turns_played: u32,
}

impl GameState {
    pub fn new(board: Board) -> Self {
        GameState {
            board,
            current: PlayerNum::FIRST,
            winner: None,
            turns_played: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> PlayerNum {
        self.current
    }

    pub fn winner(&self) -> Option<PlayerNum> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    // Applies the current player's move. Emptying a box ends the game with the
    // mover as the winner; otherwise the turn passes to the other player.
    pub fn apply(&mut self, valid_move: ValidMove) -> Outcome {
        if let Some(winner) = self.winner {
            debug!("Ignoring move after the game ended: {:?}", valid_move);
            return Outcome::Winner(winner);
        }

        let box_idx = valid_move.box_idx();
        self.board.take(box_idx, valid_move.amount());
        self.turns_played += 1;
        info!(
            player = %self.current,
            box_idx = %box_idx,
            amount = valid_move.amount(),
            remaining = self.board[box_idx],
            "move applied"
        );

        if self.board.is_empty(box_idx) {
            self.winner = Some(self.current);
            Outcome::Winner(self.current)
        } else {
            self.current = self.current.next();
            Outcome::Continue { next: self.current }
        }
    }
}
