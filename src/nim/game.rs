use crate::config::GameConfig;
use crate::nim::board::{Board, BoxIndex};
use crate::nim::game_state::{GameState, Outcome};
use crate::nim::input::{self, InputError, RawInput, ValidMove};
use crate::nim::player::PlayerNum;
use crate::nim::reader::{ReadError, TokenReader};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

#[derive(Debug, PartialEq, Eq)]
pub enum GameResult {
    // A non-positive box size was entered, so no game was played
    SetupFailed(InputError),
    Won { winner: PlayerNum, board: Board },
    // Input ran out before a box was emptied
    Abandoned,
}

#[derive(Debug)]
enum Phase {
    AwaitingSetup,
    InProgress(GameState),
    Ended(GameState),
}

/// Console front end of a single game: prompts on `output`, reads answers
/// from `input` and drives a [`GameState`] until someone empties a box.
pub struct Game<R, W> {
    input: TokenReader<R>,
    output: W,
    config: GameConfig,
}

impl<R: BufRead, W: Write> Game<R, W> {
    pub fn new(input: R, output: W, config: GameConfig) -> Self {
        Game {
            input: TokenReader::new(input),
            output,
            config,
        }
    }

    pub fn run(&mut self) -> io::Result<GameResult> {
        match self.run_phases() {
            Ok(result) => Ok(result),
            Err(ReadError::Eof) => {
                warn!("Console input ended mid-game, abandoning session");
                writeln!(self.output, "{}", ReadError::Eof)?;
                Ok(GameResult::Abandoned)
            }
            Err(ReadError::Io(err)) => Err(err),
        }
    }

    fn run_phases(&mut self) -> Result<GameResult, ReadError> {
        let mut phase = Phase::AwaitingSetup;
        loop {
            phase = match phase {
                Phase::AwaitingSetup => match self.setup()? {
                    Ok(board) => {
                        info!(boxes = ?board.counts(), "setup accepted");
                        Phase::InProgress(GameState::new(board))
                    }
                    Err(err) => {
                        warn!("Setup rejected: {}", err);
                        writeln!(self.output, "{}", err)?;
                        return Ok(GameResult::SetupFailed(err));
                    }
                },
                Phase::InProgress(mut state) => {
                    self.turn(&mut state)?;
                    if state.is_over() {
                        Phase::Ended(state)
                    } else {
                        Phase::InProgress(state)
                    }
                }
                Phase::Ended(state) => return self.finish(state),
            }
        }
    }

    // Asks for each box size in turn and stops at the first bad one
    fn setup(&mut self) -> Result<Result<Board, InputError>, ReadError> {
        let mut counts = [0; 2];
        for (count, box_idx) in counts.iter_mut().zip(BoxIndex::ALL) {
            writeln!(self.output, "How many balls in box {}?", box_idx)?;
            self.output.flush()?;
            let raw = self.input.next_input()?;
            match input::box_size(&raw) {
                Ok(size) => *count = size,
                Err(err) => return Ok(Err(err)),
            }
        }
        Ok(Ok(Board::new(counts)))
    }

    fn turn(&mut self, state: &mut GameState) -> Result<Outcome, ReadError> {
        state
            .board()
            .render_to(&mut self.output, &self.config.display)?;

        let player = state.current_player();
        let box_prompt = format!(
            "Player {0}, it's your turn.\nPlayer {0}, choose a box (1 or 2):\n",
            player
        );
        let box_idx = self.prompt_until_valid(&box_prompt, input::box_choice)?;

        let max_take = self.config.max_take;
        let take_prompt = format!(
            "Player {}, how many balls do you want to take from box {}?\n",
            player, box_idx
        );
        let board = state.board();
        let valid_move = self.prompt_until_valid(&take_prompt, |raw| {
            ValidMove::new(raw, box_idx, board, max_take)
        })?;

        Ok(state.apply(valid_move))
    }

    fn finish(&mut self, state: GameState) -> Result<GameResult, ReadError> {
        let winner = match state.winner() {
            Some(winner) => winner,
            None => return Ok(GameResult::Abandoned),
        };
        let board = state.board().clone();
        board.render_to(&mut self.output, &self.config.display)?;
        writeln!(self.output, "Player {} wins the game.", winner)?;
        self.output.flush()?;
        info!(
            winner = %winner,
            turns = state.turns_played(),
            board = %serde_json::to_string(&board).unwrap_or_default(),
            "game won"
        );
        Ok(GameResult::Won { winner, board })
    }

    // Re-prompts with the validation error until the answer is accepted.
    // There is no retry limit.
    fn prompt_until_valid<T, F>(&mut self, prompt: &str, validate: F) -> Result<T, ReadError>
    where
        F: Fn(&RawInput) -> Result<T, InputError>,
    {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;
            let raw = self.input.next_input()?;
            match validate(&raw) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    warn!(input = %raw, "Rejected input: {:?}", err);
                    writeln!(self.output, "{}", err)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(input: &str) -> (GameResult, String) {
        play_with(input, GameConfig::default())
    }

    fn play_with(input: &str, config: GameConfig) -> (GameResult, String) {
        let mut output = Vec::new();
        let result = Game::new(Cursor::new(input.to_string()), &mut output, config)
            .run()
            .unwrap();
        (result, String::from_utf8(output).unwrap())
    }

    // Keeps a byte count and the tail of what was written
    struct TailWriter {
        written: u64,
        tail: Vec<u8>,
    }

    impl Write for TailWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written += buf.len() as u64;
            self.tail.extend_from_slice(buf);
            let excess = self.tail.len().saturating_sub(256);
            self.tail.drain(..excess);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_huge_box_is_drawn_without_buffering() {
        let size: u32 = 100_000_000;
        let mut output = TailWriter {
            written: 0,
            tail: Vec::new(),
        };
        let input = format!("{} 1\n2\n1\n", size);
        let result = Game::new(Cursor::new(input), &mut output, GameConfig::default())
            .run()
            .unwrap();
        assert_eq!(
            result,
            GameResult::Won {
                winner: PlayerNum::P1,
                board: Board::new([size, 0]),
            }
        );
        // The first box is drawn twice, before the turn and on the final board
        assert!(output.written > 2 * u64::from(size));
        let tail = String::from_utf8(output.tail).unwrap();
        assert!(tail.ends_with("Box 2: \n---------------\nPlayer 1 wins the game.\n"));
    }

    #[test]
    fn test_second_player_empties_box() {
        let (result, output) = play("3\n2\n1\n2\n2\n2\n");
        assert_eq!(
            result,
            GameResult::Won {
                winner: PlayerNum::P2,
                board: Board::new([1, 0]),
            }
        );
        assert!(output.contains("Player 1, how many balls do you want to take from box 1?"));
        assert!(output.contains("Player 2, choose a box (1 or 2):"));
        assert!(output.ends_with(
            "---------------\nBox 1: o\nBox 2: \n---------------\nPlayer 2 wins the game.\n"
        ));
    }

    #[test]
    fn test_setup_rejects_non_positive() {
        let (result, output) = play("0 5\n");
        assert_eq!(result, GameResult::SetupFailed(InputError::BoxSizeNotPositive));
        assert_eq!(
            output,
            "How many balls in box 1?\nNumber of balls in box must be positive.\n"
        );
        assert!(!output.contains("your turn"));

        let (result, output) = play("4 -1\n");
        assert_eq!(result, GameResult::SetupFailed(InputError::BoxSizeNotPositive));
        assert!(output.contains("How many balls in box 2?"));
        assert!(!output.contains("your turn"));
    }

    #[test]
    fn test_take_diagnostics_then_accept() {
        // box 1 holds 2: try 0, 4, 3 then 2
        let (result, output) = play("2 5\n1\n0\n4\n3\n2\n");
        assert_eq!(
            result,
            GameResult::Won {
                winner: PlayerNum::P1,
                board: Board::new([0, 5]),
            }
        );
        let not_positive = output.find("Number of balls to take must be positive.").unwrap();
        let above_max = output.find("Cannot take more than 3 balls at a time.").unwrap();
        let above_box = output
            .find("Cannot take more balls than what's in the box.")
            .unwrap();
        assert!(not_positive < above_max && above_max < above_box);
        assert_eq!(
            output
                .matches("Player 1, how many balls do you want to take from box 1?")
                .count(),
            4
        );
    }

    #[test]
    fn test_box_choice_reprompts() {
        let (result, output) = play("1 1\n0\n3\nfoo\n2\n1\n");
        assert_eq!(
            result,
            GameResult::Won {
                winner: PlayerNum::P1,
                board: Board::new([1, 0]),
            }
        );
        assert_eq!(output.matches("Player 1, it's your turn.").count(), 4);
        assert_eq!(output.matches("Box must be 1 or 2.").count(), 2);
        assert_eq!(output.matches("Please enter a whole number.").count(), 1);
    }

    #[test]
    fn test_invalid_utf8_reprompts() {
        let mut output = Vec::new();
        let input = b"1 1\n\xc3\x28\n1\n1\n".to_vec();
        let result = Game::new(Cursor::new(input), &mut output, GameConfig::default())
            .run()
            .unwrap();
        assert_eq!(
            result,
            GameResult::Won {
                winner: PlayerNum::P1,
                board: Board::new([0, 1]),
            }
        );
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Please enter a whole number.").count(), 1);
    }

    #[test]
    fn test_board_shown_every_turn() {
        let (_, output) = play("4 4\n1 1\n2 1\n1 3\n");
        assert!(output.contains("Box 1: oooo\nBox 2: oooo\n"));
        assert!(output.contains("Box 1: ooo\nBox 2: oooo\n"));
        assert!(output.contains("Box 1: ooo\nBox 2: ooo\n"));
        assert!(output.ends_with("Player 1 wins the game.\n"));
    }

    #[test]
    fn test_eof_abandons_game() {
        let (result, output) = play("3 3\n1\n");
        assert_eq!(result, GameResult::Abandoned);
        assert!(output.ends_with("Input ended before the game finished.\n"));
        assert!(!output.contains("wins the game"));
    }

    #[test]
    fn test_custom_max_take() {
        let config = GameConfig {
            max_take: 5,
            ..GameConfig::default()
        };
        let (result, output) = play_with("5 5\n1\n6\n5\n", config);
        assert!(output.contains("Cannot take more than 5 balls at a time."));
        assert_eq!(
            result,
            GameResult::Won {
                winner: PlayerNum::P1,
                board: Board::new([0, 5]),
            }
        );
    }
}
