mod board;
mod game;
mod game_state;
mod input;
mod player;
mod reader;

pub use board::{Board, BoxIndex};
pub use game::{Game, GameResult};
pub use game_state::{GameState, Outcome};
pub use input::{InputError, RawInput, ValidMove};
pub use player::PlayerNum;
pub use reader::{ReadError, TokenReader};
