use serde::Serialize;
use std::fmt;

#[derive(Serialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerNum {
    P1,
    P2,
}

impl PlayerNum {
    pub const FIRST: PlayerNum = PlayerNum::P1;

    // Round-robin over the two players
    pub fn next(self) -> Self {
        match self {
            PlayerNum::P1 => PlayerNum::P2,
            PlayerNum::P2 => PlayerNum::P1,
        }
    }
}

impl fmt::Display for PlayerNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerNum::P1 => write!(f, "1"),
            PlayerNum::P2 => write!(f, "2"),
        }
    }
}
