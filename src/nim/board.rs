use crate::config::DisplayConfig;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::ops::Index;

pub const NUM_BOXES: usize = 2;

// Balls written per call when drawing a box
const BALLS_PER_WRITE: usize = 1024;

#[derive(Serialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoxIndex {
    B1,
    B2,
}

impl BoxIndex {
    pub const ALL: [BoxIndex; NUM_BOXES] = [BoxIndex::B1, BoxIndex::B2];

    // Boxes are numbered from 1 on the console
    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(BoxIndex::B1),
            2 => Some(BoxIndex::B2),
            _ => None,
        }
    }

    fn slot(self) -> usize {
        match self {
            BoxIndex::B1 => 0,
            BoxIndex::B2 => 1,
        }
    }
}

impl fmt::Display for BoxIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slot() + 1)
    }
}

/// Ball counts of the two boxes.
///
/// Counts only ever go down, and only through [`Board::take`], which the
/// game state calls with an already validated move.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Board([u32; NUM_BOXES]);

impl Index<BoxIndex> for Board {
    type Output = u32;
    fn index(&self, index: BoxIndex) -> &Self::Output {
        &self.0[index.slot()]
    }
}

impl Board {
    pub fn new(counts: [u32; NUM_BOXES]) -> Self {
        Board(counts)
    }

    pub fn counts(&self) -> [u32; NUM_BOXES] {
        self.0
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&count| u64::from(count)).sum()
    }

    pub fn is_empty(&self, box_idx: BoxIndex) -> bool {
        self[box_idx] == 0
    }

    // Saturates so a count can never wrap below zero
    pub(crate) fn take(&mut self, box_idx: BoxIndex, amount: u32) {
        let count = &mut self.0[box_idx.slot()];
        *count = count.saturating_sub(amount);
    }

    // Streams the board so a huge box never has to fit in memory at once
    pub fn render_to<W: Write>(&self, out: &mut W, display: &DisplayConfig) -> io::Result<()> {
        writeln!(out, "{}", display.separator)?;
        let chunk = display.ball.repeat(BALLS_PER_WRITE);
        for box_idx in BoxIndex::ALL {
            write!(out, "Box {}: ", box_idx)?;
            let count = self[box_idx] as usize;
            for _ in 0..count / BALLS_PER_WRITE {
                out.write_all(chunk.as_bytes())?;
            }
            for _ in 0..count % BALLS_PER_WRITE {
                out.write_all(display.ball.as_bytes())?;
            }
            writeln!(out)?;
        }
        writeln!(out, "{}", display.separator)
    }
}
