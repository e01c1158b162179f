use crate::nim::board::{Board, BoxIndex};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InputError {
    #[error("Number of balls in box must be positive.")]
    BoxSizeNotPositive,
    #[error("Number of balls in box cannot exceed {max}.")]
    BoxSizeTooLarge { max: u32 },
    #[error("Box must be 1 or 2.")]
    BoxOutOfRange(i64),
    #[error("Number of balls to take must be positive.")]
    TakeNotPositive,
    #[error("Cannot take more than {max} balls at a time.")]
    TakeAboveMax { max: u32 },
    #[error("Cannot take more balls than what's in the box.")]
    TakeAboveBox { requested: u32, available: u32 },
    #[error("Please enter a whole number.")]
    NotANumber(String),
}

// A single console token, before any game rule is applied to it
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawInput {
    Number(i64),
    Malformed(String),
}

impl RawInput {
    pub fn parse(token: &str) -> Self {
        match token.parse::<i64>() {
            Ok(n) => RawInput::Number(n),
            Err(_) => RawInput::Malformed(token.to_string()),
        }
    }

    fn number(&self) -> Result<i64, InputError> {
        match self {
            RawInput::Number(n) => Ok(*n),
            RawInput::Malformed(token) => Err(InputError::NotANumber(token.clone())),
        }
    }
}

impl fmt::Display for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawInput::Number(n) => write!(f, "{}", n),
            RawInput::Malformed(token) => write!(f, "{:?}", token),
        }
    }
}

// Initial box sizes must be positive. A malformed token counts as a bad size,
// since setup never re-prompts.
pub fn box_size(input: &RawInput) -> Result<u32, InputError> {
    let n = input
        .number()
        .map_err(|_| InputError::BoxSizeNotPositive)?;
    if n <= 0 {
        return Err(InputError::BoxSizeNotPositive);
    }
    u32::try_from(n).map_err(|_| InputError::BoxSizeTooLarge { max: u32::MAX })
}

pub fn box_choice(input: &RawInput) -> Result<BoxIndex, InputError> {
    let n = input.number()?;
    BoxIndex::from_number(n).ok_or(InputError::BoxOutOfRange(n))
}

/// A move whose quantity is known to be in `1..=min(max_take, count)` for its
/// box on the board it was validated against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ValidMove {
    box_idx: BoxIndex,
    amount: u32,
}

impl ValidMove {
    // validates, in order:
    // - quantity is positive
    // - quantity does not exceed the per-move maximum
    // - quantity does not exceed what's left in the box
    pub fn new(
        input: &RawInput,
        box_idx: BoxIndex,
        board: &Board,
        max_take: u32,
    ) -> Result<Self, InputError> {
        let n = input.number()?;
        if n <= 0 {
            return Err(InputError::TakeNotPositive);
        }
        if n > i64::from(max_take) {
            return Err(InputError::TakeAboveMax { max: max_take });
        }
        // Fits in a u32 since it is no larger than max_take
        let amount = n as u32;
        let available = board[box_idx];
        if amount > available {
            return Err(InputError::TakeAboveBox {
                requested: amount,
                available,
            });
        }
        Ok(ValidMove { box_idx, amount })
    }

    pub fn box_idx(&self) -> BoxIndex {
        self.box_idx
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }
}
