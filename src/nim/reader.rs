use crate::nim::input::RawInput;
use std::collections::VecDeque;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to read console input: {0}")]
    Io(#[from] io::Error),
    #[error("Input ended before the game finished.")]
    Eof,
}

/// Splits console input into whitespace-delimited tokens, reading a new line
/// only once the tokens of the previous one have been used up.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        TokenReader {
            reader,
            pending: VecDeque::new(),
        }
    }

    pub fn next_input(&mut self) -> Result<RawInput, ReadError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                debug!(token = %token, "read token");
                return Ok(RawInput::parse(&token));
            }
            // Bytes that aren't UTF-8 end up in a malformed token instead of
            // failing the read
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Err(ReadError::Eof);
            }
            self.pending.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(str::to_string),
            );
        }
    }
}
