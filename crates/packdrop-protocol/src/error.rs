use std::io;

use packdrop_engine::{BoardShapeError, GameMove, InvalidBlockError, MoveRangeError};

/// Ways a match can stop other than running to completion.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum ProtocolError {
    #[display("{_0}")]
    Format(ProtocolFormatError),
    /// The judge closed its stream where a new turn would start.
    #[display("judge closed the stream")]
    StreamClosed,
    #[display("{_0}")]
    StrategyViolation(StrategyViolationError),
    #[display("judge stream I/O error: {_0}")]
    Io(io::Error),
}

impl From<ProtocolFormatError> for ProtocolError {
    fn from(err: ProtocolFormatError) -> Self {
        ProtocolError::Format(err)
    }
}

impl From<StrategyViolationError> for ProtocolError {
    fn from(err: StrategyViolationError) -> Self {
        ProtocolError::StrategyViolation(err)
    }
}

impl From<io::Error> for ProtocolError {
    fn from(err: io::Error) -> Self {
        ProtocolError::Io(err)
    }
}

/// A judge record that does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("malformed judge input at line {line}: {kind}")]
pub struct ProtocolFormatError {
    /// 1-based line number of the offending line.
    pub line: usize,
    pub kind: FormatErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum FormatErrorKind {
    #[display("input ended while reading {expected}")]
    UnexpectedEof { expected: &'static str },
    #[display("expected {expected} integers for {what}, got {actual}")]
    TokenCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[display("line is not valid UTF-8")]
    InvalidUtf8,
    #[display("`{token}` is not a valid {what}")]
    InvalidInteger { what: &'static str, token: String },
    #[display("{_0}")]
    Board(BoardShapeError),
    #[display("pack: {_0}")]
    Pack(InvalidBlockError),
    #[display("turn {turn} is outside 0..{max}")]
    TurnOutOfRange { turn: usize, max: usize },
}

/// A strategy returned a move the judge must not receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("strategy move `{chosen}` on turn {turn} rejected: {source}")]
pub struct StrategyViolationError {
    pub turn: usize,
    pub chosen: GameMove,
    pub source: MoveRangeError,
}
