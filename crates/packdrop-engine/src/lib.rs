pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid block value {value}")]
pub struct InvalidBlockError {
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardShapeError {
    #[display("expected {expected} board rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[display("expected {expected} cells in board row {row}, got {actual}")]
    ColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("board row {row}, column {column}: {source}")]
    InvalidBlock {
        row: usize,
        column: usize,
        source: InvalidBlockError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("pack position {position} is out of range (max {max})")]
    PositionOutOfRange { position: usize, max: usize },
    #[display("column {column} has no room left for the pack")]
    ColumnOverflow { column: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveRangeError {
    #[display("position {position} is outside 0..={max}")]
    Position { position: usize, max: usize },
    #[display("rotation {rotation} is outside 0..=3")]
    Rotation { rotation: u8 },
}
