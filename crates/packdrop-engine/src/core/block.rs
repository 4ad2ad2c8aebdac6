use std::fmt;

use serde::{Deserialize, Serialize};

use crate::InvalidBlockError;

/// Two numbered blocks combine when their values add up to this.
pub const SUMMATION: u8 = 20;
/// Wire value of an empty cell.
pub const EMPTY_VALUE: u8 = 0;
/// Wire value of an obstacle block.
pub const OBSTACLE_VALUE: u8 = SUMMATION + 1;

/// Content of a single board or pack cell.
///
/// Ordering follows the wire values, so `Empty < Number(_) < Obstacle`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Block {
    #[default]
    Empty,
    /// A numbered block in `1..SUMMATION`.
    Number(u8),
    /// An inert penalty block.
    Obstacle,
}

impl Block {
    /// Converts a wire value into a block.
    ///
    /// `SUMMATION` itself is reserved and rejected, as is anything above the
    /// obstacle value.
    pub const fn from_value(value: u8) -> Result<Self, InvalidBlockError> {
        match value {
            EMPTY_VALUE => Ok(Block::Empty),
            OBSTACLE_VALUE => Ok(Block::Obstacle),
            v if v < SUMMATION => Ok(Block::Number(v)),
            value => Err(InvalidBlockError { value }),
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Block::Empty => EMPTY_VALUE,
            Block::Number(v) => v,
            Block::Obstacle => OBSTACLE_VALUE,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Block::Empty)
    }

    #[must_use]
    pub const fn is_obstacle(self) -> bool {
        matches!(self, Block::Obstacle)
    }

    #[must_use]
    pub const fn is_number(self) -> bool {
        matches!(self, Block::Number(_))
    }
}

impl From<Block> for u8 {
    fn from(block: Block) -> Self {
        block.value()
    }
}

impl TryFrom<u8> for Block {
    type Error = InvalidBlockError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Block::from_value(value)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}
