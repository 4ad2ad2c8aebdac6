//! Board, pack and cell representations shared by every strategy.
//!
//! Coordinates follow the judge's reading order: row 0 is the top row of the
//! simulation grid and column 0 is the leftmost column.

pub use self::{block::*, board::*, pack::*};

pub(crate) mod block;
pub(crate) mod board;
pub(crate) mod pack;

/// Number of columns on a board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows the judge sends (the visible play area).
pub const VISIBLE_HEIGHT: usize = 16;
/// Side length of a square pack.
pub const PACK_SIZE: usize = 2;
/// Rows kept above the visible area so a stack can overflow without clipping.
pub const HIDDEN_HEIGHT: usize = PACK_SIZE + 1;
/// Total number of rows in a board, hidden buffer included.
pub const SIMULATION_HEIGHT: usize = VISIBLE_HEIGHT + HIDDEN_HEIGHT;
/// Largest column a pack may be dropped at without overhanging the right edge.
pub const MAX_POSITION: usize = BOARD_WIDTH - PACK_SIZE;
/// Number of packs announced before the first turn.
pub const MAX_TURN: usize = 500;
