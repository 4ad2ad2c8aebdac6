//! Zobrist keys for hashing board positions.
//!
//! A search strategy can key a transposition table on [`ZobristTable::hash`]
//! and update the hash incrementally with [`ZobristTable::key`] as cells
//! change, since XOR-ing a key in twice cancels it out.

use packdrop_engine::{BOARD_WIDTH, Block, Board, OBSTACLE_VALUE, SIMULATION_HEIGHT};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64;

/// Seed of the table every strategy shares unless it asks for another.
pub const DEFAULT_ZOBRIST_SEED: u64 = 810;

const CELL_VALUES: usize = OBSTACLE_VALUE as usize + 1;
const KEY_COUNT: usize = SIMULATION_HEIGHT * BOARD_WIDTH * CELL_VALUES;

/// One random non-zero key per (row, column, cell value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristTable {
    keys: Box<[u64]>,
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::with_seed(DEFAULT_ZOBRIST_SEED)
    }
}

impl ZobristTable {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let keys = (0..KEY_COUNT).map(|_| rng.random_range(1..=u64::MAX)).collect();
        Self { keys }
    }

    /// Key of `block` at the given cell. Empty cells hash to zero.
    #[must_use]
    pub fn key(&self, row: usize, column: usize, block: Block) -> u64 {
        if block.is_empty() {
            return 0;
        }
        let index = (row * BOARD_WIDTH + column) * CELL_VALUES + usize::from(block.value());
        self.keys[index]
    }

    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        let mut hash = 0;
        for (y, row) in board.rows().iter().enumerate() {
            for (x, &block) in row.iter().enumerate() {
                hash ^= self.key(y, x, block);
            }
        }
        hash
    }
}
