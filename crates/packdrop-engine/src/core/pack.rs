use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::InvalidBlockError;

use super::{PACK_SIZE, block::Block};

/// A square tile of blocks dropped onto the board each turn.
///
/// Packs are immutable; rotation and settling return new values. A pack may
/// hold anywhere from zero to `PACK_SIZE * PACK_SIZE` numbered blocks.
///
/// # Example
///
/// ```
/// use packdrop_engine::{Pack, PackRotation};
///
/// let pack = Pack::from_values([[1, 2], [3, 0]]).unwrap();
/// let rotated = pack.rotated(PackRotation::normalized(1));
/// assert_eq!(rotated, Pack::from_values([[3, 1], [0, 2]]).unwrap());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pack {
    cells: [[Block; PACK_SIZE]; PACK_SIZE],
}

impl Pack {
    pub const EMPTY: Self = Self {
        cells: [[Block::Empty; PACK_SIZE]; PACK_SIZE],
    };

    #[must_use]
    pub const fn new(cells: [[Block; PACK_SIZE]; PACK_SIZE]) -> Self {
        Self { cells }
    }

    /// Builds a pack from wire values, top row first.
    ///
    /// Only empty cells and numbered blocks are accepted; an obstacle never
    /// appears inside a pack.
    pub fn from_values(values: [[u8; PACK_SIZE]; PACK_SIZE]) -> Result<Self, InvalidBlockError> {
        let mut cells = [[Block::Empty; PACK_SIZE]; PACK_SIZE];
        for (cell_row, value_row) in cells.iter_mut().zip(values) {
            for (cell, value) in cell_row.iter_mut().zip(value_row) {
                let block = Block::from_value(value)?;
                if block.is_obstacle() {
                    return Err(InvalidBlockError { value });
                }
                *cell = block;
            }
        }
        Ok(Self { cells })
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Block {
        self.cells[row][column]
    }

    #[must_use]
    pub fn rows(&self) -> &[[Block; PACK_SIZE]; PACK_SIZE] {
        &self.cells
    }

    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.cells.iter().flatten().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks().all(Block::is_empty)
    }

    /// Rotates the pack a quarter turn clockwise.
    ///
    /// The cell at `(i, j)` moves to `(j, PACK_SIZE - 1 - i)`.
    #[must_use]
    pub fn rotated_once(&self) -> Self {
        let mut cells = [[Block::Empty; PACK_SIZE]; PACK_SIZE];
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &block) in row.iter().enumerate() {
                cells[j][PACK_SIZE - 1 - i] = block;
            }
        }
        Self { cells }
    }

    #[must_use]
    pub fn rotated(&self, rotation: PackRotation) -> Self {
        (0..rotation.quarter_turns()).fold(*self, |pack, _| pack.rotated_once())
    }

    /// Lets every block fall to the bottom of its column inside the tile.
    ///
    /// Two rotations that differ only by a floating block produce the same
    /// shape once dropped on a board, and settle to equal packs.
    #[must_use]
    pub fn settled(&self) -> Self {
        let mut cells = [[Block::Empty; PACK_SIZE]; PACK_SIZE];
        for column in 0..PACK_SIZE {
            let mut dest = PACK_SIZE;
            for row in (0..PACK_SIZE).rev() {
                let block = self.cells[row][column];
                if block.is_empty() {
                    continue;
                }
                dest -= 1;
                cells[dest][column] = block;
            }
        }
        Self { cells }
    }

    /// Returns the rotations whose settled shapes differ from each other.
    ///
    /// Each entry is the settled pack paired with the rotation producing it,
    /// in ascending rotation order.
    #[must_use]
    pub fn distinct_rotations(&self) -> ArrayVec<(Pack, PackRotation), 4> {
        let mut result: ArrayVec<(Pack, PackRotation), 4> = ArrayVec::new();
        for rotation in PackRotation::ALL {
            let pack = self.rotated(rotation).settled();
            if result.iter().any(|(seen, _)| *seen == pack) {
                continue;
            }
            result.push((pack, rotation));
        }
        result
    }
}

impl fmt::Display for Pack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, block) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{block:>2}")?;
            }
        }
        Ok(())
    }
}

/// Number of clockwise quarter turns applied to a pack.
///
/// Always in `0..4`; counts outside that range are reduced modulo 4 by
/// [`PackRotation::normalized`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackRotation(u8);

impl PackRotation {
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    #[must_use]
    pub const fn new(quarter_turns: u8) -> Option<Self> {
        if quarter_turns < 4 {
            Some(Self(quarter_turns))
        } else {
            None
        }
    }

    /// Reduces any signed turn count to `0..4` (Euclidean remainder).
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn normalized(quarter_turns: i64) -> Self {
        Self(quarter_turns.rem_euclid(4) as u8)
    }

    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn rotated_right(self) -> Self {
        Self((self.0 + 1) % 4)
    }
}

impl fmt::Display for PackRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(values: [[u8; PACK_SIZE]; PACK_SIZE]) -> Pack {
        Pack::from_values(values).unwrap()
    }

    fn sorted_values(pack: &Pack) -> Vec<u8> {
        let mut values: Vec<u8> = pack.blocks().map(Block::value).collect();
        values.sort_unstable();
        values
    }

    #[test]
    fn test_rotate_once_moves_each_cell() {
        // (i, j) -> (j, 1 - i): (0,0)->(0,1), (0,1)->(1,1), (1,0)->(0,0), (1,1)->(1,0)
        let p = pack([[1, 2], [3, 0]]);
        assert_eq!(p.rotated_once(), pack([[3, 1], [0, 2]]));
    }

    #[test]
    fn test_rotate_sequence() {
        let mut p = pack([[9, 5], [0, 3]]);
        p = p.rotated_once();
        assert_eq!(p, pack([[0, 9], [3, 5]]));
        p = p.rotated_once();
        assert_eq!(p, pack([[3, 0], [5, 9]]));
        p = p.rotated_once();
        assert_eq!(p, pack([[5, 3], [9, 0]]));
        p = p.rotated_once();
        assert_eq!(p, pack([[9, 5], [0, 3]]));
    }

    #[test]
    fn test_rotation_has_order_four() {
        let packs = [
            pack([[1, 2], [3, 4]]),
            pack([[0, 7], [0, 0]]),
            pack([[5, 5], [0, 9]]),
            Pack::EMPTY,
        ];
        for p in packs {
            assert_eq!(p.rotated(PackRotation::normalized(4)), p);
            for k in 1..8 {
                let step = p.rotated(PackRotation::normalized(k - 1)).rotated_once();
                assert_eq!(p.rotated(PackRotation::normalized(k)), step, "k = {k}");
            }
        }
    }

    #[test]
    fn test_rotation_preserves_values() {
        let p = pack([[8, 1], [0, 6]]);
        for rotation in PackRotation::ALL {
            assert_eq!(sorted_values(&p.rotated(rotation)), sorted_values(&p));
        }
    }

    #[test]
    fn test_normalized_rotation() {
        assert_eq!(PackRotation::normalized(0), PackRotation::ALL[0]);
        assert_eq!(PackRotation::normalized(5), PackRotation::ALL[1]);
        assert_eq!(PackRotation::normalized(-1), PackRotation::ALL[3]);
        assert_eq!(PackRotation::normalized(-8), PackRotation::ALL[0]);
        assert_eq!(PackRotation::new(4), None);
        assert_eq!(PackRotation::ALL[3].rotated_right(), PackRotation::ALL[0]);
    }

    #[test]
    fn test_empty_pack_rotates() {
        assert!(Pack::EMPTY.is_empty());
        assert_eq!(Pack::EMPTY.rotated_once(), Pack::EMPTY);
        assert_eq!(Pack::EMPTY.distinct_rotations().len(), 1);
    }

    #[test]
    fn test_from_values_rejects_obstacle() {
        assert_eq!(
            Pack::from_values([[21, 0], [0, 0]]),
            Err(InvalidBlockError { value: 21 })
        );
        assert!(Pack::from_values([[20, 0], [0, 0]]).is_err());
    }

    #[test]
    fn test_settled() {
        assert_eq!(pack([[5, 8], [0, 5]]).settled(), pack([[0, 8], [5, 5]]));
        assert_eq!(pack([[1, 2], [3, 4]]).settled(), pack([[1, 2], [3, 4]]));
        assert_eq!(pack([[0, 0], [0, 0]]).settled(), Pack::EMPTY);
    }

    #[test]
    fn test_distinct_rotations() {
        let all = pack([[1, 2], [3, 4]]).distinct_rotations();
        assert_eq!(all.len(), 4);

        // A single block settles to the bottom row: rotations 0/3 and 1/2 pair up
        let single = pack([[7, 0], [0, 0]]).distinct_rotations();
        let rotations: Vec<u8> = single.iter().map(|(_, r)| r.quarter_turns()).collect();
        assert_eq!(rotations, vec![0, 1]);
        assert_eq!(single[0].0, pack([[0, 0], [7, 0]]));
        assert_eq!(single[1].0, pack([[0, 0], [0, 7]]));
    }

    #[test]
    fn test_display() {
        assert_eq!(pack([[1, 12], [0, 3]]).to_string(), " 1 12\n 0  3");
    }
}
