use std::fmt;

use crate::{BoardShapeError, PlacementError};

use super::{
    BOARD_WIDTH, HIDDEN_HEIGHT, MAX_POSITION, SIMULATION_HEIGHT, VISIBLE_HEIGHT, block::Block,
    pack::Pack,
};

/// One row of cells, leftmost column first.
pub type BoardRow = [Block; BOARD_WIDTH];

/// A player's grid, hidden overflow buffer included.
///
/// # Layout
///
/// - **Rows**: `SIMULATION_HEIGHT` (19), row 0 at the top
/// - **Hidden buffer**: rows `0..HIDDEN_HEIGHT`, always empty right after parsing
/// - **Visible area**: rows `HIDDEN_HEIGHT..`, exactly what the judge sends
///
/// A board is rebuilt from the judge's snapshot each turn. Every operation
/// that changes cells returns a new board and leaves `self` untouched, so a
/// strategy can simulate on copies without disturbing the canonical snapshot.
///
/// # Example
///
/// ```
/// use packdrop_engine::{BOARD_WIDTH, Board, VISIBLE_HEIGHT};
///
/// let rows = vec![vec![0_u8; BOARD_WIDTH]; VISIBLE_HEIGHT];
/// let board = Board::from_visible_rows(&rows).unwrap();
/// let injected = board.with_obstacles(BOARD_WIDTH as u32);
///
/// assert_eq!(injected.count_blocks().obstacle, BOARD_WIDTH);
/// assert_eq!(board.count_blocks().obstacle, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [BoardRow; SIMULATION_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Numbers of non-empty cells on a board, by kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockCount {
    pub numbered: usize,
    pub obstacle: usize,
}

impl Board {
    pub const EMPTY: Self = Self {
        rows: [[Block::Empty; BOARD_WIDTH]; SIMULATION_HEIGHT],
    };

    /// Builds a board from the judge's visible rows, top row first.
    ///
    /// The hidden buffer rows are left empty.
    pub fn from_visible_rows<R>(rows: &[R]) -> Result<Self, BoardShapeError>
    where
        R: AsRef<[u8]>,
    {
        if rows.len() != VISIBLE_HEIGHT {
            return Err(BoardShapeError::RowCount {
                expected: VISIBLE_HEIGHT,
                actual: rows.len(),
            });
        }

        let mut board = Self::EMPTY;
        for (y, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != BOARD_WIDTH {
                return Err(BoardShapeError::ColumnCount {
                    row: y,
                    expected: BOARD_WIDTH,
                    actual: values.len(),
                });
            }
            let row = &mut board.rows[HIDDEN_HEIGHT + y];
            for (x, (cell, &value)) in row.iter_mut().zip(values).enumerate() {
                *cell =
                    Block::from_value(value).map_err(|source| BoardShapeError::InvalidBlock {
                        row: y,
                        column: x,
                        source,
                    })?;
            }
        }
        Ok(board)
    }

    /// Returns the cell at `row` (from the top of the simulation grid) and `column`.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Block {
        self.rows[row][column]
    }

    #[must_use]
    pub fn rows(&self) -> &[BoardRow; SIMULATION_HEIGHT] {
        &self.rows
    }

    #[must_use]
    pub fn hidden_rows(&self) -> &[BoardRow] {
        &self.rows[..HIDDEN_HEIGHT]
    }

    #[must_use]
    pub fn visible_rows(&self) -> &[BoardRow] {
        &self.rows[HIDDEN_HEIGHT..]
    }

    /// Drops one row's worth of obstacles once enough have queued.
    ///
    /// Below `BOARD_WIDTH` pending obstacles the board is returned unchanged.
    /// Otherwise each column gets exactly one obstacle in its lowest empty
    /// cell, however large `obstacle_count` is. Full columns are skipped.
    #[must_use]
    pub fn with_obstacles(&self, obstacle_count: u32) -> Self {
        let mut board = self.clone();
        if usize::try_from(obstacle_count).is_ok_and(|count| count < BOARD_WIDTH) {
            return board;
        }
        for x in 0..BOARD_WIDTH {
            if let Some(y) = (0..SIMULATION_HEIGHT)
                .rev()
                .find(|&y| board.rows[y][x].is_empty())
            {
                board.rows[y][x] = Block::Obstacle;
            }
        }
        board
    }

    /// Counts contiguous non-empty cells from the bottom of `column`.
    #[must_use]
    pub fn column_height(&self, column: usize) -> usize {
        self.rows
            .iter()
            .rev()
            .take_while(|row| !row[column].is_empty())
            .count()
    }

    #[must_use]
    pub fn count_blocks(&self) -> BlockCount {
        let mut count = BlockCount::default();
        for block in self.rows.iter().flatten() {
            match block {
                Block::Empty => {}
                Block::Number(_) => count.numbered += 1,
                Block::Obstacle => count.obstacle += 1,
            }
        }
        count
    }

    /// Checks whether any block sits in the hidden buffer above the visible area.
    #[must_use]
    pub fn is_overflowing(&self) -> bool {
        self.hidden_rows().iter().flatten().any(|b| !b.is_empty())
    }

    /// Drops `pack` with its left edge at column `position` onto a copy of the board.
    ///
    /// Blocks fall straight down and land on the topmost occupied cell of
    /// their column; the bottom row of the pack lands first. Empty pack cells
    /// are skipped. No combination or clearing is applied.
    pub fn place_pack(&self, position: usize, pack: &Pack) -> Result<Self, PlacementError> {
        if position > MAX_POSITION {
            return Err(PlacementError::PositionOutOfRange {
                position,
                max: MAX_POSITION,
            });
        }

        let mut board = self.clone();
        for row in pack.rows().iter().rev() {
            for (dx, &block) in row.iter().enumerate() {
                if block.is_empty() {
                    continue;
                }
                let x = position + dx;
                let y = board
                    .landing_row(x)
                    .ok_or(PlacementError::ColumnOverflow { column: x })?;
                board.rows[y][x] = block;
            }
        }
        Ok(board)
    }

    fn landing_row(&self, column: usize) -> Option<usize> {
        let top = (0..SIMULATION_HEIGHT)
            .find(|&y| !self.rows[y][column].is_empty())
            .unwrap_or(SIMULATION_HEIGHT);
        top.checked_sub(1)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, block) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{block:>2}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::OBSTACLE_VALUE;

    use super::*;

    fn board(rows: [[u8; BOARD_WIDTH]; VISIBLE_HEIGHT]) -> Board {
        Board::from_visible_rows(&rows).unwrap()
    }

    fn staircase() -> [[u8; BOARD_WIDTH]; VISIBLE_HEIGHT] {
        let mut rows = [[0; BOARD_WIDTH]; VISIBLE_HEIGHT];
        for (x, height) in (0..BOARD_WIDTH).zip(0..) {
            for y in 0..height {
                rows[VISIBLE_HEIGHT - 1 - y][x] = 1;
            }
        }
        rows
    }

    fn changed_cells(before: &Board, after: &Board) -> Vec<(usize, usize)> {
        let mut changed = vec![];
        for y in 0..SIMULATION_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if before.get(y, x) != after.get(y, x) {
                    changed.push((y, x));
                }
            }
        }
        changed
    }

    #[test]
    fn test_parse_roundtrips_visible_rows() {
        let mut rows = [[0; BOARD_WIDTH]; VISIBLE_HEIGHT];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = u8::try_from((y * 7 + x * 3) % 20).unwrap();
            }
        }
        rows[15][9] = OBSTACLE_VALUE;

        let board = board(rows);
        for row in board.hidden_rows() {
            assert!(row.iter().all(|b| b.is_empty()));
        }
        for (parsed, expected) in board.visible_rows().iter().zip(&rows) {
            let values: Vec<u8> = parsed.iter().map(|b| b.value()).collect();
            assert_eq!(values, expected);
        }
        assert_eq!(board.get(SIMULATION_HEIGHT - 1, 9), Block::Obstacle);
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let short = vec![vec![0_u8; BOARD_WIDTH]; VISIBLE_HEIGHT - 1];
        assert_eq!(
            Board::from_visible_rows(&short),
            Err(BoardShapeError::RowCount {
                expected: VISIBLE_HEIGHT,
                actual: VISIBLE_HEIGHT - 1
            })
        );

        let mut narrow = vec![vec![0_u8; BOARD_WIDTH]; VISIBLE_HEIGHT];
        narrow[4].pop();
        assert_eq!(
            Board::from_visible_rows(&narrow),
            Err(BoardShapeError::ColumnCount {
                row: 4,
                expected: BOARD_WIDTH,
                actual: BOARD_WIDTH - 1
            })
        );

        let mut invalid = vec![vec![0_u8; BOARD_WIDTH]; VISIBLE_HEIGHT];
        invalid[2][3] = 20;
        assert!(matches!(
            Board::from_visible_rows(&invalid),
            Err(BoardShapeError::InvalidBlock {
                row: 2,
                column: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_obstacles_below_threshold_leave_board_unchanged() {
        let mut packed = board(staircase());
        // column 9 filled up through the hidden rows, bottom row filled across
        for y in 0..SIMULATION_HEIGHT {
            packed.rows[y][BOARD_WIDTH - 1] = Block::Number(2);
        }
        packed.rows[SIMULATION_HEIGHT - 1] = [Block::Obstacle; BOARD_WIDTH];
        assert_eq!(packed.column_height(BOARD_WIDTH - 1), SIMULATION_HEIGHT);

        for candidate in [board(staircase()), packed, Board::EMPTY] {
            for count in 0..u32::try_from(BOARD_WIDTH).unwrap() {
                assert_eq!(candidate.with_obstacles(count), candidate, "count = {count}");
            }
        }
    }

    #[test]
    fn test_obstacles_drop_one_per_column() {
        let board = board(staircase());
        for count in [10, 11, 25, 1000] {
            let injected = board.with_obstacles(count);
            let changed = changed_cells(&board, &injected);
            assert_eq!(changed.len(), BOARD_WIDTH, "count = {count}");
            for (y, x) in changed {
                assert!(board.get(y, x).is_empty());
                assert_eq!(injected.get(y, x), Block::Obstacle);
                assert_eq!(y, SIMULATION_HEIGHT - 1 - x);
            }
        }
    }

    #[test]
    fn test_obstacles_do_not_mutate_input() {
        let board = board(staircase());
        let copy = board.clone();
        let _ = board.with_obstacles(40);
        assert_eq!(board, copy);
    }

    #[test]
    fn test_obstacles_single_empty_cell_at_bottom() {
        let mut board = Board::EMPTY;
        // column 0: only the bottom cell is empty; column 1: completely full
        for y in 0..SIMULATION_HEIGHT - 1 {
            board.rows[y][0] = Block::Number(3);
        }
        for y in 0..SIMULATION_HEIGHT {
            board.rows[y][1] = Block::Number(4);
        }

        let injected = board.with_obstacles(u32::try_from(BOARD_WIDTH).unwrap());
        assert_eq!(injected.get(SIMULATION_HEIGHT - 1, 0), Block::Obstacle);
        for y in 0..SIMULATION_HEIGHT - 1 {
            assert_eq!(injected.get(y, 0), Block::Number(3));
        }
        for y in 0..SIMULATION_HEIGHT {
            assert_eq!(injected.get(y, 1), Block::Number(4));
        }
    }

    #[test]
    fn test_obstacles_fill_gap_under_floating_block() {
        let mut rows = [[0; BOARD_WIDTH]; VISIBLE_HEIGHT];
        rows[10][5] = 9;
        let board = board(rows);
        let injected = board.with_obstacles(10);
        assert_eq!(injected.get(SIMULATION_HEIGHT - 1, 5), Block::Obstacle);
        assert_eq!(injected.get(HIDDEN_HEIGHT + 10, 5), Block::Number(9));
    }

    #[test]
    fn test_column_heights() {
        let board = board(staircase());
        let heights: Vec<usize> = (0..BOARD_WIDTH).map(|x| board.column_height(x)).collect();
        assert_eq!(heights, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_count_blocks() {
        let mut rows = [[0; BOARD_WIDTH]; VISIBLE_HEIGHT];
        rows[15] = [0, 0, 1, 3, 6, 2, 2, 1, 21, 0];
        rows[14] = [0, 0, 6, 5, 1, 2, 3, 4, 21, 0];
        rows[13] = [0, 0, 1, 6, 3, 4, 1, 0, 21, 0];
        let board = board(rows);
        assert_eq!(
            board.count_blocks(),
            BlockCount {
                numbered: 17,
                obstacle: 3
            }
        );
    }

    #[test]
    fn test_overflow_after_obstacles() {
        let mut rows = [[1; BOARD_WIDTH]; VISIBLE_HEIGHT];
        rows[0] = [0; BOARD_WIDTH];
        let board = board(rows);
        assert!(!board.is_overflowing());
        let once = board.with_obstacles(10);
        assert!(!once.is_overflowing());
        assert!(once.with_obstacles(10).is_overflowing());
    }

    #[test]
    fn test_place_pack() {
        let board = board(staircase());
        let pack = Pack::from_values([[1, 2], [3, 0]]).unwrap();
        let placed = board.place_pack(3, &pack).unwrap();

        // column 3 has height 3: 3 lands first, then 1 on top
        assert_eq!(placed.get(SIMULATION_HEIGHT - 4, 3), Block::Number(3));
        assert_eq!(placed.get(SIMULATION_HEIGHT - 5, 3), Block::Number(1));
        // column 4 has height 4: the empty bottom-right cell is skipped
        assert_eq!(placed.get(SIMULATION_HEIGHT - 5, 4), Block::Number(2));
        assert_eq!(placed.count_blocks().numbered, board.count_blocks().numbered + 3);
    }

    #[test]
    fn test_place_pack_errors() {
        let pack = Pack::from_values([[1, 2], [3, 4]]).unwrap();
        assert_eq!(
            Board::EMPTY.place_pack(MAX_POSITION + 1, &pack),
            Err(PlacementError::PositionOutOfRange {
                position: MAX_POSITION + 1,
                max: MAX_POSITION
            })
        );

        let mut board = Board::EMPTY;
        for y in 1..SIMULATION_HEIGHT {
            board.rows[y][0] = Block::Number(5);
        }
        assert_eq!(
            board.place_pack(0, &pack),
            Err(PlacementError::ColumnOverflow { column: 0 })
        );
        assert!(board.place_pack(1, &pack).is_ok());
    }

    #[test]
    fn test_display() {
        let board = Board::EMPTY.with_obstacles(10);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), SIMULATION_HEIGHT);
        assert_eq!(lines[0], [" 0"; BOARD_WIDTH].join(" "));
        assert_eq!(lines[SIMULATION_HEIGHT - 1], ["21"; BOARD_WIDTH].join(" "));
    }
}
