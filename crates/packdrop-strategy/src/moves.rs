//! Move enumeration for strategies that simulate placements.

use arrayvec::ArrayVec;
use packdrop_engine::{Board, GameMove, MAX_POSITION, Pack, PackRotation};

/// Number of distinct in-range moves (4 rotations × every column).
pub const MOVE_COUNT: usize = 4 * (MAX_POSITION + 1);

/// Every in-range move, rotation-major.
#[must_use]
pub fn all_moves() -> ArrayVec<GameMove, MOVE_COUNT> {
    GameMove::all().collect()
}

/// Moves whose placement fits on `board` without a column running out of room.
///
/// `pack` is the unrotated pack of the turn. Rotations that settle to the
/// same shape are tried once, with the lowest rotation kept.
#[must_use]
pub fn legal_moves(board: &Board, pack: &Pack) -> ArrayVec<GameMove, MOVE_COUNT> {
    let mut moves = ArrayVec::new();
    for (rotated, rotation) in pack.distinct_rotations() {
        for position in 0..=MAX_POSITION {
            if board.place_pack(position, &rotated).is_ok() {
                moves.push(GameMove::new(position, rotation));
            }
        }
    }
    moves
}

/// Applies `mv` to a private copy of `board`.
///
/// Returns `None` when the move is out of range or does not fit.
#[must_use]
pub fn simulate(board: &Board, pack: &Pack, mv: GameMove) -> Option<Board> {
    let rotation: PackRotation = mv.check_range().ok()?;
    board.place_pack(mv.position, &pack.rotated(rotation)).ok()
}
