use serde::{Deserialize, Serialize};

use crate::{MAX_POSITION, MoveRangeError, PackRotation};

/// A placement decision: drop the pack rotated `rotation` quarter turns with
/// its left edge at column `position`.
///
/// Fields are raw so that any strategy output can be represented;
/// [`GameMove::check_range`] decides whether it may be sent to the judge.
/// `Display` renders the wire form `"<position> <rotation>"`.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{position} {rotation}")]
pub struct GameMove {
    pub position: usize,
    pub rotation: u8,
}

impl GameMove {
    #[must_use]
    pub const fn new(position: usize, rotation: PackRotation) -> Self {
        Self {
            position,
            rotation: rotation.quarter_turns(),
        }
    }

    /// Iterates over every in-range move, rotation-major.
    pub fn all() -> impl Iterator<Item = Self> {
        PackRotation::ALL.into_iter().flat_map(|rotation| {
            (0..=MAX_POSITION).map(move |position| Self::new(position, rotation))
        })
    }

    /// Checks that the move keeps the whole pack on the board and uses a
    /// rotation in `0..4`, returning the typed rotation.
    pub fn check_range(self) -> Result<PackRotation, MoveRangeError> {
        let rotation = PackRotation::new(self.rotation).ok_or(MoveRangeError::Rotation {
            rotation: self.rotation,
        })?;
        if self.position > MAX_POSITION {
            return Err(MoveRangeError::Position {
                position: self.position,
                max: MAX_POSITION,
            });
        }
        Ok(rotation)
    }
}
