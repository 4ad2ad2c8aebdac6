use std::ops::Index;

use crate::Pack;

/// The ordered packs announced before the first turn.
///
/// Both players draw from the same sequence: pack `i` is the pack for turn
/// `i` on either side. The sequence is built once and only lent out by
/// reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSequence {
    packs: Box<[Pack]>,
}

impl PackSequence {
    #[must_use]
    pub fn new(packs: Vec<Pack>) -> Self {
        Self {
            packs: packs.into_boxed_slice(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    #[must_use]
    pub fn get(&self, turn: usize) -> Option<&Pack> {
        self.packs.get(turn)
    }

    /// Returns the packs from `turn` to the end of the sequence.
    ///
    /// Empty when `turn` is past the last pack.
    #[must_use]
    pub fn upcoming(&self, turn: usize) -> &[Pack] {
        self.packs.get(turn..).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pack> + '_ {
        self.packs.iter()
    }
}

impl Index<usize> for PackSequence {
    type Output = Pack;

    fn index(&self, turn: usize) -> &Pack {
        &self.packs[turn]
    }
}

impl FromIterator<Pack> for PackSequence {
    fn from_iter<T: IntoIterator<Item = Pack>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
