use std::time::Duration;

use packdrop_engine::{GameMove, Pack, PackRotation, PackSequence, PlayerState, TurnState};

/// Read-only view of one turn handed to a strategy.
///
/// Borrows the turn state and the pack sequence; nothing in it can be
/// mutated, so lookahead has to work on cloned boards.
#[derive(Debug, Clone, Copy)]
pub struct TurnSnapshot<'a> {
    state: &'a TurnState,
    packs: &'a PackSequence,
}

impl<'a> TurnSnapshot<'a> {
    /// Returns `None` when the sequence has no pack for the state's turn.
    #[must_use]
    pub fn new(state: &'a TurnState, packs: &'a PackSequence) -> Option<Self> {
        packs.get(state.turn())?;
        Some(Self { state, packs })
    }

    #[must_use]
    pub fn turn(&self) -> usize {
        self.state.turn()
    }

    #[must_use]
    pub fn player(&self) -> &'a PlayerState {
        self.state.player()
    }

    #[must_use]
    pub fn opponent(&self) -> &'a PlayerState {
        self.state.opponent()
    }

    /// Thinking time the judge still grants this player.
    #[must_use]
    pub fn remaining_time(&self) -> Duration {
        self.player().context().remaining_time()
    }

    #[must_use]
    pub fn packs(&self) -> &'a PackSequence {
        self.packs
    }

    /// The pack to place this turn, unrotated.
    #[must_use]
    pub fn current_pack(&self) -> &'a Pack {
        &self.packs[self.turn()]
    }

    #[must_use]
    pub fn rotated_pack(&self, rotation: PackRotation) -> Pack {
        self.current_pack().rotated(rotation)
    }

    /// Packs from this turn onward, the current one first.
    #[must_use]
    pub fn upcoming_packs(&self) -> &'a [Pack] {
        self.packs.upcoming(self.turn())
    }
}

/// Picks a move for one turn.
///
/// Implementations may keep memo structures across turns (hence `&mut self`)
/// and should stay within [`TurnSnapshot::remaining_time`]. The returned move
/// is range-checked by the caller; an out-of-range move is rejected, never
/// forwarded.
pub trait DecisionStrategy {
    fn decide(&mut self, snapshot: &TurnSnapshot<'_>) -> GameMove;
}

impl<S> DecisionStrategy for Box<S>
where
    S: DecisionStrategy + ?Sized,
{
    fn decide(&mut self, snapshot: &TurnSnapshot<'_>) -> GameMove {
        (**self).decide(snapshot)
    }
}

impl<S> DecisionStrategy for &mut S
where
    S: DecisionStrategy + ?Sized,
{
    fn decide(&mut self, snapshot: &TurnSnapshot<'_>) -> GameMove {
        (**self).decide(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use packdrop_engine::{Board, TurnContext};

    use super::*;

    fn state(turn: usize) -> TurnState {
        let player = PlayerState::new(TurnContext::new(5000, 0, 0, 0), Board::EMPTY);
        let opponent = PlayerState::new(TurnContext::new(4000, 10, 0, 0), Board::EMPTY);
        TurnState::new(turn, player, opponent)
    }

    fn packs() -> PackSequence {
        (1..=4)
            .map(|v| Pack::from_values([[v, 0], [0, 0]]).unwrap())
            .collect()
    }

    #[test]
    fn test_snapshot_views() {
        let state = state(2);
        let packs = packs();
        let snapshot = TurnSnapshot::new(&state, &packs).unwrap();

        assert_eq!(snapshot.turn(), 2);
        assert_eq!(snapshot.remaining_time(), Duration::from_millis(5000));
        assert_eq!(snapshot.current_pack(), &packs[2]);
        assert_eq!(snapshot.upcoming_packs().len(), 2);
        assert_eq!(
            snapshot.rotated_pack(PackRotation::ALL[1]),
            Pack::from_values([[0, 3], [0, 0]]).unwrap()
        );
        assert_eq!(snapshot.opponent().board().count_blocks().obstacle, 10);
    }

    #[test]
    fn test_snapshot_requires_pack_for_turn() {
        let state = state(4);
        let packs = packs();
        assert!(TurnSnapshot::new(&state, &packs).is_none());
    }

    #[test]
    fn test_boxed_strategy_delegates() {
        struct Fixed;
        impl DecisionStrategy for Fixed {
            fn decide(&mut self, _snapshot: &TurnSnapshot<'_>) -> GameMove {
                GameMove::new(5, PackRotation::ALL[3])
            }
        }

        let state = state(0);
        let packs = packs();
        let snapshot = TurnSnapshot::new(&state, &packs).unwrap();
        let mut boxed: Box<dyn DecisionStrategy> = Box::new(Fixed);
        assert_eq!(boxed.decide(&snapshot).to_string(), "5 3");
    }
}
