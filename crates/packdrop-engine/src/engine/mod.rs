//! Per-turn game state handed from the protocol layer to a strategy.
//!
//! - [`PackSequence`] - The packs announced before the first turn, shared by both players
//! - [`TurnContext`] - Time budget, pending obstacles, skill gauge and score of one player
//! - [`PlayerState`] - A context together with the player's board, before and after obstacles
//! - [`TurnState`] - The shared turn index plus both players' states
//! - [`GameMove`] - A placement decision (column and rotation)
//!
//! # Turn Flow
//!
//! 1. The pack sequence is loaded once, before any turn
//! 2. Each turn the judge's snapshot is parsed into a fresh [`TurnState`]
//! 3. Pending obstacles are injected into copies of both boards
//! 4. A strategy picks a [`GameMove`], which is range-checked before it is sent

pub use self::{game_move::*, pack_sequence::*, turn_state::*};

mod game_move;
mod pack_sequence;
mod turn_state;
