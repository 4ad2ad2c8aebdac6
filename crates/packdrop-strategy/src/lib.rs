//! Decision strategies: choosing a placement for the current turn.
//!
//! A strategy is a single capability, [`DecisionStrategy`]: given an
//! immutable [`TurnSnapshot`] (turn index, both players' states and the
//! shared pack sequence) it returns a [`GameMove`](packdrop_engine::GameMove).
//! The protocol layer owns everything else, including the range check on the
//! returned move, so strategies are interchangeable without touching it.
//!
//! # Provided Pieces
//!
//! - [`random::RandomStrategy`] - Seeded uniform baseline
//! - [`moves`] - Move enumeration and legality filtering for search strategies
//! - [`zobrist::ZobristTable`] - Position hash keys for transposition tables
//!
//! # Example
//!
//! ```rust,no_run
//! use packdrop_strategy::{DecisionStrategy, TurnSnapshot, random::RandomStrategy};
//! # let state: packdrop_engine::TurnState = todo!();
//! # let packs: packdrop_engine::PackSequence = todo!();
//!
//! let mut strategy = RandomStrategy::with_seed(123_456);
//! if let Some(snapshot) = TurnSnapshot::new(&state, &packs) {
//!     let mv = strategy.decide(&snapshot);
//!     println!("{mv}");
//! }
//! ```

pub use self::snapshot::*;

pub mod moves;
pub mod random;
mod snapshot;
pub mod zobrist;
