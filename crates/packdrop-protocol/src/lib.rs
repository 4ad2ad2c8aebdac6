//! Line protocol between the agent and the judge.
//!
//! The judge writes whitespace-separated integers, one record per line, and
//! reads back one `"<position> <rotation>"` line per turn. This crate parses
//! that stream into engine types ([`JudgeReader`]), writes replies
//! ([`JudgeWriter`]), and drives the whole match as a state machine
//! ([`MatchSession`]):
//!
//! ```text
//! AwaitingPackLoad → AwaitingTurn → ComputingMove → Emitting ─┐
//!                        ↑  │                                 │
//!                        │  └──(stream closed / error)──→ Terminated
//!                        └────────────────────────────────────┘
//! ```
//!
//! # Error Handling
//!
//! The judge stream cannot be replayed, so nothing is retried: a malformed
//! record or an out-of-range move terminates the session with a
//! [`ProtocolError`]. The judge closing the stream between turns is the
//! normal end of a match and terminates the session without error.
//!
//! Diagnostics go through the `log` facade and never touch the protocol
//! output.

pub use self::{error::*, reader::*, session::*, writer::*};

mod error;
mod reader;
mod session;
mod writer;
