use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Board;

/// Status numbers the judge reports for one player at the start of a turn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContext {
    remaining_millis: u64,
    obstacle_count: u32,
    skill: u32,
    score: u32,
}

impl TurnContext {
    #[must_use]
    pub const fn new(remaining_millis: u64, obstacle_count: u32, skill: u32, score: u32) -> Self {
        Self {
            remaining_millis,
            obstacle_count,
            skill,
            score,
        }
    }

    /// Remaining thinking time for the whole match, in milliseconds.
    #[must_use]
    pub const fn remaining_millis(&self) -> u64 {
        self.remaining_millis
    }

    #[must_use]
    pub const fn remaining_time(&self) -> Duration {
        Duration::from_millis(self.remaining_millis)
    }

    /// Obstacles queued to drop onto this player's board.
    #[must_use]
    pub const fn obstacle_count(&self) -> u32 {
        self.obstacle_count
    }

    #[must_use]
    pub const fn skill(&self) -> u32 {
        self.skill
    }

    /// Cumulative game score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }
}

/// One player's side of a turn snapshot.
///
/// Keeps the board exactly as received next to the board with pending
/// obstacles injected, since some legality checks need the former.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    context: TurnContext,
    received_board: Board,
    board: Board,
}

impl PlayerState {
    #[must_use]
    pub fn new(context: TurnContext, received_board: Board) -> Self {
        let board = received_board.with_obstacles(context.obstacle_count());
        Self {
            context,
            received_board,
            board,
        }
    }

    #[must_use]
    pub fn context(&self) -> &TurnContext {
        &self.context
    }

    /// Board after pending obstacles were injected.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board as the judge sent it, before obstacle injection.
    #[must_use]
    pub fn board_before_obstacles(&self) -> &Board {
        &self.received_board
    }
}

/// Everything the judge reports at the start of a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    turn: usize,
    player: PlayerState,
    opponent: PlayerState,
}

impl TurnState {
    #[must_use]
    pub fn new(turn: usize, player: PlayerState, opponent: PlayerState) -> Self {
        Self {
            turn,
            player,
            opponent,
        }
    }

    /// Zero-based turn index shared by both players.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    #[must_use]
    pub fn opponent(&self) -> &PlayerState {
        &self.opponent
    }
}
