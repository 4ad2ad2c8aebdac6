use std::{
    io::{BufRead, Write},
    mem,
    time::Instant,
};

use log::{debug, info, warn};
use packdrop_engine::{GameMove, MAX_TURN, PackSequence, TurnState};
use packdrop_strategy::{DecisionStrategy, TurnSnapshot};

use crate::{FormatErrorKind, JudgeReader, JudgeWriter, ProtocolError, StrategyViolationError};

/// Observable phase of a [`MatchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum ProtocolState {
    /// Agent name not yet sent; pack announcement not yet read.
    AwaitingPackLoad,
    /// Waiting for the judge's next turn record.
    AwaitingTurn,
    /// A turn record is parsed and the strategy has not answered yet.
    ComputingMove,
    /// A checked move is ready to be written.
    Emitting,
    Terminated,
}

/// Result of a match that ended without error.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    /// Number of moves sent to the judge.
    pub turns_played: usize,
    /// Index of the last turn answered.
    pub last_turn: Option<usize>,
}

#[derive(Debug)]
enum Phase {
    AwaitingPackLoad,
    AwaitingTurn,
    ComputingMove(Box<TurnState>),
    Emitting { turn: usize, chosen: GameMove },
    Terminated,
}

impl Phase {
    fn state(&self) -> ProtocolState {
        match self {
            Phase::AwaitingPackLoad => ProtocolState::AwaitingPackLoad,
            Phase::AwaitingTurn => ProtocolState::AwaitingTurn,
            Phase::ComputingMove(_) => ProtocolState::ComputingMove,
            Phase::Emitting { .. } => ProtocolState::Emitting,
            Phase::Terminated => ProtocolState::Terminated,
        }
    }
}

/// Drives one match against the judge.
///
/// The session owns the judge streams and the strategy, and advances one
/// protocol phase per [`step`](Self::step). Any error moves it to
/// [`ProtocolState::Terminated`] for good.
#[derive(Debug)]
pub struct MatchSession<R, W, S> {
    reader: JudgeReader<R>,
    writer: JudgeWriter<W>,
    strategy: S,
    agent_name: String,
    packs: PackSequence,
    phase: Phase,
    summary: MatchSummary,
}

impl<R, W, S> MatchSession<R, W, S>
where
    R: BufRead,
    W: Write,
    S: DecisionStrategy,
{
    #[must_use]
    pub fn new(input: R, output: W, strategy: S, agent_name: impl Into<String>) -> Self {
        Self {
            reader: JudgeReader::new(input),
            writer: JudgeWriter::new(output),
            strategy,
            agent_name: agent_name.into(),
            packs: PackSequence::new(Vec::new()),
            phase: Phase::AwaitingPackLoad,
            summary: MatchSummary::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> ProtocolState {
        self.phase.state()
    }

    /// The announced packs; empty until the pack load has completed.
    #[must_use]
    pub fn packs(&self) -> &PackSequence {
        &self.packs
    }

    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        self.summary
    }

    #[must_use]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Consumes the session and returns the judge output stream.
    #[must_use]
    pub fn into_output(self) -> W {
        self.writer.into_inner()
    }

    /// Runs the session until the judge closes the stream.
    ///
    /// A stream closed between turns ends the match normally and returns the
    /// summary. Every other way the match stops is returned as an error.
    pub fn run(&mut self) -> Result<MatchSummary, ProtocolError> {
        while !self.step()?.is_terminated() {}
        Ok(self.summary)
    }

    /// Advances the session by one phase and returns the new state.
    pub fn step(&mut self) -> Result<ProtocolState, ProtocolError> {
        let phase = mem::replace(&mut self.phase, Phase::Terminated);
        let next = match phase {
            Phase::AwaitingPackLoad => self.load_packs()?,
            Phase::AwaitingTurn => self.await_turn()?,
            Phase::ComputingMove(state) => self.compute_move(&state)?,
            Phase::Emitting { turn, chosen } => self.emit_move(turn, chosen)?,
            Phase::Terminated => Phase::Terminated,
        };
        self.phase = next;
        Ok(self.state())
    }

    fn load_packs(&mut self) -> Result<Phase, ProtocolError> {
        self.writer.announce(&self.agent_name)?;
        self.packs = self.reader.read_packs(MAX_TURN)?;
        info!(
            "loaded {} packs in {} lines",
            self.packs.len(),
            self.reader.line_number()
        );
        Ok(Phase::AwaitingTurn)
    }

    fn await_turn(&mut self) -> Result<Phase, ProtocolError> {
        match self.reader.read_turn() {
            Ok(state) => Ok(Phase::ComputingMove(Box::new(state))),
            Err(ProtocolError::StreamClosed) => {
                info!(
                    "judge closed the stream after {} turns",
                    self.summary.turns_played
                );
                Ok(Phase::Terminated)
            }
            Err(e) => Err(e),
        }
    }

    fn compute_move(&mut self, state: &TurnState) -> Result<Phase, ProtocolError> {
        let turn = state.turn();
        let snapshot = TurnSnapshot::new(state, &self.packs).ok_or_else(|| {
            self.reader.error(FormatErrorKind::TurnOutOfRange {
                turn,
                max: self.packs.len(),
            })
        })?;

        let player = snapshot.player();
        let context = player.context();
        debug!(
            "turn {turn}: {} ms left, {} obstacles pending, skill {}, score {}",
            context.remaining_millis(),
            context.obstacle_count(),
            context.skill(),
            context.score(),
        );
        debug!("pack:\n{}", snapshot.current_pack());
        debug!("board:\n{}", player.board());

        let started = Instant::now();
        let chosen = self.strategy.decide(&snapshot);
        let elapsed = started.elapsed();
        if elapsed > snapshot.remaining_time() {
            warn!(
                "turn {turn}: decision took {elapsed:?}, over the {:?} left",
                snapshot.remaining_time()
            );
        }

        let rotation = chosen
            .check_range()
            .map_err(|source| StrategyViolationError {
                turn,
                chosen,
                source,
            })?;
        debug!("turn {turn}: chose `{chosen}` in {elapsed:?}");
        debug!("rotated pack:\n{}", snapshot.rotated_pack(rotation));
        Ok(Phase::Emitting { turn, chosen })
    }

    fn emit_move(&mut self, turn: usize, chosen: GameMove) -> Result<Phase, ProtocolError> {
        self.writer.send_move(chosen)?;
        self.summary.turns_played += 1;
        self.summary.last_turn = Some(turn);
        Ok(Phase::AwaitingTurn)
    }
}
