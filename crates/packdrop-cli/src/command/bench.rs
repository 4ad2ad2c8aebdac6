use std::{path::PathBuf, time::Instant};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use log::info;
use packdrop_engine::MAX_TURN;
use packdrop_protocol::JudgeReader;
use packdrop_strategy::{
    DecisionStrategy as _, TurnSnapshot,
    random::{DEFAULT_SEED, RandomStrategy},
    zobrist::ZobristTable,
};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct BenchArg {
    /// Pack announcement file, in the judge's startup format
    #[arg(long)]
    pack: PathBuf,
    /// Turn record file, in the judge's per-turn format
    #[arg(long)]
    info: PathBuf,
    /// Output CSV file (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Seed of the random strategy
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

/// One strategy decision on recorded input, written as a single CSV row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct DecisionRecord {
    turn: usize,
    position: usize,
    rotation: u8,
    cumulative_game_score: u32,
    elapsed_micros: u64,
    recorded_at: DateTime<Utc>,
}

pub fn run(arg: &BenchArg) -> anyhow::Result<()> {
    let BenchArg {
        pack,
        info,
        output,
        seed,
    } = arg;

    let packs = util::read_judge_file("pack", pack, |reader| reader.read_packs(MAX_TURN))?;
    let state = util::read_judge_file("info", info, JudgeReader::read_turn)?;
    let snapshot = TurnSnapshot::new(&state, &packs)
        .with_context(|| format!("No pack announced for turn {}", state.turn()))?;

    let mut strategy = RandomStrategy::with_seed(*seed);
    let started = Instant::now();
    let chosen = strategy.decide(&snapshot);
    let elapsed = started.elapsed();
    chosen
        .check_range()
        .with_context(|| format!("Strategy returned an invalid move `{chosen}`"))?;
    let board_hash = ZobristTable::default().hash(snapshot.player().board());
    info!(
        "turn {} (board {board_hash:016x}): chose `{chosen}` in {elapsed:?}",
        snapshot.turn()
    );

    let record = DecisionRecord {
        turn: snapshot.turn(),
        position: chosen.position,
        rotation: chosen.rotation,
        cumulative_game_score: snapshot.player().context().score(),
        elapsed_micros: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        recorded_at: Utc::now(),
    };
    Output::save_csv(&record, output.clone())
}
