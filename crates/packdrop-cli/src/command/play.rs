use std::io;

use anyhow::Context as _;
use log::{error, info};
use packdrop_protocol::{MatchSession, ProtocolError};
use packdrop_strategy::random::{DEFAULT_SEED, RandomStrategy};

pub const DEFAULT_AGENT_NAME: &str = "packdrop";

#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct PlayArg {
    /// Name line sent to the judge at startup
    #[arg(long, default_value = DEFAULT_AGENT_NAME)]
    name: String,
    /// Seed of the random strategy
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            name: DEFAULT_AGENT_NAME.to_owned(),
            seed: DEFAULT_SEED,
        }
    }
}

pub fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { name, seed } = arg;

    info!("starting match as `{name}` (seed {seed})");
    let strategy = RandomStrategy::with_seed(*seed);
    let mut session = MatchSession::new(
        io::stdin().lock(),
        io::stdout().lock(),
        strategy,
        name.as_str(),
    );

    // The judge only reads moves, so a broken match ends quietly with
    // status 0 once the cause is logged.
    match session.run() {
        Ok(summary) => info!(
            "match finished: {} turns played, last turn {:?}",
            summary.turns_played, summary.last_turn
        ),
        Err(ProtocolError::Io(e)) => {
            return Err(e).context("Failed to communicate with the judge");
        }
        Err(e) => error!(
            "match aborted after {} turns: {e}",
            session.summary().turns_played
        ),
    }
    Ok(())
}
