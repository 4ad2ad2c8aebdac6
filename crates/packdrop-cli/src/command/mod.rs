use clap::{Parser, Subcommand};
use env_logger::{Env, Target};
use log::LevelFilter;

use self::{bench::BenchArg, play::PlayArg};

mod bench;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Diagnostic log level on stderr [default: info, or RUST_LOG]
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a match against the judge over stdin/stdout
    Play(#[clap(flatten)] PlayArg),
    /// Run the strategy once on recorded judge input
    Bench(#[clap(flatten)] BenchArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logger(args.log_level);
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Bench(arg) => bench::run(&arg)?,
    }
    Ok(())
}

// stdout carries the protocol, so diagnostics always go to stderr.
fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.target(Target::Stderr).init();
}
