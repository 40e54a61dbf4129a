use clap::{Parser, Subcommand};

use self::{replay::ReplayArg, sample_random::SampleRandomArg, simulate::SimulateArg};

mod replay;
mod sample_random;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Let a simulated player sort items and record the session
    Simulate(#[clap(flatten)] SimulateArg),
    /// Draw bins from the untrained robot's random policy
    SampleRandom(#[clap(flatten)] SampleRandomArg),
    /// Re-run a recorded session and verify it reproduces
    Replay(#[clap(flatten)] ReplayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::SampleRandom(arg) => sample_random::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
    }
    Ok(())
}
