use clap::{Parser, Subcommand};

use self::{area::AreaArg, batch::BatchArg};

mod area;
mod batch;
mod estimation_arg;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Estimate an area once and print the result
    Area(#[clap(flatten)] AreaArg),
    /// Repeat the estimation with derived seeds and summarize the spread
    Batch(#[clap(flatten)] BatchArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Area(AreaArg::default())) {
        Mode::Area(arg) => area::run(&arg)?,
        Mode::Batch(arg) => batch::run(&arg)?,
    }
    Ok(())
}
