use clap::{Parser, Subcommand};

use self::{
    catalog_stats::CatalogStatsArg, disambiguate::DisambiguateArg,
    generate_table::GenerateTableArg, infer::InferArg, match_table::MatchTableArg,
};

mod catalog_stats;
mod disambiguate;
mod generate_table;
mod infer;
mod match_table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute exact cell probabilities for an observation
    Infer(#[clap(flatten)] InferArg),
    /// Resolve which catalog layout a completed round was
    Disambiguate(#[clap(flatten)] DisambiguateArg),
    /// Search a board table for an observed sequence of catalog indices
    MatchTable(#[clap(flatten)] MatchTableArg),
    /// Generate a synthetic board table for offline testing
    GenerateTable(#[clap(flatten)] GenerateTableArg),
    /// Show catalog size and occupancy statistics
    CatalogStats(#[clap(flatten)] CatalogStatsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Infer(arg) => infer::run(&arg)?,
        Mode::Disambiguate(arg) => disambiguate::run(&arg)?,
        Mode::MatchTable(arg) => match_table::run(&arg)?,
        Mode::GenerateTable(arg) => generate_table::run(&arg)?,
        Mode::CatalogStats(arg) => catalog_stats::run(&arg)?,
    }
    Ok(())
}
