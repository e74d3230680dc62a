use std::path::PathBuf;

use anyhow::Context as _;
use rand::{
    SeedableRng as _,
    distr::{Distribution as _, weighted::WeightedIndex},
};
use rand_pcg::Pcg64Mcg;
use sploosh_core::{Catalog, Layout};

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateTableArg {
    /// Number of table entries to generate
    #[arg(long, default_value_t = 100_000)]
    length: usize,
    /// RNG seed, for reproducible tables
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Output file path (JSON array of catalog indices)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Generates a synthetic board table: independent draws from the catalog's
/// generation-weight distribution.
///
/// Real tables replay the game's actual pseudo-random stream; a synthetic
/// one has the same per-entry marginal distribution, which is enough to
/// exercise the matcher and the chain model offline.
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn run(arg: &GenerateTableArg) -> anyhow::Result<()> {
    eprintln!("Building layout catalog...");
    let catalog = Catalog::build();

    let weights: Vec<f64> = catalog.iter().map(Layout::weight).collect();
    let distribution =
        WeightedIndex::new(&weights).context("catalog weights form no distribution")?;

    let mut rng = Pcg64Mcg::seed_from_u64(arg.seed);
    let entries: Vec<u32> = (0..arg.length)
        .map(|_| distribution.sample(&mut rng) as u32)
        .collect();

    eprintln!("Generated {} entries (seed {})", entries.len(), arg.seed);
    Output::save_json(&entries, arg.output.clone())
}
