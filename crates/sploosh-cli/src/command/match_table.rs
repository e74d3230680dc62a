use std::path::PathBuf;

use anyhow::Context as _;
use sploosh_core::CATALOG_LEN;
use sploosh_sequence::{BoardTable, SequenceMatches};
use sploosh_stats::descriptive::DescriptiveStats;

use crate::util::read_table_entries;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MatchTableArg {
    /// Board table file (.json or .bin)
    #[arg(long)]
    table: PathBuf,
    /// Observed catalog indices, in round order
    #[arg(long, value_delimiter = ',', required = true)]
    observed: Vec<u32>,
    /// Table offset to start scanning from
    #[arg(long, default_value_t = 0)]
    start: usize,
    /// Entries scanned per link
    #[arg(long, default_value_t = 100_000)]
    window: usize,
    /// Stop after this many matches
    #[arg(long, default_value_t = 16)]
    limit: usize,
}

#[expect(clippy::cast_precision_loss)]
pub(crate) fn run(arg: &MatchTableArg) -> anyhow::Result<()> {
    let entries = read_table_entries(&arg.table)?;
    let table = BoardTable::new(entries, CATALOG_LEN)
        .context("board table does not match the catalog")?;
    eprintln!("Scanning table of {} entries...", table.len());

    let matches: Vec<Vec<usize>> =
        SequenceMatches::new(&table, &arg.observed, arg.start, arg.window)
            .take(arg.limit)
            .collect();

    if matches.is_empty() {
        println!("No matches.");
        return Ok(());
    }

    let limit_note = if matches.len() == arg.limit {
        " (limit reached)"
    } else {
        ""
    };
    println!("Found {} match(es){limit_note}:", matches.len());
    for (number, positions) in matches.iter().enumerate() {
        println!("  #{number}: {positions:?}");
    }

    // Gap statistics across matches suggest step beliefs for the next
    // round's history weighting.
    for link in 1..arg.observed.len() {
        let gaps = matches
            .iter()
            .map(|positions| (positions[link] - positions[link - 1]) as f64);
        if let Some(stats) = DescriptiveStats::new(gaps) {
            let belief = stats.to_belief();
            println!(
                "Link {}->{}: gap mean {:.1}, deviation {:.1}; suggested belief ({}, {:.1})",
                link - 1,
                link,
                stats.mean,
                stats.std_dev,
                belief.mean,
                belief.std_dev,
            );
        }
    }
    Ok(())
}
