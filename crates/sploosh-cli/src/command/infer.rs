use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use serde::Serialize;
use sploosh_core::{Catalog, Cell, CellSet, Observation, Posterior, recommend_shot};
use sploosh_sequence::Solver;

use crate::util::{Output, read_table_entries};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct InferArg {
    /// Hit cells as linear indices (0-63, row-major)
    #[arg(long, value_delimiter = ',')]
    hits: Vec<u8>,
    /// Miss cells as linear indices
    #[arg(long, value_delimiter = ',')]
    misses: Vec<u8>,
    /// Number of squids fully sunk (-1 = unknown)
    #[arg(long, default_value_t = -1)]
    sunk: i32,
    /// Cell the cursor is believed to rest on
    #[arg(long, default_value_t = 27)]
    cursor: u8,
    /// Board table file (.json or .bin); enables history weighting
    #[arg(long)]
    table: Option<PathBuf>,
    /// Catalog indices of previously resolved rounds
    #[arg(long, value_delimiter = ',')]
    rounds: Vec<u32>,
    /// Mean step count per chain link (one more than rounds)
    #[arg(long, value_delimiter = ',')]
    means: Vec<u32>,
    /// Step deviation per chain link
    #[arg(long, value_delimiter = ',')]
    std_devs: Vec<f64>,
    /// Emit the result as JSON instead of a text grid
    #[arg(long)]
    json: bool,
    /// Output file path (implies --json)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct InferReport<'a> {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    posterior: Option<&'a Posterior>,
    #[serde(skip_serializing_if = "Option::is_none")]
    best: Option<u8>,
}

pub(crate) fn run(arg: &InferArg) -> anyhow::Result<()> {
    let cursor = Cell::from_index(arg.cursor)
        .with_context(|| format!("cursor cell {} is outside the grid", arg.cursor))?;

    eprintln!("Building layout catalog...");
    let mut solver = Solver::new(Arc::new(Catalog::build()));

    let posterior = if let Some(table_path) = &arg.table {
        let entries = read_table_entries(table_path)?;
        eprintln!("Loaded board table with {} entries", entries.len());
        solver
            .load_board_table(entries)
            .context("board table does not match the catalog")?;
        solver.infer_with_history(
            &arg.hits,
            &arg.misses,
            arg.sunk,
            &arg.rounds,
            &arg.means,
            &arg.std_devs,
        )?
    } else {
        anyhow::ensure!(
            arg.rounds.is_empty() && arg.means.is_empty(),
            "history weighting requires --table"
        );
        solver.infer_without_history(&arg.hits, &arg.misses, arg.sunk)?
    };

    let observed = Observation::from_slices(&arg.hits, &arg.misses, arg.sunk)?.observed();
    let best = posterior
        .as_ref()
        .and_then(|posterior| recommend_shot(posterior, observed, cursor));

    if arg.json || arg.output.is_some() {
        let report = InferReport {
            valid: posterior.is_some(),
            posterior: posterior.as_ref(),
            best: best.map(Cell::index),
        };
        return Output::save_json(&report, arg.output.clone());
    }

    match &posterior {
        None => println!("Invalid configuration: no layout matches this observation."),
        Some(posterior) => {
            render_grid(
                posterior,
                observed_cells(&arg.hits),
                observed_cells(&arg.misses),
                best,
            );
            println!(
                "Observation probability: {:.2}%",
                posterior.evidence() * 100.0
            );
            match best {
                Some(cell) => println!(
                    "Recommended shot: ({}, {}) [cell {}]",
                    cell.x(),
                    cell.y(),
                    cell.index()
                ),
                None => println!("No cell left to recommend."),
            }
        }
    }
    Ok(())
}

fn observed_cells(indices: &[u8]) -> CellSet {
    indices.iter().copied().filter_map(Cell::from_index).collect()
}

fn render_grid(posterior: &Posterior, hits: CellSet, misses: CellSet, best: Option<Cell>) {
    for y in 0..8 {
        let mut line = String::new();
        for x in 0..8 {
            let cell = Cell::new(x, y);
            let token = if hits.contains(cell) {
                "  HIT   ".to_string()
            } else if misses.contains(cell) {
                "  MISS  ".to_string()
            } else {
                let percent = posterior.cell(cell) * 100.0;
                if best == Some(cell) {
                    format!("[{percent:5.2}%]")
                } else {
                    format!(" {percent:5.2}% ")
                }
            };
            line.push_str(&token);
        }
        println!("{line}");
    }
}
