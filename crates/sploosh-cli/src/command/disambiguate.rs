use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use sploosh_core::{Catalog, Cell};
use sploosh_sequence::{Disambiguation, Solver};

use crate::util::read_table_entries;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DisambiguateArg {
    /// Known hit cells of the completed round (linear indices)
    #[arg(long, value_delimiter = ',', required = true)]
    hits: Vec<u8>,
    /// Board table file (.json or .bin)
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
}

pub(crate) fn run(arg: &DisambiguateArg) -> anyhow::Result<()> {
    eprintln!("Building layout catalog...");
    let mut solver = Solver::new(Arc::new(Catalog::build()));

    if let Some(table_path) = &arg.table {
        let entries = read_table_entries(table_path)?;
        solver
            .load_board_table(entries)
            .context("board table does not match the catalog")?;
    }

    let outcome =
        solver.disambiguate_final_board(&arg.hits, &arg.rounds, &arg.means, &arg.std_devs)?;

    match outcome {
        Disambiguation::Resolved(index) => {
            println!("Resolved: catalog index {index}");
            let layout = solver
                .catalog()
                .get(index)
                .expect("resolved index comes from the catalog");
            for y in 0..8 {
                let mut line = String::new();
                for x in 0..8 {
                    let mark = layout.mark(Cell::new(x, y));
                    line.push(if mark == 0 {
                        '.'
                    } else {
                        char::from_digit(u32::from(mark), 10).expect("mark is 2, 3, or 4")
                    });
                }
                println!("{line}");
            }
        }
        Disambiguation::Unresolved => {
            println!("Unresolved: zero or several plausible layouts; resolve manually.");
        }
    }
    Ok(())
}
