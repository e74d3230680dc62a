use sploosh_core::{Catalog, Cell, Layout, Observation};

use crate::util::print_histogram;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CatalogStatsArg {}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn run(_arg: &CatalogStatsArg) -> anyhow::Result<()> {
    eprintln!("Building layout catalog...");
    let catalog = Catalog::build();

    println!("Layouts: {}", catalog.len());
    let weight_total: f64 = catalog.iter().map(Layout::weight).sum();
    println!("Generation weight total: {weight_total:.9}");

    let posterior = catalog
        .posterior(&Observation::empty())
        .expect("the blank observation is always possible");

    println!();
    println!("Baseline occupancy (probability a squid covers each cell):");
    for y in 0..8 {
        let mut line = String::new();
        for x in 0..8 {
            let percent = posterior.cell(Cell::new(x, y)) * 100.0;
            line.push_str(&format!(" {percent:5.2}%"));
        }
        println!("{line}");
    }

    println!();
    println!("Expected squid cells per row (x10000):");
    print_histogram((0..8).map(|y| {
        let row_mass: f64 = (0..8).map(|x| posterior.cell(Cell::new(x, y))).sum();
        (format!("row {y}"), (row_mass * 10000.0) as usize)
    }));

    Ok(())
}
