use arrayvec::ArrayVec;

use crate::board::{
    grid::CellSet,
    layout::Layout,
    squid::{FLEET_CELL_COUNT, Placement, SquidKind},
};

/// Number of valid layouts in the catalog.
pub const CATALOG_LEN: usize = 604_584;

/// The ordered, immutable enumeration of every valid squid layout.
///
/// Index assignment follows the placement procedure: the length-2 squid's
/// placements are iterated in [`Placement::all`] order, then for each the
/// length-3 squid's remaining legal placements, then the length-4 squid's.
/// Externally supplied board tables store these indices, so the order is a
/// compatibility contract and rebuilding always reproduces it exactly.
///
/// Build once and share (e.g. behind an `Arc`); construction walks the full
/// placement tree.
#[derive(Debug)]
pub struct Catalog {
    layouts: Vec<Layout>,
}

impl Catalog {
    /// Enumerates the full catalog.
    ///
    /// # Panics
    ///
    /// Panics if the enumeration does not reproduce the expected layout
    /// count, which would indicate a broken placement rule.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn build() -> Self {
        let mut layouts = Vec::with_capacity(CATALOG_LEN);

        let twos = legal_runs(CellSet::EMPTY, SquidKind::Two);
        for &two in &twos {
            let threes = legal_runs(two, SquidKind::Three);
            for &three in &threes {
                let taken = two.union(three);
                let fours = legal_runs(taken, SquidKind::Four);
                // Uniform draw at each of the three placement steps.
                let combinations = twos.len() * threes.len() * fours.len();
                let weight = 1.0 / combinations as f64;
                for &four in &fours {
                    let layout = Layout::new([two, three, four], weight);
                    assert_eq!(layout.cells().len(), FLEET_CELL_COUNT);
                    layouts.push(layout);
                }
            }
        }

        assert_eq!(layouts.len(), CATALOG_LEN);
        Self { layouts }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: u32) -> Option<&Layout> {
        self.layouts.get(index as usize)
    }

    #[must_use]
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layout> {
        self.layouts.iter()
    }
}

fn legal_runs(occupied: CellSet, kind: SquidKind) -> ArrayVec<CellSet, 128> {
    Placement::all()
        .filter_map(|placement| placement.run_mask(occupied, kind.length()))
        .collect()
}
