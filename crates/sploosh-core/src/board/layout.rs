use crate::{
    board::{
        grid::{Cell, CellSet},
        squid::{FLEET_CELL_COUNT, SquidKind},
    },
    infer::Observation,
};

/// One complete squid layout: the three runs plus their union.
///
/// Layouts carry the weight with which the game's placement procedure
/// produces them. Squids are placed sequentially (2, then 3, then 4) with a
/// uniform draw among the placements still legal at that point, so layouts
/// that leave fewer options for later squids are drawn more often. The
/// weight of a layout is `1 / (c2 * c3 * c4)` where `cN` is the number of
/// legal placements the length-`N` squid had; weights sum to 1 over the
/// full catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    cells: CellSet,
    runs: [CellSet; 3],
    weight: f64,
}

impl Layout {
    pub(crate) fn new(runs: [CellSet; 3], weight: f64) -> Self {
        let cells = runs[0].union(runs[1]).union(runs[2]);
        debug_assert_eq!(cells.len(), FLEET_CELL_COUNT, "squid runs must not overlap");
        Self {
            cells,
            runs,
            weight,
        }
    }

    /// Union of all squid cells.
    #[must_use]
    pub fn cells(&self) -> CellSet {
        self.cells
    }

    /// Cells of one squid.
    #[must_use]
    pub fn run(&self, kind: SquidKind) -> CellSet {
        match kind {
            SquidKind::Two => self.runs[0],
            SquidKind::Three => self.runs[1],
            SquidKind::Four => self.runs[2],
        }
    }

    /// Probability of the game generating this layout.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The cell's mark: the length of the squid covering it, or 0.
    #[must_use]
    pub fn mark(&self, cell: Cell) -> u8 {
        SquidKind::ALL
            .into_iter()
            .find(|kind| self.run(*kind).contains(cell))
            .map_or(0, SquidKind::length)
    }

    /// Number of squids whose every cell is in `hits`.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn sunk_count(&self, hits: CellSet) -> u8 {
        self.runs
            .iter()
            .filter(|run| hits.contains_all(**run))
            .count() as u8
    }

    /// Whether this layout could have produced the observation.
    ///
    /// Every hit must land on a squid, every miss on open water, and when
    /// the observation pins the sunk count, exactly that many squids must be
    /// fully covered by the hits.
    #[must_use]
    pub fn is_consistent(&self, observation: &Observation) -> bool {
        if !self.cells.contains_all(observation.hits()) {
            return false;
        }
        if !self.cells.intersection(observation.misses()).is_empty() {
            return false;
        }
        match observation.squids_sunk() {
            None => true,
            Some(count) => self.sunk_count(observation.hits()) == count,
        }
    }
}

/// Whether `run` is a contiguous horizontal or vertical line of `length`
/// cells.
#[cfg(test)]
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn is_straight_run(run: CellSet, length: u8) -> bool {
    if run.len() != usize::from(length) {
        return false;
    }
    let cells: Vec<Cell> = run.iter().collect();
    let head = cells[0];
    let horizontal = cells
        .iter()
        .enumerate()
        .all(|(i, c)| c.y() == head.y() && c.x() == head.x() + i as u8);
    let vertical = cells
        .iter()
        .enumerate()
        .all(|(i, c)| c.x() == head.x() && c.y() == head.y() + i as u8);
    horizontal || vertical
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_layout() -> Layout {
        // 2: (0,0)-(0,1)  3: (2,2)-(4,2)  4: (7,4)-(7,7)
        let two = CellSet::from_ascii(
            r"
            #.......
            #.......
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );
        let three = CellSet::from_ascii(
            r"
            ........
            ........
            ..###...
            ........
            ........
            ........
            ........
            ........
            ",
        );
        let four = CellSet::from_ascii(
            r"
            ........
            ........
            ........
            ........
            .......#
            .......#
            .......#
            .......#
            ",
        );
        Layout::new([two, three, four], 1.0)
    }

    #[test]
    fn test_mark() {
        let layout = sample_layout();
        assert_eq!(layout.mark(Cell::new(0, 0)), 2);
        assert_eq!(layout.mark(Cell::new(3, 2)), 3);
        assert_eq!(layout.mark(Cell::new(7, 6)), 4);
        assert_eq!(layout.mark(Cell::new(4, 4)), 0);
    }

    #[test]
    fn test_sunk_count() {
        let layout = sample_layout();
        assert_eq!(layout.sunk_count(CellSet::EMPTY), 0);
        assert_eq!(layout.sunk_count(layout.run(SquidKind::Two)), 1);
        assert_eq!(layout.sunk_count(layout.cells()), 3);

        // A partially covered squid does not count.
        let partial: CellSet = layout.run(SquidKind::Four).iter().take(3).collect();
        assert_eq!(layout.sunk_count(partial), 0);
    }

    #[test]
    fn test_is_consistent_hits_and_misses() {
        let layout = sample_layout();

        let on_squid: CellSet = [Cell::new(0, 0)].into_iter().collect();
        let open_water: CellSet = [Cell::new(4, 4)].into_iter().collect();

        let obs = Observation::new(on_squid, open_water, None).unwrap();
        assert!(layout.is_consistent(&obs));

        // Hit on open water rules the layout out.
        let obs = Observation::new(open_water, CellSet::EMPTY, None).unwrap();
        assert!(!layout.is_consistent(&obs));

        // Miss on a squid rules the layout out.
        let obs = Observation::new(CellSet::EMPTY, on_squid, None).unwrap();
        assert!(!layout.is_consistent(&obs));
    }

    #[test]
    fn test_is_consistent_sunk_count() {
        let layout = sample_layout();
        let two = layout.run(SquidKind::Two);

        let obs = Observation::new(two, CellSet::EMPTY, Some(1)).unwrap();
        assert!(layout.is_consistent(&obs));

        let obs = Observation::new(two, CellSet::EMPTY, Some(0)).unwrap();
        assert!(!layout.is_consistent(&obs));

        let obs = Observation::new(layout.cells(), CellSet::EMPTY, Some(3)).unwrap();
        assert!(layout.is_consistent(&obs));
    }

    #[test]
    fn test_is_straight_run() {
        let layout = sample_layout();
        assert!(is_straight_run(layout.run(SquidKind::Two), 2));
        assert!(is_straight_run(layout.run(SquidKind::Three), 3));
        assert!(is_straight_run(layout.run(SquidKind::Four), 4));

        // Diagonal cells are not a run.
        let diagonal: CellSet = [Cell::new(0, 0), Cell::new(1, 1)].into_iter().collect();
        assert!(!is_straight_run(diagonal, 2));

        // A row run of the wrong length is rejected.
        assert!(!is_straight_run(layout.run(SquidKind::Three), 2));
    }
}
