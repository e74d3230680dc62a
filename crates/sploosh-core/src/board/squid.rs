use crate::board::grid::{CellSet, GRID_SIZE};

/// Cells occupied by a full squid fleet: one squid of each length.
pub const FLEET_CELL_COUNT: usize = 2 + 3 + 4;

/// The three squid sizes hidden on every board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquidKind {
    Two,
    Three,
    Four,
}

impl SquidKind {
    pub const ALL: [SquidKind; 3] = [SquidKind::Two, SquidKind::Three, SquidKind::Four];

    /// Number of contiguous cells the squid occupies.
    #[must_use]
    pub const fn length(self) -> u8 {
        match self {
            SquidKind::Two => 2,
            SquidKind::Three => 3,
            SquidKind::Four => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A candidate squid placement: head cell plus direction.
///
/// The iteration order of [`Placement::all`] fixes the catalog enumeration
/// order, which externally supplied board tables depend on. It must never
/// change: rows outermost, columns next, vertical before horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    x: u8,
    y: u8,
    orientation: Orientation,
}

impl Placement {
    /// All 128 placement descriptors in enumeration order.
    pub fn all() -> impl Iterator<Item = Placement> {
        (0..GRID_SIZE).flat_map(|y| {
            (0..GRID_SIZE).flat_map(move |x| {
                [Orientation::Vertical, Orientation::Horizontal]
                    .into_iter()
                    .map(move |orientation| Placement { x, y, orientation })
            })
        })
    }

    /// Mask of a squid run of `length` cells starting here.
    ///
    /// Returns `None` when the run leaves the grid or collides with
    /// already-occupied cells.
    #[must_use]
    pub fn run_mask(self, occupied: CellSet, length: u8) -> Option<CellSet> {
        let (extent, stride) = match self.orientation {
            Orientation::Horizontal => (self.x, 1),
            Orientation::Vertical => (self.y, u64::from(GRID_SIZE)),
        };
        if extent + length > GRID_SIZE {
            return None;
        }
        let head = 1u64 << (self.y * GRID_SIZE + self.x);
        let bits = (0..u64::from(length)).fold(0, |acc, step| acc | (head << (step * stride)));
        if occupied.bits() & bits != 0 {
            return None;
        }
        Some(CellSet::from_bits(bits))
    }
}
