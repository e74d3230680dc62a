//! Exact posterior inference for the 8×8 squid-hunt board game.
//!
//! The board hides three squids occupying straight runs of 2, 3, and 4
//! cells. Given a partial record of shots (hits, misses, and optionally the
//! number of squids fully sunk), this crate computes the exact probability
//! that each cell is occupied, by marginalizing over the finite catalog of
//! every valid squid layout.
//!
//! # Modules
//!
//! - [`board`]: cell/mask geometry, squid placements, the layout catalog
//! - [`infer`]: observations, exact posterior computation, shot
//!   recommendation

pub use self::{board::*, infer::*};

pub mod board;
pub mod infer;

/// Rejected observation input.
///
/// Raised before any inference runs; a caller holding this error must not
/// display a probability grid.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ObservationError {
    /// A cell index does not fit on the 8×8 grid.
    #[display("cell index {index} is outside the 8x8 grid")]
    CellOutOfRange { index: u8 },
    /// The same cell is recorded as both a hit and a miss.
    #[display("cells recorded as both hit and miss: {overlap:?}")]
    OverlappingShots { overlap: CellSet },
    /// The sunk count is outside `-1..=3`.
    #[display("sunk count {count} is outside -1..=3")]
    SunkCountOutOfRange { count: i32 },
}
