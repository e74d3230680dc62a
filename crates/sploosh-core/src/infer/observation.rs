use crate::{
    ObservationError,
    board::grid::{Cell, CellSet},
};

/// Number of squids on a board, and the largest meaningful sunk count.
const SQUID_COUNT: u8 = 3;

/// A validated record of shots fired at one board.
///
/// Construction enforces the input invariants (no cell both hit and missed,
/// sunk count within `0..=3`), so inference never has to re-check them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    hits: CellSet,
    misses: CellSet,
    squids_sunk: Option<u8>,
}

impl Observation {
    /// Creates an observation from cell sets.
    ///
    /// `squids_sunk` is `None` when the sunk count was not observed.
    pub fn new(
        hits: CellSet,
        misses: CellSet,
        squids_sunk: Option<u8>,
    ) -> Result<Self, ObservationError> {
        let overlap = hits.intersection(misses);
        if !overlap.is_empty() {
            return Err(ObservationError::OverlappingShots { overlap });
        }
        if let Some(count) = squids_sunk
            && count > SQUID_COUNT
        {
            return Err(ObservationError::SunkCountOutOfRange {
                count: i32::from(count),
            });
        }
        Ok(Self {
            hits,
            misses,
            squids_sunk,
        })
    }

    /// The blank observation: nothing fired, sunk count unknown.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            hits: CellSet::EMPTY,
            misses: CellSet::EMPTY,
            squids_sunk: None,
        }
    }

    /// Observation of a finished board, of which only some hits are known.
    ///
    /// Used when resolving which layout a completed round was. Every squid
    /// was sunk, but the recorded hit set may be partial, so constraining
    /// on the sunk count would wrongly reject the true layout; only the
    /// hits-land-on-squids constraint applies.
    #[must_use]
    pub fn completed(hits: CellSet) -> Self {
        Self {
            hits,
            misses: CellSet::EMPTY,
            squids_sunk: None,
        }
    }

    /// Creates an observation from flat index buffers.
    ///
    /// This is the boundary form: hits and misses arrive as linear cell
    /// indices, and the sunk count as an `i32` with `-1` meaning unknown.
    pub fn from_slices(
        hits: &[u8],
        misses: &[u8],
        squids_sunk: i32,
    ) -> Result<Self, ObservationError> {
        let squids_sunk = match squids_sunk {
            -1 => None,
            count @ 0..=3 => Some(u8::try_from(count).expect("count is in 0..=3")),
            count => return Err(ObservationError::SunkCountOutOfRange { count }),
        };
        Self::new(cell_set(hits)?, cell_set(misses)?, squids_sunk)
    }

    #[must_use]
    pub fn hits(&self) -> CellSet {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> CellSet {
        self.misses
    }

    #[must_use]
    pub fn squids_sunk(&self) -> Option<u8> {
        self.squids_sunk
    }

    /// Every cell that has been fired at.
    #[must_use]
    pub fn observed(&self) -> CellSet {
        self.hits.union(self.misses)
    }
}

fn cell_set(indices: &[u8]) -> Result<CellSet, ObservationError> {
    let mut set = CellSet::EMPTY;
    for &index in indices {
        let cell =
            Cell::from_index(index).ok_or(ObservationError::CellOutOfRange { index })?;
        set.insert(cell);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_rejected() {
        let hits = CellSet::from_bits(0b0110);
        let misses = CellSet::from_bits(0b0100);
        let err = Observation::new(hits, misses, None).unwrap_err();
        assert_eq!(
            err,
            ObservationError::OverlappingShots {
                overlap: CellSet::from_bits(0b0100)
            }
        );
    }

    #[test]
    fn test_from_slices() {
        let obs = Observation::from_slices(&[0, 27], &[63], 1).unwrap();
        assert_eq!(obs.hits(), CellSet::from_bits(1 | (1 << 27)));
        assert_eq!(obs.misses(), CellSet::from_bits(1 << 63));
        assert_eq!(obs.squids_sunk(), Some(1));
        assert_eq!(obs.observed().len(), 3);
    }

    #[test]
    fn test_from_slices_unknown_sunk() {
        let obs = Observation::from_slices(&[], &[], -1).unwrap();
        assert_eq!(obs, Observation::empty());
    }

    #[test]
    fn test_from_slices_bad_inputs() {
        assert_eq!(
            Observation::from_slices(&[64], &[], -1).unwrap_err(),
            ObservationError::CellOutOfRange { index: 64 }
        );
        assert_eq!(
            Observation::from_slices(&[], &[], 4).unwrap_err(),
            ObservationError::SunkCountOutOfRange { count: 4 }
        );
        assert_eq!(
            Observation::from_slices(&[], &[], -2).unwrap_err(),
            ObservationError::SunkCountOutOfRange { count: -2 }
        );
    }

    #[test]
    fn test_completed() {
        let hits = CellSet::from_bits(0b111);
        let obs = Observation::completed(hits);
        assert_eq!(obs.hits(), hits);
        assert!(obs.misses().is_empty());
        assert_eq!(obs.squids_sunk(), None);
    }
}
