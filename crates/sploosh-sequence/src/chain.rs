use std::{collections::VecDeque, sync::Arc};

use arrayvec::ArrayVec;
use sploosh_stats::gaussian::StepBelief;

use crate::table::BoardTable;

/// Most rounds a history chain can carry.
pub const MAX_ROUNDS: usize = 3;

/// Malformed round-history input, rejected before any table scanning.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum HistoryShapeError {
    /// A chain over `n` rounds needs `n + 1` step beliefs: one from the
    /// table start to the first round, then one per later gap.
    #[display("{rounds} rounds require {required} step beliefs, got {beliefs}")]
    BeliefCountMismatch {
        rounds: usize,
        required: usize,
        beliefs: usize,
    },
    #[display("step-belief means ({means}) and deviations ({std_devs}) differ in length")]
    MeanDeviationMismatch { means: usize, std_devs: usize },
    #[display("round history holds {rounds} rounds, more than the supported {MAX_ROUNDS}")]
    TooManyRounds { rounds: usize },
    #[display("step belief {index} has non-positive deviation {std_dev}")]
    NonPositiveDeviation { index: usize, std_dev: f64 },
}

/// The catalog indices of previously resolved rounds, with a Gaussian
/// belief over every step gap in the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundHistory {
    rounds: ArrayVec<u32, MAX_ROUNDS>,
    beliefs: ArrayVec<StepBelief, { MAX_ROUNDS + 1 }>,
}

impl RoundHistory {
    pub fn new(rounds: &[u32], beliefs: &[StepBelief]) -> Result<Self, HistoryShapeError> {
        if rounds.len() > MAX_ROUNDS {
            return Err(HistoryShapeError::TooManyRounds {
                rounds: rounds.len(),
            });
        }
        if beliefs.len() != rounds.len() + 1 {
            return Err(HistoryShapeError::BeliefCountMismatch {
                rounds: rounds.len(),
                required: rounds.len() + 1,
                beliefs: beliefs.len(),
            });
        }
        if let Some((index, belief)) = beliefs
            .iter()
            .enumerate()
            .find(|(_, belief)| belief.std_dev <= 0.0)
        {
            return Err(HistoryShapeError::NonPositiveDeviation {
                index,
                std_dev: belief.std_dev,
            });
        }
        Ok(Self {
            rounds: rounds.iter().copied().collect(),
            beliefs: beliefs.iter().copied().collect(),
        })
    }

    /// Boundary form: parallel flat buffers of means and deviations.
    pub fn from_slices(
        rounds: &[u32],
        means: &[u32],
        std_devs: &[f64],
    ) -> Result<Self, HistoryShapeError> {
        if means.len() != std_devs.len() {
            return Err(HistoryShapeError::MeanDeviationMismatch {
                means: means.len(),
                std_devs: std_devs.len(),
            });
        }
        let beliefs: Vec<StepBelief> = means
            .iter()
            .zip(std_devs)
            .map(|(&mean, &std_dev)| StepBelief::new(mean, std_dev))
            .collect();
        Self::new(rounds, &beliefs)
    }

    #[must_use]
    pub fn rounds(&self) -> &[u32] {
        &self.rounds
    }

    #[must_use]
    pub fn beliefs(&self) -> &[StepBelief] {
        &self.beliefs
    }
}

/// Per-layout weights for the round following the history chain.
///
/// Walks the table depth first: each link scans a window of
/// `±5σ` steps around the expected gap for the prior round's index,
/// multiplying Gaussian densities along the way, and the final link smears
/// the accumulated weight over every layout index seen in its window. The
/// result is an unnormalized prior over catalog indices; indices the chain
/// cannot reach stay at zero. Layout-level results are exact; only table
/// offsets beyond 5σ of a link's mean are ignored, whose mass is
/// negligible (below 4e-6 of each link's peak).
#[must_use]
pub fn chain_weights(table: &BoardTable, history: &RoundHistory, catalog_len: usize) -> Vec<f64> {
    let mut weights = vec![0.0; catalog_len];
    scan_chain(table, history, 0, 0, 1.0, &mut weights);
    weights
}

#[expect(
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn scan_chain(
    table: &BoardTable,
    history: &RoundHistory,
    depth: usize,
    origin: usize,
    weight: f64,
    weights: &mut [f64],
) {
    let belief = history.beliefs()[depth];
    let radius = belief.scan_radius();
    let target = origin as i64 + i64::from(belief.mean);
    // Strictly after the anchoring offset: a round consumes at least one step.
    let lower = (target - radius).max(origin as i64 + 1) as usize;
    let upper = usize::min(table.len(), (target + radius).max(0) as usize);
    let entries = table.entries();

    if depth == history.rounds().len() {
        for offset in lower..upper {
            let density = belief.density(offset as i64 - origin as i64);
            weights[entries[offset] as usize] += weight * density;
        }
    } else {
        let wanted = history.rounds()[depth];
        for offset in lower..upper {
            if entries[offset] == wanted {
                let density = belief.density(offset as i64 - origin as i64);
                scan_chain(table, history, depth + 1, offset, weight * density, weights);
            }
        }
    }
}

const CHAIN_CACHE_CAPACITY: usize = 16;

/// Least-recently-used memo of chain weights per history.
///
/// The UI re-queries the same history every time the user toggles a cell,
/// and a chain scan over a multi-million-entry table is far more expensive
/// than the lookup.
#[derive(Debug, Default)]
pub(crate) struct ChainWeightCache {
    entries: VecDeque<(RoundHistory, Arc<Vec<f64>>)>,
}

impl ChainWeightCache {
    pub(crate) fn get_or_insert_with(
        &mut self,
        history: &RoundHistory,
        compute: impl FnOnce() -> Vec<f64>,
    ) -> Arc<Vec<f64>> {
        if let Some(position) = self.entries.iter().position(|(h, _)| h == history) {
            let entry = self
                .entries
                .remove(position)
                .expect("position was just found");
            let weights = Arc::clone(&entry.1);
            self.entries.push_front(entry);
            return weights;
        }

        if self.entries.len() == CHAIN_CACHE_CAPACITY {
            self.entries.pop_back();
        }
        let weights = Arc::new(compute());
        self.entries
            .push_front((history.clone(), Arc::clone(&weights)));
        weights
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: Vec<u32>, catalog_len: usize) -> BoardTable {
        BoardTable::new(entries, catalog_len).unwrap()
    }

    #[test]
    fn test_history_shape_validation() {
        let belief = StepBelief::new(10, 3.0);
        assert!(RoundHistory::new(&[], &[belief]).is_ok());
        assert!(RoundHistory::new(&[1], &[belief, belief]).is_ok());

        assert_eq!(
            RoundHistory::new(&[1], &[belief]).unwrap_err(),
            HistoryShapeError::BeliefCountMismatch {
                rounds: 1,
                required: 2,
                beliefs: 1
            }
        );
        assert_eq!(
            RoundHistory::new(&[1, 2, 3, 4], &[belief; 5]).unwrap_err(),
            HistoryShapeError::TooManyRounds { rounds: 4 }
        );
        assert_eq!(
            RoundHistory::new(&[], &[StepBelief::new(10, 0.0)]).unwrap_err(),
            HistoryShapeError::NonPositiveDeviation {
                index: 0,
                std_dev: 0.0
            }
        );
        assert_eq!(
            RoundHistory::from_slices(&[1], &[10, 20], &[3.0]).unwrap_err(),
            HistoryShapeError::MeanDeviationMismatch {
                means: 2,
                std_devs: 1
            }
        );
    }

    #[test]
    fn test_empty_history_smears_around_first_mean() {
        // Table: index i at offset i, catalog of 100.
        let table = table((0..100).collect(), 100);
        let history = RoundHistory::from_slices(&[], &[50], &[2.0]).unwrap();
        let weights = chain_weights(&table, &history, 100);

        // Peak at the believed offset, symmetric fall-off inside the
        // window, zero outside it.
        assert!((weights[50] - 1.0).abs() < 1e-12);
        assert!(weights[48] > 0.0);
        assert!((weights[48] - weights[52]).abs() < 1e-12);
        assert_eq!(weights[30], 0.0);
        assert_eq!(weights[0], 0.0);
    }

    #[test]
    fn test_single_round_chain_anchors_on_match() {
        // The observed round index 7 sits at offset 10; the follow-up
        // window around 10 + 500 holds index 3 everywhere.
        let mut entries = vec![3_u32; 600];
        entries[10] = 7;
        let table = table(entries, 10);

        let history = RoundHistory::from_slices(&[7], &[10, 500], &[2.0, 10.0]).unwrap();
        let weights = chain_weights(&table, &history, 10);

        assert!(weights[3] > 0.0);
        // Nothing else is reachable.
        for (index, &weight) in weights.iter().enumerate() {
            if index != 3 {
                assert_eq!(weight, 0.0, "index {index}");
            }
        }
    }

    #[test]
    fn test_unreachable_round_leaves_weights_empty() {
        let table = table(vec![3; 100], 10);
        // Index 7 never appears, so the chain cannot anchor.
        let history = RoundHistory::from_slices(&[7], &[50, 20], &[3.0, 3.0]).unwrap();
        let weights = chain_weights(&table, &history, 10);
        assert!(weights.iter().all(|&w| w == 0.0));
    }

    #[test]
    #[expect(clippy::cast_possible_wrap)]
    fn test_window_matches_full_scan() {
        // With the window removed (huge deviation is not needed: compare a
        // brute-force scan of the whole table against the windowed scan).
        let entries: Vec<u32> = (0..200).map(|i| i % 10).collect();
        let table = table(entries.clone(), 10);
        let belief = StepBelief::new(100, 8.0);
        let history = RoundHistory::new(&[], &[belief]).unwrap();

        let windowed = chain_weights(&table, &history, 10);

        let mut full = vec![0.0; 10];
        for (offset, &index) in entries.iter().enumerate().skip(1) {
            full[index as usize] += belief.density(offset as i64);
        }

        for (w, f) in windowed.iter().zip(&full) {
            // Differences come only from the truncated Gaussian tail.
            assert!((w - f).abs() < 1e-5, "windowed {w} vs full {f}");
        }
    }

    #[test]
    #[expect(clippy::cast_possible_truncation)]
    fn test_chain_cache_reuses_and_evicts() {
        let mut cache = ChainWeightCache::default();
        let history_a = RoundHistory::from_slices(&[], &[10], &[2.0]).unwrap();
        let history_b = RoundHistory::from_slices(&[], &[20], &[2.0]).unwrap();

        let mut computations = 0;
        let first = cache.get_or_insert_with(&history_a, || {
            computations += 1;
            vec![1.0]
        });
        let second = cache.get_or_insert_with(&history_a, || {
            computations += 1;
            vec![2.0]
        });
        assert_eq!(computations, 1);
        assert!(Arc::ptr_eq(&first, &second));

        // Fill past capacity; the oldest entry is recomputed on return.
        for mean in 0..CHAIN_CACHE_CAPACITY as u32 {
            let history = RoundHistory::from_slices(&[], &[100 + mean], &[2.0]).unwrap();
            cache.get_or_insert_with(&history, Vec::new);
        }
        cache.get_or_insert_with(&history_b, Vec::new);
        let mut recomputed = false;
        cache.get_or_insert_with(&history_a, || {
            recomputed = true;
            vec![3.0]
        });
        assert!(recomputed);
    }
}
