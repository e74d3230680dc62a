use std::sync::{Arc, Mutex, PoisonError};

use sploosh_core::{Catalog, Observation, ObservationError, Posterior};

use crate::{
    chain::{ChainWeightCache, HistoryShapeError, RoundHistory, chain_weights},
    disambiguate::{Disambiguation, candidate_indices, resolve},
    table::{BoardTable, TableRangeError},
};

/// Failure of a history-weighted solver call.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SolverError {
    #[display("invalid observation: {_0}")]
    Observation(ObservationError),
    #[display("invalid round history: {_0}")]
    History(HistoryShapeError),
    /// History weighting was requested but no board table has been loaded.
    #[display("no board table loaded")]
    TableNotLoaded,
}

impl From<ObservationError> for SolverError {
    fn from(err: ObservationError) -> Self {
        Self::Observation(err)
    }
}

impl From<HistoryShapeError> for SolverError {
    fn from(err: HistoryShapeError) -> Self {
        Self::History(err)
    }
}

/// The embeddable solver boundary.
///
/// Owns the shared catalog, the optional board table, and the chain-weight
/// cache. All inputs cross as flat fixed-width buffers (cell indices as
/// `u8`, catalog indices as `u32`, means as `u32`, deviations as `f64`)
/// so an embedding layer can hand over its arrays unchanged. Inference
/// methods take `&self`; the solver is safe to share behind an `Arc` once
/// the table is loaded.
#[derive(Debug)]
pub struct Solver {
    catalog: Arc<Catalog>,
    table: Option<BoardTable>,
    chain_cache: Mutex<ChainWeightCache>,
}

impl Solver {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            table: None,
            chain_cache: Mutex::new(ChainWeightCache::default()),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn board_table(&self) -> Option<&BoardTable> {
        self.table.as_ref()
    }

    /// Ingests an externally supplied board table, replacing any previous
    /// one.
    ///
    /// Every entry must be a valid catalog index. A range violation means
    /// the table was built against a different catalog enumeration and is
    /// unusable; callers should treat it as fatal.
    pub fn load_board_table(&mut self, entries: Vec<u32>) -> Result<(), TableRangeError> {
        let table = BoardTable::new(entries, self.catalog.len())?;
        self.table = Some(table);
        self.lock_cache().clear();
        Ok(())
    }

    /// Exact posterior for one observation under the generation prior.
    ///
    /// Returns `Ok(None)` when no layout is consistent with the
    /// observation (the "not possible" display state).
    pub fn infer_without_history(
        &self,
        hits: &[u8],
        misses: &[u8],
        squids_sunk: i32,
    ) -> Result<Option<Posterior>, ObservationError> {
        let observation = Observation::from_slices(hits, misses, squids_sunk)?;
        Ok(self.catalog.posterior(&observation))
    }

    /// Exact posterior with the prior replaced by history chain weights.
    ///
    /// `rounds` holds the catalog indices of previously resolved rounds;
    /// `means`/`std_devs` the step beliefs (one more than rounds, the
    /// first spanning table start to round 0). Returns `Ok(None)` when the
    /// chain leaves no consistent layout reachable.
    pub fn infer_with_history(
        &self,
        hits: &[u8],
        misses: &[u8],
        squids_sunk: i32,
        rounds: &[u32],
        means: &[u32],
        std_devs: &[f64],
    ) -> Result<Option<Posterior>, SolverError> {
        let observation = Observation::from_slices(hits, misses, squids_sunk)?;
        let history = RoundHistory::from_slices(rounds, means, std_devs)?;
        let weights = self.chain_weights_for(&history)?;
        Ok(self.catalog.posterior_with_weights(&observation, &weights))
    }

    /// Resolves which layout a completed round realized.
    ///
    /// A single hit-consistent candidate resolves immediately, without a
    /// table: a unique match must be correct even where the history chain
    /// gives it no mass. Several candidates are settled by chain weight,
    /// or left unresolved.
    pub fn disambiguate_final_board(
        &self,
        hits: &[u8],
        rounds: &[u32],
        means: &[u32],
        std_devs: &[f64],
    ) -> Result<Disambiguation, SolverError> {
        let hits = Observation::from_slices(hits, &[], -1)
            .map_err(SolverError::Observation)?
            .hits();
        let candidates = candidate_indices(&self.catalog, hits);
        match candidates.as_slice() {
            [] => Ok(Disambiguation::Unresolved),
            [index] => Ok(Disambiguation::Resolved(*index)),
            _ => {
                let history = RoundHistory::from_slices(rounds, means, std_devs)?;
                let weights = self.chain_weights_for(&history)?;
                Ok(resolve(&candidates, &weights))
            }
        }
    }

    fn chain_weights_for(&self, history: &RoundHistory) -> Result<Arc<Vec<f64>>, SolverError> {
        let table = self.table.as_ref().ok_or(SolverError::TableNotLoaded)?;
        let mut cache = self.lock_cache();
        Ok(cache.get_or_insert_with(history, || {
            chain_weights(table, history, self.catalog.len())
        }))
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, ChainWeightCache> {
        // The cache holds no invariants a panicked writer could break.
        self.chain_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
