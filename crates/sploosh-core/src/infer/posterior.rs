use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeStruct as _};

use crate::{
    board::{
        catalog::Catalog,
        grid::{CELL_COUNT, Cell},
        layout::Layout,
    },
    infer::observation::Observation,
};

/// Exact per-cell occupancy probabilities for one observation.
///
/// `evidence` is the total prior mass of the layouts consistent with the
/// observation. Under the built-in generation prior (which sums to 1 over
/// the catalog) this is the unconditional probability of seeing the
/// observed shot pattern; under external weights it is the raw consistent
/// mass. An observation no layout can explain produces no `Posterior` at
/// all; see [`Catalog::posterior`].
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    cells: [f64; CELL_COUNT],
    evidence: f64,
}

impl Posterior {
    pub(crate) fn from_parts(cells: [f64; CELL_COUNT], evidence: f64) -> Self {
        Self { cells, evidence }
    }

    /// Probability that `cell` holds a squid.
    #[must_use]
    pub fn cell(&self, cell: Cell) -> f64 {
        self.cells[usize::from(cell.index())]
    }

    /// All 64 cell probabilities in linear-index order.
    #[must_use]
    pub fn cells(&self) -> &[f64; CELL_COUNT] {
        &self.cells
    }

    /// Prior mass of the layouts consistent with the observation.
    #[must_use]
    pub fn evidence(&self) -> f64 {
        self.evidence
    }
}

impl Serialize for Posterior {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Posterior", 2)?;
        state.serialize_field("cells", &self.cells[..])?;
        state.serialize_field("evidence", &self.evidence)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Posterior {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            cells: Vec<f64>,
            evidence: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        let cells: [f64; CELL_COUNT] = raw.cells.try_into().map_err(|cells: Vec<f64>| {
            serde::de::Error::custom(format!(
                "expected {CELL_COUNT} cell probabilities, got {}",
                cells.len()
            ))
        })?;
        Ok(Self {
            cells,
            evidence: raw.evidence,
        })
    }
}

impl Catalog {
    /// Exact posterior under the generation prior.
    ///
    /// One pass over the catalog: every layout consistent with the
    /// observation contributes its weight to the evidence and to each of
    /// its cells. No sampling, no approximation. Returns `None` when no
    /// layout is consistent (the observation is impossible).
    #[must_use]
    pub fn posterior(&self, observation: &Observation) -> Option<Posterior> {
        self.weighted_posterior(observation, |_, layout| layout.weight())
    }

    /// Exact posterior under externally supplied per-layout weights, such
    /// as the chain weights derived from earlier rounds.
    ///
    /// # Panics
    ///
    /// Panics if `weights.len()` differs from the catalog length.
    #[must_use]
    pub fn posterior_with_weights(
        &self,
        observation: &Observation,
        weights: &[f64],
    ) -> Option<Posterior> {
        assert_eq!(weights.len(), self.len(), "one weight per catalog layout");
        self.weighted_posterior(observation, |index, _| weights[index])
    }

    fn weighted_posterior(
        &self,
        observation: &Observation,
        weight_of: impl Fn(usize, &Layout) -> f64,
    ) -> Option<Posterior> {
        let mut mass = [0.0_f64; CELL_COUNT];
        let mut total = 0.0_f64;

        for (index, layout) in self.iter().enumerate() {
            let weight = weight_of(index, layout);
            if weight <= 0.0 || !layout.is_consistent(observation) {
                continue;
            }
            total += weight;
            let mut bits = layout.cells().bits();
            while bits != 0 {
                mass[bits.trailing_zeros() as usize] += weight;
                bits &= bits - 1;
            }
        }

        if total == 0.0 {
            return None;
        }
        for cell in &mut mass {
            *cell /= total;
        }
        Some(Posterior {
            cells: mass,
            evidence: total,
        })
    }
}
