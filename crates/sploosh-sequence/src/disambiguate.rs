use sploosh_core::{Catalog, CellSet, Observation};

/// Share of the candidate mass the winner must hold to be trusted.
///
/// A wrong resolution silently corrupts the round history, so anything
/// short of near-certainty is surfaced as [`Disambiguation::Unresolved`]
/// for the caller to settle by hand.
pub const RESOLVE_CONFIDENCE: f64 = 0.9;

/// Result of resolving which layout a completed round realized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disambiguation {
    /// The round's layout is this catalog index.
    Resolved(u32),
    /// No candidate, or no candidate confident enough; never guess.
    Unresolved,
}

/// Catalog indices of every layout a fully sunk board could be, given the
/// (possibly partial) hit set.
#[expect(clippy::cast_possible_truncation)]
#[must_use]
pub fn candidate_indices(catalog: &Catalog, hits: CellSet) -> Vec<u32> {
    let observation = Observation::completed(hits);
    catalog
        .iter()
        .enumerate()
        .filter(|(_, layout)| layout.is_consistent(&observation))
        .map(|(index, _)| index as u32)
        .collect()
}

/// Picks among several candidates using chain weights.
///
/// Resolves only when one candidate holds more than
/// [`RESOLVE_CONFIDENCE`] of the total candidate mass. Zero total mass
/// means the history chain cannot reach any candidate, which is also
/// unresolved.
#[must_use]
pub fn resolve(candidates: &[u32], weights: &[f64]) -> Disambiguation {
    let total: f64 = candidates
        .iter()
        .map(|&index| weights[index as usize])
        .sum();
    if total == 0.0 {
        return Disambiguation::Unresolved;
    }
    candidates
        .iter()
        .find(|&&index| weights[index as usize] / total > RESOLVE_CONFIDENCE)
        .map_or(Disambiguation::Unresolved, |&index| {
            Disambiguation::Resolved(index)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_requires_dominant_candidate() {
        let mut weights = vec![0.0; 10];
        weights[2] = 0.95;
        weights[5] = 0.05;
        assert_eq!(resolve(&[2, 5], &weights), Disambiguation::Resolved(2));

        weights[2] = 0.6;
        weights[5] = 0.4;
        assert_eq!(resolve(&[2, 5], &weights), Disambiguation::Unresolved);
    }

    #[test]
    fn test_resolve_zero_mass_is_unresolved() {
        let weights = vec![0.0; 10];
        assert_eq!(resolve(&[2, 5], &weights), Disambiguation::Unresolved);
    }

    #[test]
    fn test_resolve_ignores_non_candidate_mass() {
        let mut weights = vec![0.0; 10];
        weights[1] = 100.0; // not a candidate
        weights[2] = 0.01;
        assert_eq!(resolve(&[2], &weights), Disambiguation::Resolved(2));
    }
}
