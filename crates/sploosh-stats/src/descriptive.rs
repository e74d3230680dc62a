use crate::gaussian::StepBelief;

/// Summary statistics for a set of observed step gaps.
///
/// Used to turn the gaps between matched table positions into a suggested
/// [`StepBelief`] for subsequent rounds.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of observations.
    pub count: usize,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes summary statistics.
    ///
    /// Returns `None` for an empty dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sploosh_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([2.0, 4.0, 6.0]).unwrap();
    /// assert_eq!(stats.mean, 4.0);
    /// assert_eq!(stats.min, 2.0);
    /// assert_eq!(stats.max, 6.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let n = count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        Some(Self {
            count,
            min,
            max,
            mean,
            variance,
            std_dev,
        })
    }

    /// Rounds the summary into a step belief.
    ///
    /// The deviation is floored at one step so a belief built from
    /// identical gaps still has a usable scan window.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn to_belief(&self) -> StepBelief {
        StepBelief::new(self.mean.round().max(0.0) as u32, self.std_dev.max(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset() {
        assert_eq!(DescriptiveStats::new([]), None);
    }

    #[test]
    fn test_summary_values() {
        let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.variance, 2.0);
        assert!((stats.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_to_belief_rounds_mean_and_floors_deviation() {
        let stats = DescriptiveStats::new([500.0, 500.0, 500.0]).unwrap();
        let belief = stats.to_belief();
        assert_eq!(belief.mean, 500);
        assert_eq!(belief.std_dev, 1.0);

        let stats = DescriptiveStats::new([480.0, 521.0]).unwrap();
        assert_eq!(stats.to_belief().mean, 501); // 500.5 rounds up
    }
}
