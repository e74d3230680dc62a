/// Standard deviations covered on each side of the mean when scanning for
/// a round's table position.
///
/// Mass beyond 5σ is below 4e-6 of the total, so truncating the scan there
/// leaves the resulting probabilities exact to well past display precision.
pub const WINDOW_SIGMAS: f64 = 5.0;

/// Gaussian belief over how many pseudo-random steps separate two rounds.
///
/// Step counts are table offsets, so the belief doubles as a distribution
/// over the distance between the table positions realizing consecutive
/// rounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepBelief {
    /// Expected number of steps.
    pub mean: u32,
    /// Standard deviation, in steps.
    pub std_dev: f64,
}

impl StepBelief {
    #[must_use]
    pub fn new(mean: u32, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Unnormalized Gaussian density at a step count.
    ///
    /// Normalization is deliberately omitted: chain weights are renormalized
    /// once at the end of inference, and keeping the peak at 1.0 avoids
    /// underflow over long chains.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn density(&self, steps: i64) -> f64 {
        let z = (steps as f64 - f64::from(self.mean)) / self.std_dev;
        (-0.5 * z * z).exp()
    }

    /// Half-width of the scan window, in steps.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn scan_radius(&self) -> i64 {
        (WINDOW_SIGMAS * self.std_dev) as i64
    }
}
