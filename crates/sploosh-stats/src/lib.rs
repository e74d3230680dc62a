//! Numeric utilities shared by the squid-hunt solver crates.
//!
//! - [`gaussian`]: Gaussian beliefs over the pseudo-random step count
//!   separating rounds, with the scan-window bounds the sequence model uses
//! - [`descriptive`]: summary statistics for observed step gaps, used to
//!   estimate step beliefs from matched table positions
//!
//! # Examples
//!
//! ```
//! use sploosh_stats::{descriptive::DescriptiveStats, gaussian::StepBelief};
//!
//! let gaps = [480.0, 510.0, 495.0, 505.0];
//! let stats = DescriptiveStats::new(gaps).unwrap();
//! let belief: StepBelief = stats.to_belief();
//! assert_eq!(belief.mean, 498);
//! ```

pub mod descriptive;
pub mod gaussian;
