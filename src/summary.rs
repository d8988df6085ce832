//! Host-side result aggregation

use std::fmt;

use crate::config::StatsConfig;
use crate::dataset::{Dataset, unscale};
use crate::error::Result;
use crate::ops::StatisticalOps;

/// The four results of a statistics run, in measurement units.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Largest measurement
    pub max: f64,
    /// Smallest measurement
    pub min: f64,
    /// Arithmetic mean over the real elements
    pub mean: f64,
    /// Per-bin counts over `[min, max]`
    pub histogram: Vec<u32>,
    /// Number of real elements
    pub count: usize,
}

impl Summary {
    /// Rescale reduced integers and derive the mean.
    ///
    /// `max`, `min` and `sum` are in scaled units. The sum is unscaled before
    /// dividing by `count`.
    pub fn aggregate(max: i64, min: i64, sum: i64, count: usize, histogram: Vec<u32>) -> Self {
        let mean = if count == 0 {
            0.0
        } else {
            unscale(sum) / count as f64
        };
        Self {
            max: unscale(max),
            min: unscale(min),
            mean,
            histogram,
            count,
        }
    }

    /// Total number of elements counted by the histogram.
    pub fn histogram_total(&self) -> u64 {
        self.histogram.iter().map(|&c| u64::from(c)).sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Max = {}", self.max)?;
        writeln!(f, "Min = {}", self.min)?;
        writeln!(f, "Mean = {}", self.mean)?;
        write!(f, "Hist = {:?}", self.histogram)
    }
}

/// Run the two-stage statistics pipeline on `client`.
///
/// See [`StatisticalOps::summarize`].
pub fn summarize<C: StatisticalOps>(
    client: &C,
    dataset: &Dataset,
    config: &StatsConfig,
) -> Result<Summary> {
    client.summarize(dataset, config)
}
