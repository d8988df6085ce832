//! Summary statistics pipeline trait.

use log::{debug, warn};

use crate::config::StatsConfig;
use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::ops::{BinRange, HistogramOps, ReduceOp, ReduceOps};
use crate::summary::Summary;

/// Max, min, mean and histogram of a dataset
pub trait StatisticalOps: ReduceOps + HistogramOps {
    /// Run the two-stage statistics pipeline.
    ///
    /// ```text
    /// stage 1: max, min, sum   (independent reductions, each read back)
    /// stage 2: histogram       (needs stage 1's min and max)
    /// ```
    ///
    /// # Errors
    ///
    /// Configuration errors are returned before any dispatch. Device faults
    /// end the pipeline; nothing is retried.
    fn summarize(&self, dataset: &Dataset, config: &StatsConfig) -> Result<Summary> {
        config.validate()?;
        if dataset.is_empty() {
            return Err(Error::invalid_argument(
                "dataset",
                "cannot summarize an empty dataset",
            ));
        }

        if config.bins > dataset.len() {
            warn!(
                "{} bins for {} elements; most bins will be empty",
                config.bins,
                dataset.len()
            );
        }

        let wg = config.workgroup_size;
        let max = self.reduce(dataset, ReduceOp::Max, wg)?;
        let min = self.reduce(dataset, ReduceOp::Min, wg)?;
        let sum = self.reduce(dataset, ReduceOp::Sum, wg)?;
        debug!("stage 1 complete: max={max} min={min} sum={sum}");

        let lo = i32::try_from(min)
            .map_err(|_| Error::reduction_failed("min", format!("{min} is outside i32")))?;
        let hi = i32::try_from(max)
            .map_err(|_| Error::reduction_failed("max", format!("{max} is outside i32")))?;
        let range = BinRange::new(lo, hi)?;
        let histogram = self.histogram(dataset, range, config.bins, wg)?;

        Ok(Summary::aggregate(max, min, sum, dataset.len(), histogram))
    }
}
