//! Histogram operations trait.

use crate::config::{validate_bins, validate_workgroup_size};
use crate::dataset::{Dataset, PaddedDataset};
use crate::error::Result;
use crate::ops::BinRange;

/// Range-derived histogram binning
pub trait HistogramOps {
    /// Count the real elements of `data` into `bins` equal-width bins over `range`.
    ///
    /// Only the first `data.real_len()` elements are counted; padding lanes
    /// are masked out. Counts are accumulated with atomic increments.
    fn histogram_counts(
        &self,
        data: &PaddedDataset,
        range: BinRange,
        bins: usize,
    ) -> Result<Vec<u32>>;

    /// Histogram of a dataset over `range`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `bins` is zero or the work-group
    /// size is invalid. Both are checked before anything is dispatched.
    fn histogram(
        &self,
        dataset: &Dataset,
        range: BinRange,
        bins: usize,
        workgroup_size: u32,
    ) -> Result<Vec<u32>> {
        validate_bins(bins)?;
        validate_workgroup_size(workgroup_size)?;
        if dataset.is_empty() {
            return Ok(vec![0; bins]);
        }
        let padded = PaddedDataset::pad(dataset.values(), workgroup_size, 0)?;
        self.histogram_counts(&padded, range, bins)
    }
}
