//! Histogram binning helpers

use crate::error::{Error, Result};

/// Closed value range `[min, max]` spanned by the histogram bins, in scaled units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRange {
    min: i32,
    max: i32,
}

impl BinRange {
    /// Create a range. `min == max` is allowed and sends every value to bin 0.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `min > max`.
    pub fn new(min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(Error::invalid_argument(
                "range",
                format!("Range min ({min}) must not exceed max ({max})"),
            ));
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[inline]
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// `max - min`, which always fits in `u32`.
    #[inline]
    pub fn span(&self) -> u32 {
        (i64::from(self.max) - i64::from(self.min)) as u32
    }

    /// Bin for `value` among `bins` equal-width bins.
    ///
    /// `floor((value - min) * bins / (max - min))` clamped to `[0, bins - 1]`.
    /// A value on an interior edge belongs to the bin starting at that edge;
    /// `max` itself is clamped into the last bin. A zero-width range maps
    /// everything to bin 0.
    #[inline]
    pub fn bin_index(&self, value: i32, bins: usize) -> usize {
        debug_assert!(bins > 0);
        let span = i64::from(self.span());
        if span == 0 {
            return 0;
        }
        let offset = (i64::from(value) - i64::from(self.min)).clamp(0, span);
        let bin = (offset as i128 * bins as i128 / span as i128) as usize;
        bin.min(bins - 1)
    }
}
