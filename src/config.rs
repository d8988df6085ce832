//! Run configuration shared by every backend.

use crate::error::{Error, Result};

/// Work-group size used when none is configured.
pub const DEFAULT_WORKGROUP_SIZE: u32 = 32;

/// Largest supported work-group size.
///
/// The WGSL reduction shaders declare their scratch array with this bound as
/// the ceiling, and it is the WebGPU default for `max_compute_invocations_per_workgroup`.
pub const MAX_WORKGROUP_SIZE: u32 = 256;

/// Configuration for a statistics run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsConfig {
    /// Lanes per work-group. Must be a power of two.
    pub workgroup_size: u32,
    /// Number of histogram bins. Must be at least 1.
    pub bins: usize,
}

impl StatsConfig {
    /// Configuration with the given bin count and the default work-group size.
    pub fn new(bins: usize) -> Self {
        Self {
            workgroup_size: DEFAULT_WORKGROUP_SIZE,
            bins,
        }
    }

    /// Replace the work-group size.
    pub fn with_workgroup_size(mut self, workgroup_size: u32) -> Self {
        self.workgroup_size = workgroup_size;
        self
    }

    /// Check the configuration before anything is dispatched.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `bins` is zero or the work-group
    /// size is not a power of two in `1..=MAX_WORKGROUP_SIZE`.
    pub fn validate(&self) -> Result<()> {
        validate_bins(self.bins)?;
        validate_workgroup_size(self.workgroup_size)
    }
}

/// Reject a bin count of zero.
pub fn validate_bins(bins: usize) -> Result<()> {
    if bins == 0 {
        return Err(Error::invalid_argument(
            "bins",
            "Number of bins must be positive",
        ));
    }
    Ok(())
}

/// Reject work-group sizes the halving reduction cannot handle.
pub fn validate_workgroup_size(workgroup_size: u32) -> Result<()> {
    if workgroup_size == 0 || !workgroup_size.is_power_of_two() {
        return Err(Error::invalid_argument(
            "workgroup_size",
            format!("{workgroup_size} is not a positive power of two"),
        ));
    }
    if workgroup_size > MAX_WORKGROUP_SIZE {
        return Err(Error::invalid_argument(
            "workgroup_size",
            format!("{workgroup_size} exceeds the maximum of {MAX_WORKGROUP_SIZE}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workgroup_size() {
        let config = StatsConfig::new(8);
        assert_eq!(config.workgroup_size, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_bins_rejected() {
        assert!(StatsConfig::new(0).validate().is_err());
    }

    #[test]
    fn test_workgroup_size_must_be_power_of_two() {
        for bad in [0, 3, 24, 100, 512] {
            let err = StatsConfig::new(4).with_workgroup_size(bad).validate();
            assert!(err.is_err(), "workgroup size {bad} should be rejected");
        }
        for good in [1, 2, 4, 32, 64, 256] {
            assert!(StatsConfig::new(4).with_workgroup_size(good).validate().is_ok());
        }
    }
}
