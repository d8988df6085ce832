//! CPU work-group kernels
//!
//! Host renditions of the device programs. A work-group's lanes are stepped in
//! lockstep: every lane finishes a step before any lane starts the next one,
//! which is exactly what a barrier guarantees on the device.

use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::ops::{BinRange, ReduceOp};

// ============================================================================
// Tree Reduction
// ============================================================================

/// Reduce one work-group through a scratch buffer of `group.len()` slots.
///
/// `group.len()` is a power of two; [`PaddedDataset`] only builds such groups.
///
/// [`PaddedDataset`]: crate::dataset::PaddedDataset
pub(crate) fn tree_reduce_group(group: &[i32], op: ReduceOp) -> i64 {
    // Each lane widens its element into scratch, then barrier.
    let mut scratch: Vec<i64> = group.iter().map(|&v| i64::from(v)).collect();

    let mut half = scratch.len() / 2;
    while half > 0 {
        for lane in 0..half {
            scratch[lane] = op.combine(scratch[lane], scratch[lane + half]);
        }
        // barrier
        half /= 2;
    }

    scratch[0]
}

/// One partial per work-group of `local_size` lanes.
pub(crate) fn reduce_workgroups(data: &[i32], local_size: usize, op: ReduceOp) -> Vec<i64> {
    #[cfg(feature = "rayon")]
    {
        data.par_chunks_exact(local_size)
            .map(|group| tree_reduce_group(group, op))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        data.chunks_exact(local_size)
            .map(|group| tree_reduce_group(group, op))
            .collect()
    }
}

// ============================================================================
// Atomic Histogram
// ============================================================================

/// Shared per-bin counters, incremented with atomic adds.
pub(crate) struct AtomicHistogram {
    counts: Vec<AtomicU32>,
}

impl AtomicHistogram {
    /// Zeroed counters for `bins` bins.
    pub(crate) fn new(bins: usize) -> Self {
        Self {
            counts: (0..bins).map(|_| AtomicU32::new(0)).collect(),
        }
    }

    /// Count one element into `bin`.
    #[inline]
    pub(crate) fn increment(&self, bin: usize) {
        self.counts[bin].fetch_add(1, Ordering::Relaxed);
    }

    /// Read the counts back once every lane is done.
    pub(crate) fn into_counts(self) -> Vec<u32> {
        self.counts.into_iter().map(AtomicU32::into_inner).collect()
    }
}

/// Bin every lane whose global index is below `real_len`.
///
/// Lanes past `real_len` hold padding and are masked out.
pub(crate) fn histogram_workgroups(
    data: &[i32],
    local_size: usize,
    real_len: usize,
    range: BinRange,
    bins: usize,
) -> Vec<u32> {
    let histogram = AtomicHistogram::new(bins);

    let bin_group = |(group_id, group): (usize, &[i32])| {
        let base = group_id * local_size;
        for (lane, &value) in group.iter().enumerate() {
            if base + lane >= real_len {
                break;
            }
            histogram.increment(range.bin_index(value, bins));
        }
    };

    #[cfg(feature = "rayon")]
    data.par_chunks_exact(local_size)
        .enumerate()
        .for_each(bin_group);
    #[cfg(not(feature = "rayon"))]
    data.chunks_exact(local_size).enumerate().for_each(bin_group);

    histogram.into_counts()
}
