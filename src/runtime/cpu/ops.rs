//! Statistics operations for the CPU runtime

use log::debug;

use super::client::CpuClient;
use super::kernels;
use crate::dataset::PaddedDataset;
use crate::error::Result;
use crate::ops::{BinRange, HistogramOps, ReduceOp, ReduceOps, StatisticalOps};

impl ReduceOps for CpuClient {
    fn reduce_partials(&self, data: &PaddedDataset, op: ReduceOp) -> Result<Vec<i64>> {
        debug!(
            "cpu {op}: {} work-groups of {} lanes",
            data.num_groups(),
            data.local_size()
        );
        Ok(kernels::reduce_workgroups(
            data.as_slice(),
            data.local_size(),
            op,
        ))
    }
}

impl HistogramOps for CpuClient {
    fn histogram_counts(
        &self,
        data: &PaddedDataset,
        range: BinRange,
        bins: usize,
    ) -> Result<Vec<u32>> {
        crate::config::validate_bins(bins)?;
        Ok(kernels::histogram_workgroups(
            data.as_slice(),
            data.local_size(),
            data.real_len(),
            range,
            bins,
        ))
    }
}

impl StatisticalOps for CpuClient {}
