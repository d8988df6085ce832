//! Reduction operations trait.

use log::debug;

use crate::config::validate_workgroup_size;
use crate::dataset::{Dataset, PaddedDataset};
use crate::error::{Error, Result};
use crate::ops::ReduceOp;

/// Work-group tree reductions
pub trait ReduceOps {
    /// Reduce every work-group of `data` to one scalar.
    ///
    /// Returns one partial per work-group, in group order. `data` must already
    /// be padded with `op.neutral()`. Any device fault is reported as
    /// `Error::ReductionFailed`.
    fn reduce_partials(&self, data: &PaddedDataset, op: ReduceOp) -> Result<Vec<i64>>;

    /// Reduce a dataset to a single scalar.
    ///
    /// Pads with the operator's neutral value, dispatches one work-group per
    /// `workgroup_size` elements and folds all partials on the host.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for an empty dataset or an invalid
    /// work-group size.
    fn reduce(&self, dataset: &Dataset, op: ReduceOp, workgroup_size: u32) -> Result<i64> {
        validate_workgroup_size(workgroup_size)?;
        if dataset.is_empty() {
            return Err(Error::invalid_argument(
                "dataset",
                format!("cannot compute '{op}' of an empty dataset"),
            ));
        }

        let padded = PaddedDataset::pad(dataset.values(), workgroup_size, op.neutral())?;
        let partials = self.reduce_partials(&padded, op)?;
        if partials.len() != padded.num_groups() {
            return Err(Error::reduction_failed(
                op.name(),
                format!(
                    "expected {} partials, device returned {}",
                    padded.num_groups(),
                    partials.len()
                ),
            ));
        }
        debug!("{op}: folding {} work-group partials", partials.len());

        op.fold_partials(&partials)
            .ok_or_else(|| Error::reduction_failed(op.name(), "no partial results"))
    }

    /// Maximum element, in scaled units.
    fn max(&self, dataset: &Dataset, workgroup_size: u32) -> Result<i64> {
        self.reduce(dataset, ReduceOp::Max, workgroup_size)
    }

    /// Minimum element, in scaled units.
    fn min(&self, dataset: &Dataset, workgroup_size: u32) -> Result<i64> {
        self.reduce(dataset, ReduceOp::Min, workgroup_size)
    }

    /// Sum of all elements, in scaled units.
    fn sum(&self, dataset: &Dataset, workgroup_size: u32) -> Result<i64> {
        self.reduce(dataset, ReduceOp::Sum, workgroup_size)
    }
}
