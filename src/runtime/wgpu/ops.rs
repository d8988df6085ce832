//! Statistics operations for the WebGPU runtime
//!
//! Each call uploads the padded dataset, dispatches one compute pass and
//! reads the result back through a staging buffer. Nothing stays resident
//! between calls except the cached pipelines.

use log::debug;

use super::WgpuClient;
use super::shaders::histogram::{HistogramParams, launch_histogram};
use super::shaders::reduce::{ReduceParams, launch_reduce};
use crate::dataset::PaddedDataset;
use crate::error::{Error, Result};
use crate::ops::{BinRange, HistogramOps, ReduceOp, ReduceOps, StatisticalOps};

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a uniform buffer with the given data.
fn create_params_buffer<T: bytemuck::Pod>(
    client: &WgpuClient,
    label: &str,
    data: &T,
) -> wgpu::Buffer {
    let buffer = client.create_uniform_buffer(label, std::mem::size_of::<T>() as u64);
    client
        .queue
        .write_buffer(&buffer, 0, bytemuck::bytes_of(data));
    buffer
}

/// Check that a padded dataset can be dispatched on this device.
fn check_dispatch(
    client: &WgpuClient,
    data: &PaddedDataset,
    operation: &'static str,
) -> Result<()> {
    let limits = client.limits();
    let local_size = data.local_size() as u64;
    let max_local = u64::from(
        limits
            .max_compute_workgroup_size_x
            .min(limits.max_compute_invocations_per_workgroup),
    );
    if local_size > max_local {
        return Err(Error::backend_limitation(
            "wgpu",
            operation,
            format!("work-group size {local_size} exceeds the device maximum of {max_local}"),
        ));
    }

    let bytes = (data.len() * std::mem::size_of::<i32>()) as u64;
    #[allow(clippy::useless_conversion)]
    let max_binding =
        u64::from(limits.max_storage_buffer_binding_size).min(limits.max_buffer_size);
    if bytes > max_binding {
        return Err(Error::backend_limitation(
            "wgpu",
            operation,
            format!("{bytes} byte input exceeds the {max_binding} byte storage binding limit"),
        ));
    }

    if u32::try_from(data.num_groups()).is_err() {
        return Err(Error::backend_limitation(
            "wgpu",
            operation,
            format!("{} work-groups do not fit in u32", data.num_groups()),
        ));
    }
    Ok(())
}

/// Check that no work-group sum can leave `i32`.
///
/// Device lanes add in `i32`. A group of `local_size` lanes stays in range
/// when `max(|v|) * local_size` does.
fn check_sum_range(data: &PaddedDataset) -> Result<()> {
    let max_abs = data.as_slice()[..data.real_len()]
        .iter()
        .map(|v| u64::from(v.unsigned_abs()))
        .max()
        .unwrap_or(0);
    let bound = max_abs * data.local_size() as u64;
    if bound > i32::MAX as u64 {
        return Err(Error::backend_limitation(
            "wgpu",
            "sum",
            format!(
                "|value| up to {max_abs} over {} lanes may overflow i32 work-group sums",
                data.local_size()
            ),
        ));
    }
    Ok(())
}

/// Upload padded data into a fresh storage buffer.
fn upload(client: &WgpuClient, label: &str, data: &PaddedDataset) -> wgpu::Buffer {
    let size = (data.len() * std::mem::size_of::<i32>()) as u64;
    let buffer = client.create_storage_buffer(label, size);
    client.write_buffer(&buffer, data.as_slice());
    buffer
}

// ============================================================================
// ReduceOps
// ============================================================================

impl WgpuClient {
    fn dispatch_reduce(&self, data: &PaddedDataset, op: ReduceOp) -> Result<Vec<i64>> {
        let num_groups = data.num_groups();
        let input = upload(self, "reduce_input", data);

        let partials_size = (num_groups * std::mem::size_of::<i32>()) as u64;
        let partials = self.create_storage_buffer("reduce_partials", partials_size);
        let params =
            create_params_buffer(self, "reduce_params", &ReduceParams::new(num_groups as u32));

        launch_reduce(
            &self.pipeline_cache,
            &self.queue,
            op,
            data.local_size() as u32,
            &input,
            &partials,
            &params,
            num_groups,
            self.limits().max_compute_workgroups_per_dimension,
        )?;

        let staging = self.copy_to_staging("reduce_staging", &partials, partials_size)?;
        let mut out = vec![0i32; num_groups];
        self.read_buffer(&staging, &mut out)?;
        Ok(out.into_iter().map(i64::from).collect())
    }
}

impl ReduceOps for WgpuClient {
    fn reduce_partials(&self, data: &PaddedDataset, op: ReduceOp) -> Result<Vec<i64>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        check_dispatch(self, data, op.name())?;
        if op == ReduceOp::Sum {
            check_sum_range(data)?;
        }
        debug!(
            "wgpu {op}: {} work-groups of {} lanes",
            data.num_groups(),
            data.local_size()
        );

        // A fault anywhere in the dispatch invalidates every partial
        self.with_error_scope(|| self.dispatch_reduce(data, op))
            .map_err(|e| match e {
                Error::Backend(reason) => Error::reduction_failed(op.name(), reason),
                other => other,
            })
    }
}

// ============================================================================
// HistogramOps
// ============================================================================

impl HistogramOps for WgpuClient {
    fn histogram_counts(
        &self,
        data: &PaddedDataset,
        range: BinRange,
        bins: usize,
    ) -> Result<Vec<u32>> {
        crate::config::validate_bins(bins)?;
        if data.real_len() == 0 {
            return Ok(vec![0; bins]);
        }
        check_dispatch(self, data, "histogram")?;
        let params = HistogramParams::new(data.real_len(), range, bins)?;

        let counts_size = (bins * std::mem::size_of::<u32>()) as u64;
        #[allow(clippy::useless_conversion)]
        let max_binding = u64::from(self.limits().max_storage_buffer_binding_size);
        if counts_size > max_binding {
            return Err(Error::backend_limitation(
                "wgpu",
                "histogram",
                format!("{bins} bins exceed the storage binding limit"),
            ));
        }

        debug!(
            "wgpu histogram: {} elements into {} bins over [{}, {}]",
            data.real_len(),
            bins,
            range.min(),
            range.max()
        );

        self.with_error_scope(|| {
            let input = upload(self, "histogram_input", data);
            let counts = self.create_storage_buffer("histogram_counts", counts_size);
            let params_buffer = create_params_buffer(self, "histogram_params", &params);

            launch_histogram(
                &self.pipeline_cache,
                &self.queue,
                data.local_size() as u32,
                &input,
                &counts,
                &params_buffer,
                data.num_groups(),
                self.limits().max_compute_workgroups_per_dimension,
            )?;

            let staging = self.copy_to_staging("histogram_staging", &counts, counts_size)?;
            let mut out = vec![0u32; bins];
            self.read_buffer(&staging, &mut out)?;
            Ok(out)
        })
    }
}

impl StatisticalOps for WgpuClient {}
