//! Histogram WGSL kernel launcher

use wgpu::{Buffer, Queue};

use super::histogram_wgsl::{
    HISTOGRAM_ENTRY_POINT, generate_histogram_shader, histogram_module_name,
};
use super::pipeline::{LayoutKey, PipelineCache, dispatch_grid};
use crate::error::{Error, Result};
use crate::ops::BinRange;

/// Uniform parameters for the histogram shader
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HistogramParams {
    /// Number of real elements; lanes at or past this index are skipped
    pub real_len: u32,
    /// Number of bins
    pub bins: u32,
    /// Range lower bound
    pub min_val: i32,
    /// `max - min`
    pub span: u32,
}

impl HistogramParams {
    /// Build shader parameters, checking that the bin arithmetic fits in `u32`.
    ///
    /// # Errors
    ///
    /// Returns `Error::BackendLimitation` if `real_len` or `bins` do not fit
    /// in `u32`, or if `span * bins` would overflow the shader's `u32` math.
    pub fn new(real_len: usize, range: BinRange, bins: usize) -> Result<Self> {
        let real_len = u32::try_from(real_len).map_err(|_| {
            Error::backend_limitation("wgpu", "histogram", "more than u32::MAX elements")
        })?;
        let bins_u32 = u32::try_from(bins).map_err(|_| {
            Error::backend_limitation("wgpu", "histogram", "more than u32::MAX bins")
        })?;
        let span = range.span();
        if u64::from(span) * u64::from(bins_u32) > u64::from(u32::MAX) {
            return Err(Error::backend_limitation(
                "wgpu",
                "histogram",
                format!("range span {span} x {bins} bins overflows 32-bit bin arithmetic"),
            ));
        }
        Ok(Self {
            real_len,
            bins: bins_u32,
            min_val: range.min(),
            span,
        })
    }
}

/// Launch the atomic histogram kernel.
///
/// Bindings: `input` (padded data), `counts` (`bins` zeroed `u32`s),
/// `params_buffer` ([`HistogramParams`]). `counts` is cleared in the same
/// submission before the dispatch.
#[allow(clippy::too_many_arguments)]
pub fn launch_histogram(
    cache: &PipelineCache,
    queue: &Queue,
    workgroup_size: u32,
    input: &Buffer,
    counts: &Buffer,
    params_buffer: &Buffer,
    num_groups: usize,
    max_groups_per_dimension: u32,
) -> Result<()> {
    let (groups_x, groups_y) = dispatch_grid(num_groups, max_groups_per_dimension)?;

    let module_name = histogram_module_name(workgroup_size);
    let module =
        cache.get_or_create_module(&module_name, || generate_histogram_shader(workgroup_size))?;
    let layout = cache.get_or_create_layout(LayoutKey {
        num_storage_buffers: 2,
        num_uniform_buffers: 1,
    });
    let pipeline =
        cache.get_or_create_pipeline(&module_name, HISTOGRAM_ENTRY_POINT, &module, &layout);

    let bind_group = cache.create_bind_group(&layout, &[input, counts, params_buffer]);

    let mut encoder = cache
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("histogram"),
        });

    encoder.clear_buffer(counts, 0, None);

    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("histogram"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, Some(&bind_group), &[]);
        pass.dispatch_workgroups(groups_x, groups_y, 1);
    }

    queue.submit(std::iter::once(encoder.finish()));
    Ok(())
}
