//! Reduction WGSL kernel launcher
//!
//! Dispatches one work-group per `workgroup_size` input elements. Each group
//! writes its partial into `partials[group_index]`; the host folds them.

use wgpu::{Buffer, Queue};

use super::pipeline::{LayoutKey, PipelineCache, dispatch_grid};
use super::reduce_wgsl::{generate_reduce_shader, reduce_entry_point, reduce_module_name};
use crate::error::Result;
use crate::ops::ReduceOp;

/// Uniform parameters for the reduce shader
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ReduceParams {
    /// Number of real work-groups in the dispatch
    pub num_groups: u32,
    _pad: [u32; 3],
}

impl ReduceParams {
    /// Parameters for `num_groups` work-groups
    pub fn new(num_groups: u32) -> Self {
        Self {
            num_groups,
            _pad: [0; 3],
        }
    }
}

/// Launch a work-group tree reduction.
///
/// Bindings: `input` (padded data), `partials` (one `i32` per group),
/// `params_buffer` ([`ReduceParams`]).
#[allow(clippy::too_many_arguments)]
pub fn launch_reduce(
    cache: &PipelineCache,
    queue: &Queue,
    op: ReduceOp,
    workgroup_size: u32,
    input: &Buffer,
    partials: &Buffer,
    params_buffer: &Buffer,
    num_groups: usize,
    max_groups_per_dimension: u32,
) -> Result<()> {
    let (groups_x, groups_y) = dispatch_grid(num_groups, max_groups_per_dimension)?;

    let module_name = reduce_module_name(workgroup_size);
    let module =
        cache.get_or_create_module(&module_name, || generate_reduce_shader(workgroup_size))?;
    let layout = cache.get_or_create_layout(LayoutKey {
        num_storage_buffers: 2,
        num_uniform_buffers: 1,
    });
    let pipeline =
        cache.get_or_create_pipeline(&module_name, reduce_entry_point(op), &module, &layout);

    let bind_group = cache.create_bind_group(&layout, &[input, partials, params_buffer]);

    let mut encoder = cache
        .device()
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some(op.name()),
        });

    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some(op.name()),
            timestamp_writes: None,
        });
        pass.set_pipeline(&pipeline);
        pass.set_bind_group(0, Some(&bind_group), &[]);
        pass.dispatch_workgroups(groups_x, groups_y, 1);
    }

    queue.submit(std::iter::once(encoder.finish()));
    Ok(())
}
