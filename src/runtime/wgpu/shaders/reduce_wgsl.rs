//! WGSL shader source for work-group tree reductions
//!
//! One shader module is generated per work-group size `L`. Each work-group
//! copies its `L` lanes into workgroup memory and halves the active range
//! `log2(L)` times, with a barrier after every step. Lane 0 then writes the
//! group's partial. Padding lanes already hold the operator's neutral value,
//! so no lane needs masking.
//!
//! `L` must be a power of two; the scratch array is sized to exactly `L`.

use crate::ops::ReduceOp;

/// Name under which the reduce module for `workgroup_size` is cached
pub fn reduce_module_name(workgroup_size: u32) -> String {
    format!("reduce_wg{}", workgroup_size)
}

/// Entry point for a reduction operator
pub fn reduce_entry_point(op: ReduceOp) -> &'static str {
    match op {
        ReduceOp::Max => "reduce_max",
        ReduceOp::Min => "reduce_min",
        ReduceOp::Sum => "reduce_sum",
    }
}

/// WGSL combine expression for `a` and `b`
fn combine_expr(op: ReduceOp) -> &'static str {
    match op {
        ReduceOp::Max => "max(a, b)",
        ReduceOp::Min => "min(a, b)",
        // i32 addition wraps on overflow
        ReduceOp::Sum => "a + b",
    }
}

fn generate_entry_point(op: ReduceOp) -> String {
    let entry = reduce_entry_point(op);
    let combine = combine_expr(op);

    format!(
        r#"
fn combine_{name}(a: i32, b: i32) -> i32 {{
    return {combine};
}}

@compute @workgroup_size(WORKGROUP_SIZE)
fn {entry}(@builtin(local_invocation_id) local_id: vec3<u32>,
           @builtin(workgroup_id) group_id: vec3<u32>,
           @builtin(num_workgroups) num_groups: vec3<u32>) {{
    let tid = local_id.x;
    let group_index = group_id.x + group_id.y * num_groups.x;

    // Trailing groups of a 2D dispatch grid
    if (group_index >= reduce_params.num_groups) {{
        return;
    }}

    reduce_scratch[tid] = reduce_input[group_index * WORKGROUP_SIZE + tid];
    workgroupBarrier();

    for (var stride: u32 = WORKGROUP_SIZE / 2u; stride > 0u; stride = stride >> 1u) {{
        if (tid < stride) {{
            reduce_scratch[tid] = combine_{name}(reduce_scratch[tid], reduce_scratch[tid + stride]);
        }}
        workgroupBarrier();
    }}

    if (tid == 0u) {{
        reduce_partials[group_index] = reduce_scratch[0];
    }}
}}
"#,
        name = op.name(),
        combine = combine,
        entry = entry,
    )
}

/// Generate the reduce shader for a work-group size.
///
/// The module holds one entry point per [`ReduceOp`].
pub fn generate_reduce_shader(workgroup_size: u32) -> String {
    let mut source = format!(
        r#"// Work-group tree reduction, L = {wg}

const WORKGROUP_SIZE: u32 = {wg}u;

var<workgroup> reduce_scratch: array<i32, {wg}>;

struct ReduceParams {{
    num_groups: u32,
    _pad0: u32,
    _pad1: u32,
    _pad2: u32,
}}

@group(0) @binding(0) var<storage, read_write> reduce_input: array<i32>;
@group(0) @binding(1) var<storage, read_write> reduce_partials: array<i32>;
@group(0) @binding(2) var<uniform> reduce_params: ReduceParams;
"#,
        wg = workgroup_size
    );

    for op in ReduceOp::ALL {
        source.push_str(&generate_entry_point(op));
    }
    source
}
