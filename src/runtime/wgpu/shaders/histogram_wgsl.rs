//! WGSL shader source for the range-derived histogram
//!
//! One lane per padded element. Lanes past the real length return without
//! touching the counts, every other lane maps its value to a bin and does a
//! single `atomicAdd`. The bin formula matches `BinRange::bin_index`:
//! `floor((v - min) * bins / span)`, clamped to `[0, bins - 1]`, with every
//! value landing in bin 0 when `span == 0`. The host guarantees that
//! `span * bins` fits in a `u32`.

/// Name under which the histogram module for `workgroup_size` is cached
pub fn histogram_module_name(workgroup_size: u32) -> String {
    format!("histogram_wg{}", workgroup_size)
}

/// Histogram entry point
pub const HISTOGRAM_ENTRY_POINT: &str = "histogram_range";

/// Generate the histogram shader for a work-group size.
pub fn generate_histogram_shader(workgroup_size: u32) -> String {
    format!(
        r#"// Range-derived atomic histogram, L = {wg}

const WORKGROUP_SIZE: u32 = {wg}u;

struct HistogramParams {{
    real_len: u32,
    bins: u32,
    min_val: i32,
    span: u32,
}}

@group(0) @binding(0) var<storage, read_write> hist_input: array<i32>;
@group(0) @binding(1) var<storage, read_write> hist_counts: array<atomic<u32>>;
@group(0) @binding(2) var<uniform> hist_params: HistogramParams;

@compute @workgroup_size(WORKGROUP_SIZE)
fn {entry}(@builtin(local_invocation_index) lane: u32,
           @builtin(workgroup_id) group_id: vec3<u32>,
           @builtin(num_workgroups) num_groups: vec3<u32>) {{
    let group_index = group_id.x + group_id.y * num_groups.x;
    let idx = group_index * WORKGROUP_SIZE + lane;

    // Padding lanes and trailing groups
    if (idx >= hist_params.real_len) {{
        return;
    }}

    let v = hist_input[idx];
    var bin: u32 = 0u;
    if (hist_params.span > 0u && v > hist_params.min_val) {{
        let offset = min(bitcast<u32>(v) - bitcast<u32>(hist_params.min_val), hist_params.span);
        bin = min(offset * hist_params.bins / hist_params.span, hist_params.bins - 1u);
    }}

    atomicAdd(&hist_counts[bin], 1u);
}}
"#,
        wg = workgroup_size,
        entry = HISTOGRAM_ENTRY_POINT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::wgpu::shaders::pipeline::validate_wgsl;

    #[test]
    fn test_histogram_shader_valid_for_all_sizes() {
        for wg in [1u32, 4, 32, 256] {
            let shader = generate_histogram_shader(wg);
            validate_wgsl(&histogram_module_name(wg), &shader).unwrap_or_else(|e| {
                panic!("Invalid WGSL for workgroup size {}:\n{}\n\nShader:\n{}", wg, e, shader)
            });
        }
    }

    #[test]
    fn test_histogram_shader_masks_padding() {
        let shader = generate_histogram_shader(32);
        assert!(shader.contains("idx >= hist_params.real_len"));
        assert!(shader.contains("atomicAdd(&hist_counts[bin], 1u)"));
    }
}
