//! WGSL compute pipeline infrastructure
//!
//! Provides pipeline caching, shader validation and dispatch utilities for
//! the generated WGSL compute shaders.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use wgpu::naga::front::wgsl;
use wgpu::naga::valid::{Capabilities, ValidationFlags, Validator};
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, Buffer, BufferBindingType, ComputePipeline,
    ComputePipelineDescriptor, Device, PipelineLayoutDescriptor, ShaderModule,
    ShaderModuleDescriptor, ShaderSource, ShaderStages,
};

use crate::error::{Error, Result};

/// Options string reported with shader build failures.
const VALIDATION_OPTIONS: &str = "ValidationFlags::all(), Capabilities::empty()";

// ============================================================================
// Pipeline Cache
// ============================================================================

/// Cache for compute pipelines keyed by (module name, entry point)
///
/// Module names carry the work-group size the shader was generated for
/// (e.g. `reduce_wg32`), so each size gets its own module and pipelines.
pub struct PipelineCache {
    device: Arc<Device>,
    /// Cached shader modules by name
    modules: Mutex<HashMap<String, Arc<ShaderModule>>>,
    /// Cached pipelines by (module name, entry_point)
    pipelines: Mutex<HashMap<(String, &'static str), Arc<ComputePipeline>>>,
    /// Cached bind group layouts by layout key
    layouts: Mutex<HashMap<LayoutKey, Arc<BindGroupLayout>>>,
}

/// Key for bind group layout cache
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    /// Number of storage buffers in the layout
    pub num_storage_buffers: u32,
    /// Number of uniform buffers in the layout
    pub num_uniform_buffers: u32,
}

impl PipelineCache {
    /// Create a new pipeline cache
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            modules: Mutex::new(HashMap::new()),
            pipelines: Mutex::new(HashMap::new()),
            layouts: Mutex::new(HashMap::new()),
        }
    }

    /// Get or create a shader module.
    ///
    /// `source` is only called on a cache miss. The generated WGSL is parsed
    /// and validated before it is handed to the device, so a broken program
    /// surfaces as `Error::ShaderBuild` with the full diagnostic instead of
    /// a device-side validation panic.
    pub fn get_or_create_module(
        &self,
        name: &str,
        source: impl FnOnce() -> String,
    ) -> Result<Arc<ShaderModule>> {
        let mut modules = self.modules.lock();
        if let Some(module) = modules.get(name) {
            return Ok(module.clone());
        }

        let source = source();
        validate_wgsl(name, &source)?;

        let module = self.device.create_shader_module(ShaderModuleDescriptor {
            label: Some(name),
            source: ShaderSource::Wgsl(source.into()),
        });

        let module = Arc::new(module);
        modules.insert(name.to_string(), module.clone());
        Ok(module)
    }

    /// Get or create a compute pipeline
    pub fn get_or_create_pipeline(
        &self,
        module_name: &str,
        entry_point: &'static str,
        module: &ShaderModule,
        layout: &BindGroupLayout,
    ) -> Arc<ComputePipeline> {
        let key = (module_name.to_string(), entry_point);
        let mut pipelines = self.pipelines.lock();

        if let Some(pipeline) = pipelines.get(&key) {
            return pipeline.clone();
        }

        let pipeline_layout = self
            .device
            .create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{}_layout", module_name)),
                bind_group_layouts: &[layout],
                immediate_size: 0,
            });

        let pipeline = self
            .device
            .create_compute_pipeline(&ComputePipelineDescriptor {
                label: Some(&format!("{}_{}", module_name, entry_point)),
                layout: Some(&pipeline_layout),
                module,
                entry_point: Some(entry_point),
                compilation_options: Default::default(),
                cache: None,
            });

        let pipeline = Arc::new(pipeline);
        pipelines.insert(key, pipeline.clone());
        pipeline
    }

    /// Get or create a bind group layout: read-write storage buffers first,
    /// then uniform buffers.
    pub fn get_or_create_layout(&self, key: LayoutKey) -> Arc<BindGroupLayout> {
        let mut layouts = self.layouts.lock();

        if let Some(layout) = layouts.get(&key) {
            return layout.clone();
        }

        let mut entries = Vec::new();

        for i in 0..key.num_storage_buffers {
            entries.push(BindGroupLayoutEntry {
                binding: i,
                visibility: ShaderStages::COMPUTE,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Storage { read_only: false },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            });
        }

        for i in 0..key.num_uniform_buffers {
            entries.push(BindGroupLayoutEntry {
                binding: key.num_storage_buffers + i,
                visibility: ShaderStages::COMPUTE,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            });
        }

        let layout = self
            .device
            .create_bind_group_layout(&BindGroupLayoutDescriptor {
                label: Some("wgstat_layout"),
                entries: &entries,
            });

        let layout = Arc::new(layout);
        layouts.insert(key, layout.clone());
        layout
    }

    /// Create a bind group from buffers, bound in order
    pub fn create_bind_group(&self, layout: &BindGroupLayout, buffers: &[&Buffer]) -> BindGroup {
        let entries: Vec<BindGroupEntry> = buffers
            .iter()
            .enumerate()
            .map(|(i, buffer)| BindGroupEntry {
                binding: i as u32,
                resource: buffer.as_entire_binding(),
            })
            .collect();

        self.device.create_bind_group(&BindGroupDescriptor {
            label: Some("wgstat_bind_group"),
            layout,
            entries: &entries,
        })
    }

    /// Get device reference
    pub fn device(&self) -> &Device {
        &self.device
    }
}

// ============================================================================
// Shader Validation
// ============================================================================

/// Parse and validate WGSL source with naga.
///
/// # Errors
///
/// Returns `Error::ShaderBuild` carrying the failing stage and the rendered
/// diagnostic.
pub fn validate_wgsl(label: &str, source: &str) -> Result<()> {
    let module = wgsl::Frontend::new()
        .parse(source)
        .map_err(|e| Error::ShaderBuild {
            label: label.to_string(),
            status: "parse error",
            options: VALIDATION_OPTIONS.to_string(),
            log: e.emit_to_string(source),
        })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| Error::ShaderBuild {
            label: label.to_string(),
            status: "validation error",
            options: VALIDATION_OPTIONS.to_string(),
            log: error_chain(&e),
        })?;

    Ok(())
}

/// Render an error and every source beneath it, one per line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut log = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        log.push_str("\n  caused by: ");
        log.push_str(&cause.to_string());
        source = cause.source();
    }
    log
}

// ============================================================================
// Dispatch Helpers
// ============================================================================

/// Split `num_groups` work-groups into an `(x, y)` dispatch grid.
///
/// Groups are numbered `x + y * grid_x`; trailing groups past `num_groups`
/// in the last row must be skipped by the shader.
///
/// # Errors
///
/// Returns `Error::BackendLimitation` if the grid does not fit in
/// `max_per_dimension` squared.
pub fn dispatch_grid(num_groups: usize, max_per_dimension: u32) -> Result<(u32, u32)> {
    let max = max_per_dimension.max(1) as usize;
    let x = num_groups.min(max);
    let y = num_groups.div_ceil(x.max(1));
    if y > max {
        return Err(Error::backend_limitation(
            "wgpu",
            "dispatch",
            format!(
                "{num_groups} work-groups exceed the {max} x {max} dispatch grid"
            ),
        ));
    }
    Ok((x as u32, y as u32))
}
