//! WebGPU Client implementation.
//!
//! `WgpuClient` owns the WebGPU device and queue for operation dispatch.
//!
//! # Thread Safety
//!
//! `WgpuClient` is `Clone` and the underlying wgpu::Device and wgpu::Queue
//! are already `Send + Sync` by design.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use wgpu::{Buffer, BufferDescriptor, BufferUsages, Device, ErrorFilter, Queue};

use super::WgpuRuntime;
use super::cache::get_or_create_client;
use super::device::{WgpuDevice, WgpuError, query_adapter_info_blocking};
use super::shaders::PipelineCache;
use crate::error::{Error, Result};
use crate::runtime::RuntimeClient;

/// How long a blocking wait on the queue may take.
const POLL_TIMEOUT: Duration = Duration::from_secs(60);

// ============================================================================
// WgpuClient
// ============================================================================

/// WebGPU Runtime Client.
///
/// Owns the WebGPU device and queue. Every reduction and histogram is
/// submitted through this client's queue.
///
/// # Buffer Management
///
/// Each operation uploads its padded input into a fresh storage buffer,
/// dispatches, then copies results into a staging buffer for read-back.
/// Buffers are dropped when the operation returns.
#[derive(Clone)]
pub struct WgpuClient {
    /// GPU device identifier
    pub(crate) device_id: WgpuDevice,

    /// WebGPU device handle
    pub(crate) wgpu_device: Arc<Device>,

    /// WebGPU queue for command submission
    pub(crate) queue: Arc<Queue>,

    /// Pipeline cache for compute shaders
    pub(crate) pipeline_cache: Arc<PipelineCache>,
}

impl std::fmt::Debug for WgpuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuClient")
            .field("device", &self.device_id)
            .finish_non_exhaustive()
    }
}

impl WgpuClient {
    /// Get the shared client for a device, opening it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No suitable GPU adapter is found
    /// - The adapter index is out of range
    /// - Device creation fails
    pub fn new(device: WgpuDevice) -> std::result::Result<Self, WgpuError> {
        get_or_create_client(&device)
    }

    /// Open the device without consulting the client cache.
    pub(super) fn new_uncached(device: WgpuDevice) -> std::result::Result<Self, WgpuError> {
        let (adapter, info) = query_adapter_info_blocking(&device)?;

        // The adapter's own limits are always satisfiable and let larger
        // datasets fit in one storage binding.
        let required_limits = adapter.limits();

        let (wgpu_device, queue) = pollster::block_on(async {
            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: Some("wgstat WebGPU Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits,
                    memory_hints: wgpu::MemoryHints::Performance,
                    trace: wgpu::Trace::Off,
                    experimental_features: wgpu::ExperimentalFeatures::default(),
                })
                .await
        })
        .map_err(|e| WgpuError::DeviceError(format!("{:?}", e)))?;

        install_device_error_handlers(&wgpu_device);

        let wgpu_device = Arc::new(wgpu_device);
        let queue = Arc::new(queue);
        let pipeline_cache = Arc::new(PipelineCache::new(wgpu_device.clone()));

        debug!("opened WebGPU device {}", info);

        Ok(Self {
            device_id: device.with_info(info),
            wgpu_device,
            queue,
            pipeline_cache,
        })
    }

    /// Limits the device was opened with.
    pub fn limits(&self) -> wgpu::Limits {
        self.wgpu_device.limits()
    }

    /// Create a storage buffer.
    ///
    /// Storage buffers can be read/written by compute shaders.
    pub fn create_storage_buffer(&self, label: &str, size: u64) -> Buffer {
        self.wgpu_device.create_buffer(&BufferDescriptor {
            label: Some(label),
            size,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST | BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        })
    }

    /// Create a staging buffer for CPU readback.
    pub fn create_staging_buffer(&self, label: &str, size: u64) -> Buffer {
        self.wgpu_device.create_buffer(&BufferDescriptor {
            label: Some(label),
            size,
            usage: BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Create a uniform buffer for shader parameters.
    pub fn create_uniform_buffer(&self, label: &str, size: u64) -> Buffer {
        self.wgpu_device.create_buffer(&BufferDescriptor {
            label: Some(label),
            size,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write data to a buffer.
    pub fn write_buffer<T: bytemuck::Pod>(&self, buffer: &Buffer, data: &[T]) {
        self.queue
            .write_buffer(buffer, 0, bytemuck::cast_slice(data));
    }

    /// Copy `size` bytes from a storage buffer into a new staging buffer
    /// and wait for the copy to finish.
    pub fn copy_to_staging(&self, label: &str, src: &Buffer, size: u64) -> Result<Buffer> {
        let staging = self.create_staging_buffer(label, size);
        let mut encoder = self
            .wgpu_device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) });
        encoder.copy_buffer_to_buffer(src, 0, &staging, 0, size);
        self.submit_and_wait(encoder)?;
        Ok(staging)
    }

    /// Submit commands and wait for completion.
    pub fn submit_and_wait(&self, encoder: wgpu::CommandEncoder) -> Result<()> {
        let submission = self.queue.submit(std::iter::once(encoder.finish()));
        self.wgpu_device
            .poll(wgpu::PollType::Wait {
                submission_index: Some(submission),
                timeout: Some(POLL_TIMEOUT),
            })
            .map_err(|e| Error::Backend(format!("GPU poll failed: {e}")))?;
        Ok(())
    }

    /// Run `f` inside validation and out-of-memory error scopes.
    ///
    /// A device error raised while `f` runs is returned as `Error::Backend`
    /// in place of `f`'s own result.
    pub fn with_error_scope<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let validation = self.wgpu_device.push_error_scope(ErrorFilter::Validation);
        let out_of_memory = self.wgpu_device.push_error_scope(ErrorFilter::OutOfMemory);

        let result = f();

        // Scopes pop innermost first
        let oom_error = pollster::block_on(out_of_memory.pop());
        let validation_error = pollster::block_on(validation.pop());

        match oom_error.or(validation_error) {
            Some(e) => Err(Error::Backend(format!("WebGPU device error: {e}"))),
            None => result,
        }
    }

    /// Read buffer data back to CPU (blocking).
    pub fn read_buffer<T: bytemuck::Pod>(&self, staging: &Buffer, output: &mut [T]) -> Result<()> {
        let slice = staging.slice(..);

        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        self.wgpu_device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: Some(POLL_TIMEOUT),
            })
            .map_err(|e| Error::Backend(format!("GPU poll failed during buffer read: {e}")))?;

        let map_result = receiver.recv().map_err(|_| {
            Error::Backend("map_async callback was not invoked during buffer read".into())
        })?;
        map_result
            .map_err(|e| Error::Backend(format!("map_async failed during buffer read: {e}")))?;

        {
            let data = slice.get_mapped_range();
            let src: &[T] = bytemuck::cast_slice(&data);
            if src.len() < output.len() {
                return Err(Error::Backend(format!(
                    "staging buffer holds {} elements, expected {}",
                    src.len(),
                    output.len()
                )));
            }
            output.copy_from_slice(&src[..output.len()]);
        }

        staging.unmap();
        Ok(())
    }
}

impl RuntimeClient<WgpuRuntime> for WgpuClient {
    fn device(&self) -> &WgpuDevice {
        &self.device_id
    }
}

/// Log uncaptured errors and device loss instead of panicking.
///
/// Errors raised during a dispatch are captured by
/// [`WgpuClient::with_error_scope`] and never reach this handler.
fn install_device_error_handlers(device: &Device) {
    device.on_uncaptured_error(Arc::new(|e: wgpu::Error| {
        error!("WebGPU uncaptured error: {e}");
    }));
    device.set_device_lost_callback(|reason, message| {
        error!("WebGPU device lost: reason={reason:?}, message={message}");
    });
}

// ============================================================================
// Tests
// ============================================================================
