//! WebGPU device implementation.
//!
//! `WgpuDevice` names a WebGPU adapter by its enumeration index within a set
//! of backends (Vulkan, Metal, DX12, GL) and caches its properties once the
//! adapter has been opened.
//!
//! # Thread Safety
//!
//! `WgpuDevice` is `Clone` and `Send + Sync`. The underlying adapter info
//! is cached on construction.

use std::fmt;
use std::sync::Arc;

use log::info;
use wgpu::{Adapter, Backend, Backends, DeviceType};

/// Error type for WebGPU operations.
#[derive(Debug, Clone)]
pub enum WgpuError {
    /// No suitable GPU adapter found.
    NoAdapter,
    /// The requested adapter index does not exist.
    AdapterIndex {
        /// Requested index
        index: usize,
        /// Number of adapters found
        available: usize,
    },
    /// Device request failed.
    DeviceError(String),
}

impl fmt::Display for WgpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WgpuError::NoAdapter => write!(f, "No suitable WebGPU adapter found"),
            WgpuError::AdapterIndex { index, available } => write!(
                f,
                "Adapter index {} out of range ({} adapters available)",
                index, available
            ),
            WgpuError::DeviceError(msg) => write!(f, "WebGPU device error: {}", msg),
        }
    }
}

impl std::error::Error for WgpuError {}

/// Cached adapter information for a WebGPU device.
#[derive(Clone, Debug)]
pub struct AdapterInfo {
    /// Enumeration index within the backend set
    pub index: usize,
    /// Adapter name (e.g., "NVIDIA GeForce RTX 4090")
    pub name: String,
    /// Backend type (Vulkan, Metal, DX12, etc.)
    pub backend: Backend,
    /// Integrated, discrete, virtual, CPU
    pub device_type: DeviceType,
}

impl fmt::Display for AdapterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({:?}, {:?})",
            self.index, self.name, self.backend, self.device_type
        )
    }
}

/// WebGPU device identifier.
///
/// Represents a specific GPU device. The device index maps to the order
/// of adapters returned by WebGPU enumeration for the selected backends.
///
/// # Example
///
/// ```ignore
/// let device = WgpuDevice::new(0);  // First GPU
/// println!("Device: {}", device.adapter_name());
/// ```
#[derive(Clone)]
pub struct WgpuDevice {
    /// Device index (adapter order)
    pub(crate) index: usize,
    /// Backends searched for the adapter
    pub(crate) backends: Backends,
    /// Cached adapter info (lazily populated)
    info: Option<Arc<AdapterInfo>>,
}

impl WgpuDevice {
    /// Create a device identifier for the specified adapter index on any backend.
    ///
    /// This does not initialize the GPU - that happens when `WgpuClient::new`
    /// is called.
    pub fn new(index: usize) -> Self {
        Self::with_backends(index, Backends::all())
    }

    /// Create a device identifier restricted to a set of backends.
    pub fn with_backends(index: usize, backends: Backends) -> Self {
        Self {
            index,
            backends,
            info: None,
        }
    }

    pub(crate) fn with_info(&self, info: Arc<AdapterInfo>) -> Self {
        Self {
            index: self.index,
            backends: self.backends,
            info: Some(info),
        }
    }

    /// Get the adapter name.
    ///
    /// Returns "unknown" if the device hasn't been initialized yet.
    pub fn adapter_name(&self) -> String {
        self.info
            .as_ref()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Get the backend type (Vulkan, Metal, DX12, etc.).
    ///
    /// Returns `None` if the device hasn't been initialized yet.
    pub fn backend(&self) -> Option<Backend> {
        self.info.as_ref().map(|i| i.backend)
    }
}

impl crate::runtime::Device for WgpuDevice {
    fn id(&self) -> usize {
        self.index
    }

    fn name(&self) -> String {
        match &self.info {
            Some(info) => format!("wgpu:{} {} ({:?})", self.index, info.name, info.backend),
            None => format!("wgpu:{}", self.index),
        }
    }

    fn is_accelerator(&self) -> bool {
        true
    }
}

impl fmt::Debug for WgpuDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WgpuDevice")
            .field("index", &self.index)
            .field("backends", &self.backends)
            .field("adapter", &self.adapter_name())
            .field("backend", &self.backend())
            .finish()
    }
}

// ============================================================================
// Adapter Discovery
// ============================================================================

fn adapter_info(index: usize, adapter: &Adapter) -> AdapterInfo {
    let wgpu_info = adapter.get_info();
    AdapterInfo {
        index,
        name: wgpu_info.name,
        backend: wgpu_info.backend,
        device_type: wgpu_info.device_type,
    }
}

async fn enumerate(backends: Backends) -> Vec<Adapter> {
    let instance = wgpu::Instance::default();
    instance.enumerate_adapters(backends).await
}

/// Query adapter information for a device.
///
/// This is an async operation that requests a WebGPU adapter.
pub(crate) async fn query_adapter_info(
    device: &WgpuDevice,
) -> Result<(Adapter, Arc<AdapterInfo>), WgpuError> {
    let mut adapters = enumerate(device.backends).await;

    if adapters.is_empty() {
        return Err(WgpuError::NoAdapter);
    }
    if device.index >= adapters.len() {
        return Err(WgpuError::AdapterIndex {
            index: device.index,
            available: adapters.len(),
        });
    }

    let adapter = adapters.swap_remove(device.index);
    let info = Arc::new(adapter_info(device.index, &adapter));
    info!("Selected adapter {}", info);

    Ok((adapter, info))
}

/// Query adapter information synchronously using pollster.
pub(crate) fn query_adapter_info_blocking(
    device: &WgpuDevice,
) -> Result<(Adapter, Arc<AdapterInfo>), WgpuError> {
    pollster::block_on(query_adapter_info(device))
}

/// List every adapter available on the given backends, in index order.
pub fn list_adapters(backends: Backends) -> Vec<AdapterInfo> {
    pollster::block_on(enumerate(backends))
        .iter()
        .enumerate()
        .map(|(index, adapter)| adapter_info(index, adapter))
        .collect()
}

/// Parse a platform name into a backend set.
///
/// Accepts `all`, `vulkan`, `metal`, `dx12` and `gl` (case-insensitive).
pub fn parse_backends(name: &str) -> Option<Backends> {
    match name.to_ascii_lowercase().as_str() {
        "all" => Some(Backends::all()),
        "vulkan" => Some(Backends::VULKAN),
        "metal" => Some(Backends::METAL),
        "dx12" => Some(Backends::DX12),
        "gl" => Some(Backends::GL),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Device;

    #[test]
    fn test_wgpu_device_creation() {
        let device = WgpuDevice::new(0);
        assert_eq!(device.id(), 0);
        assert_eq!(device.name(), "wgpu:0");
        assert!(device.is_accelerator());
    }

    #[test]
    fn test_parse_backends() {
        assert_eq!(parse_backends("Vulkan"), Some(Backends::VULKAN));
        assert_eq!(parse_backends("all"), Some(Backends::all()));
        assert_eq!(parse_backends("cuda"), None);
    }

    #[test]
    fn test_wgpu_device_with_adapter() {
        let device = WgpuDevice::new(0);
        match query_adapter_info_blocking(&device) {
            Ok((_, info)) => {
                let device = device.with_info(info);
                println!("Adapter: {}", device.adapter_name());
                println!("Backend: {:?}", device.backend());
                assert!(!device.adapter_name().is_empty());
            }
            Err(e) => {
                println!("No GPU available, skipping test: {}", e);
            }
        }
    }

    #[test]
    fn test_out_of_range_index() {
        let available = list_adapters(Backends::all()).len();
        let device = WgpuDevice::new(available + 3);
        assert!(query_adapter_info_blocking(&device).is_err());
    }
}
