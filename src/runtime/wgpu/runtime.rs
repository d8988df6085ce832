//! WebGPU runtime implementation

use super::client::WgpuClient;
use super::device::{WgpuDevice, query_adapter_info_blocking};
use crate::error::Result;
use crate::runtime::Runtime;

/// WebGPU Runtime adapter
///
/// Implements the generic Runtime trait for WebGPU backend.
/// Provides cross-platform GPU acceleration.
#[derive(Clone, Debug, Default)]
pub struct WgpuRuntime;

impl Runtime for WgpuRuntime {
    type Device = WgpuDevice;
    type Client = WgpuClient;

    fn name() -> &'static str {
        "wgpu"
    }

    fn default_device() -> Self::Device {
        WgpuDevice::new(0)
    }

    fn default_client(device: &Self::Device) -> Result<Self::Client> {
        Ok(WgpuClient::new(device.clone())?)
    }
}

/// Check if WebGPU is available on this system
pub fn is_wgpu_available() -> bool {
    query_adapter_info_blocking(&WgpuDevice::new(0)).is_ok()
}
