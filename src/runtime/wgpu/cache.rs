//! Global client cache for WebGPU runtime

use super::client::WgpuClient;
use super::device::{WgpuDevice, WgpuError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Global client cache: (backend bits, adapter index) -> cached WgpuClient
///
/// Opening a WebGPU device is expensive, so each adapter is opened once and
/// its client (device, queue and pipeline cache) is shared.
static CLIENT_CACHE: OnceLock<Mutex<HashMap<(u32, usize), WgpuClient>>> = OnceLock::new();

/// Get or create a cached WgpuClient for a device.
pub(super) fn get_or_create_client(device: &WgpuDevice) -> Result<WgpuClient, WgpuError> {
    let cache = CLIENT_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache_guard = cache.lock();

    let key = (device.backends.bits(), device.index);
    if let Some(client) = cache_guard.get(&key) {
        return Ok(client.clone());
    }

    let client = WgpuClient::new_uncached(device.clone())?;
    cache_guard.insert(key, client.clone());

    Ok(client)
}
