//! Core trait for compute backends

use crate::error::Result;

/// Core trait for compute backends
///
/// `Runtime` abstracts over different compute devices (CPU, GPU).
/// It uses static dispatch via generics.
///
/// # Associated Types
///
/// - `Device`: Identifies a specific compute unit (e.g., GPU 0, GPU 1)
/// - `Client`: Handles operation dispatch
///
/// # Example
///
/// ```ignore
/// let device = CpuRuntime::default_device();
/// let client = CpuRuntime::default_client(&device)?;
/// let summary = client.summarize(&dataset, &StatsConfig::new(10))?;
/// ```
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Device identifier type
    type Device: super::Device;

    /// Client for dispatching operations
    type Client: super::RuntimeClient<Self>;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Get the default client for a device
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be opened.
    fn default_client(device: &Self::Device) -> Result<Self::Client>;
}
