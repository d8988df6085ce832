//! Trait for device identification

/// Trait for device identification
pub trait Device: Clone + Send + Sync + 'static {
    /// Unique identifier for this device
    fn id(&self) -> usize;

    /// Human-readable name
    fn name(&self) -> String {
        format!("Device({})", self.id())
    }

    /// Whether work runs on a separate accelerator rather than the host
    fn is_accelerator(&self) -> bool {
        false
    }
}
