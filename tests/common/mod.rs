//! Common test utilities
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wgstat::dataset::Dataset;
use wgstat::runtime::Runtime;
use wgstat::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
#[cfg(feature = "wgpu")]
use wgstat::runtime::wgpu::{WgpuClient, WgpuDevice, WgpuRuntime};

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device).expect("CPU client is always available");
    (client, device)
}

/// Create a WebGPU client and device, returning None if WebGPU is unavailable
#[cfg(feature = "wgpu")]
pub fn create_wgpu_client() -> Option<(WgpuClient, WgpuDevice)> {
    if !wgstat::runtime::wgpu::is_wgpu_available() {
        return None;
    }
    let device = WgpuDevice::new(0);
    let client = WgpuRuntime::default_client(&device).ok()?;
    Some((client, device))
}

/// Seeded dataset of `len` scaled values in `[lo, hi]`
pub fn random_dataset(seed: u64, len: usize, lo: i32, hi: i32) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    Dataset::from_scaled((0..len).map(|_| rng.random_range(lo..=hi)).collect())
}

/// Sequential reference for max, min and sum of a dataset
pub fn reference_stats(dataset: &Dataset) -> (i64, i64, i64) {
    let values = dataset.values();
    let max = values.iter().copied().max().map(i64::from).unwrap_or(0);
    let min = values.iter().copied().min().map(i64::from).unwrap_or(0);
    let sum = values.iter().map(|&v| i64::from(v)).sum();
    (max, min, sum)
}
