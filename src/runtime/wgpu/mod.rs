//! WebGPU runtime implementation (requires `wgpu` feature)
//!
//! Runs the work-group reductions and the atomic histogram as WGSL compute
//! shaders on any WebGPU adapter (Vulkan, Metal, DX12, GL).
//!
//! # Pipeline
//!
//! ```text
//! host: pad ──► upload ──► dispatch(num_groups) ──► copy to staging ──► map + read
//!                              │
//!                              └─ one partial per group / one atomic count per bin
//! ```
//!
//! Shaders are generated for the requested work-group size and validated by
//! naga before the device compiles them.

mod cache;
mod client;
mod device;
mod ops;
mod runtime;
pub mod shaders;

pub use client::WgpuClient;
pub use device::{AdapterInfo, WgpuDevice, WgpuError, list_adapters, parse_backends};
pub use runtime::{WgpuRuntime, is_wgpu_available};
