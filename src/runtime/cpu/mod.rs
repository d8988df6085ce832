//! CPU runtime implementation
//!
//! The CPU runtime is the reference backend. It executes the same work-group
//! protocol as the device shaders: each group reduces its lanes through a
//! private scratch buffer in `log2(L)` halving steps, and histogram lanes
//! increment a shared array of atomics.
//!
//! With the `rayon` feature (default) work-groups run concurrently on the
//! rayon thread pool; otherwise they run one after another.

mod client;
mod device;
pub(crate) mod kernels;
mod ops;
mod runtime;

pub use client::CpuClient;
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
