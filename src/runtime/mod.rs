//! Runtime backends for work-group computation
//!
//! This module defines the `Runtime` trait and provides implementations
//! for different compute backends (CPU, WebGPU).
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific adapter or the host CPU)
//! └── Client (owns queue/pipelines, dispatches operations)
//! ```
//!
//! Every client implements the operation traits in [`crate::ops`].

mod traits;

pub mod cpu;

#[cfg(feature = "wgpu")]
pub mod wgpu;

pub use traits::{Device, Runtime, RuntimeClient};
