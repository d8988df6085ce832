//! # wgstat
//!
//! **Work-group tree reductions and atomic histograms over scaled-integer datasets.**
//!
//! wgstat computes the maximum, minimum, mean and a range-derived histogram of
//! a dataset by running the classic GPU work-group protocol: the data is
//! padded to a whole number of work-groups, each group tree-reduces its lanes
//! in local memory, and the host folds one partial per group. The histogram
//! is a second stage that bins every real element between the reduced
//! minimum and maximum with atomic increments.
//!
//! ## Features
//!
//! - **Reductions**: max, min and sum with operator-specific padding
//! - **Histogram**: equal-width bins derived from the data range
//! - **Backends**: a rayon CPU backend and a WebGPU backend with the same API
//! - **Fixed point**: measurements are pre-scaled by [`dataset::SCALE`] so
//!   devices only do integer work
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wgstat::prelude::*;
//!
//! let device = CpuRuntime::default_device();
//! let client = CpuRuntime::default_client(&device)?;
//!
//! let dataset = Dataset::from_measurements(&[1.0, 2.0, 3.0, 4.0]);
//! let summary = client.summarize(&dataset, &StatsConfig::new(2))?;
//! println!("{summary}");
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): run CPU work-groups on the rayon thread pool
//! - `wgpu`: Cross-platform GPU via WebGPU

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod ops;
pub mod runtime;
pub mod summary;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::StatsConfig;
    pub use crate::dataset::{Dataset, PaddedDataset};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{BinRange, HistogramOps, ReduceOp, ReduceOps, StatisticalOps};
    pub use crate::runtime::cpu::CpuRuntime;
    pub use crate::runtime::{Device, Runtime, RuntimeClient};
    pub use crate::summary::Summary;

    #[cfg(feature = "wgpu")]
    pub use crate::runtime::wgpu::WgpuRuntime;
}

/// Default runtime based on enabled features
///
/// - With `wgpu` feature: `WgpuRuntime`
/// - Otherwise: `CpuRuntime`
#[cfg(feature = "wgpu")]
pub type DefaultRuntime = runtime::wgpu::WgpuRuntime;

/// Default runtime based on enabled features
#[cfg(not(feature = "wgpu"))]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
