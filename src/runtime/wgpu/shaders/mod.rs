//! WGSL compute shader infrastructure for WebGPU operations
//!
//! Shaders are generated per work-group size, validated with naga and cached
//! by [`PipelineCache`].
//!
//! # Module Structure
//!
//! - `pipeline` - Pipeline caching, validation and dispatch utilities
//! - `reduce_wgsl` / `reduce` - Tree reduction source and launcher
//! - `histogram_wgsl` / `histogram` - Atomic histogram source and launcher

pub mod histogram;
pub mod histogram_wgsl;
pub mod pipeline;
pub mod reduce;
pub mod reduce_wgsl;

pub use pipeline::{LayoutKey, PipelineCache};
