//! Operation traits for dataset statistics.
//!
//! Implementations are in the backend-specific modules (cpu/, wgpu/).

mod histogram;
mod reduce;
mod statistics;

pub use histogram::HistogramOps;
pub use reduce::ReduceOps;
pub use statistics::StatisticalOps;
