//! Statistics operations
//!
//! Operations are defined as traits implemented by each backend's client, so
//! the same pipeline runs on the CPU reference backend and on WebGPU.
//!
//! ```text
//! RuntimeClient<R>
//!   ├── implements ReduceOps      reduce_partials (device) + host fold-down
//!   ├── implements HistogramOps   histogram_counts (device, atomic)
//!   └── implements StatisticalOps summarize (two-stage pipeline)
//! ```
//!
//! # Implementing Operations for a New Backend
//!
//! A backend only supplies the two device-side primitives:
//!
//! ```ignore
//! impl ReduceOps for MyClient {
//!     fn reduce_partials(&self, data: &PaddedDataset, op: ReduceOp) -> Result<Vec<i64>> {
//!         // one tree-reduced scalar per work-group
//!     }
//! }
//!
//! impl HistogramOps for MyClient {
//!     fn histogram_counts(&self, data: &PaddedDataset, range: BinRange, bins: usize)
//!         -> Result<Vec<u32>> {
//!         // atomic per-bin counts over the first data.real_len() elements
//!     }
//! }
//!
//! impl StatisticalOps for MyClient {}
//! ```
//!
//! Padding, validation and the host fold-down are provided methods.

pub mod histogram;
pub mod reduce;
pub mod traits;

pub use histogram::BinRange;
pub use reduce::ReduceOp;
pub use traits::{HistogramOps, ReduceOps, StatisticalOps};
