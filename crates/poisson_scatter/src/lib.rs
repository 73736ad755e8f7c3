#![forbid(unsafe_code)]
//! poisson_scatter: blue-noise point sampling with image-driven density.
//!
//! Modules:
//! - grid: uniform bucket grid for neighbor queries
//! - density: luminance sources and the spacing field derived from them
//! - config: per-run sampling parameters
//! - sampling: Bridson-style Poisson disk sampler
//! - placement: sinks that hand results to a host
//!
//! For examples, see the `poisson_scatter_examples` crate.
pub mod config;
pub mod density;
pub mod domain;
pub mod error;
pub mod grid;
pub mod placement;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use poisson_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::config::{CapPolicy, SamplingConfig};
    pub use crate::density::{grayscale, DensityField, GrayImage, LuminanceSource};
    pub use crate::domain::{Domain, Point};
    pub use crate::error::{Error, Result};
    pub use crate::grid::{Cell, OutOfBounds, PointId, SpatialGrid};
    pub use crate::placement::{FnPlacement, PlacementSink, PointCollector};
    pub use crate::sampling::{generate, PoissonSampler, SampleRun};
}
