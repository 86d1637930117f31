//! # Verdant Algorithms
//!
//! The pure transformation stages of the NDVI change-detection pipeline:
//!
//! - **diff**: elementwise difference of two temporal index rasters
//! - **normalize**: rescale to [0, 1] for display
//! - **threshold**: absolute-value threshold to a binary change mask
//! - **polygonize**: extract connected mask regions as vector polygons
//!
//! Every stage is a pure function over its input raster; nothing here does
//! I/O or holds state across calls.

pub mod diff;
pub mod normalize;
pub mod polygonize;
pub mod threshold;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::diff::{difference, Difference};
    pub use crate::normalize::{normalize, Normalize};
    pub use crate::polygonize::{polygonize, Connectivity, Polygonize, PolygonizeParams};
    pub use crate::threshold::{threshold, Threshold, ThresholdParams};
    pub use verdant_core::prelude::*;
}

pub use diff::{difference, Difference};
pub use normalize::{normalize, Normalize};
pub use polygonize::{polygonize, Connectivity, Polygonize, PolygonizeParams};
pub use threshold::{threshold, Threshold, ThresholdParams};
