//! # Verdant Core
//!
//! Core types and I/O for the verdant NDVI change-detection pipeline.
//!
//! This crate provides:
//! - `Raster<T>`: generic single-band raster grid
//! - `GeoTransform`: affine transformation for georeferencing
//! - `Crs` / `BoundingBox`: spatial reference plumbing
//! - `AreaOfInterest`: GeoJSON AOI resolution
//! - `ChangeSet`: ordered change-polygon collection
//! - Native GeoTIFF I/O

pub mod aoi;
pub mod bbox;
pub mod crs;
pub mod error;
pub mod io;
pub mod raster;
pub mod vector;

pub use aoi::AreaOfInterest;
pub use bbox::BoundingBox;
pub use crs::Crs;
pub use error::{Error, Result};
pub use raster::{GeoTransform, Raster, RasterElement};
pub use vector::ChangeSet;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aoi::AreaOfInterest;
    pub use crate::bbox::BoundingBox;
    pub use crate::crs::Crs;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{GeoTransform, Raster, RasterElement};
    pub use crate::vector::ChangeSet;
    pub use crate::Algorithm;
}

/// Core trait for the pipeline's transformation stages.
///
/// Stages are pure functions over rasters; the trait gives them a uniform
/// name/describe/execute surface for the CLI and for anything that wants to
/// enumerate them.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
