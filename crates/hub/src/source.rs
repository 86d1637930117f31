//! Abstraction over where index rasters come from.

use chrono::NaiveDate;

use verdant_core::bbox::BoundingBox;
use verdant_core::raster::Raster;

use crate::error::Result;

/// A source of index rasters for dated acquisitions.
///
/// The pipeline depends on this trait rather than on a concrete client, so
/// tests can feed it synthetic rasters without any network or credentials.
pub trait IndexSource {
    /// Fetch the index raster for `date` over `bbox` at `resolution`
    /// metres per pixel.
    fn fetch_index(
        &mut self,
        bbox: &BoundingBox,
        date: NaiveDate,
        resolution: f64,
    ) -> Result<Raster<f32>>;
}
