//! Pixel-dimension math for raster requests.

use verdant_core::bbox::BoundingBox;

use crate::error::{HubError, Result};

/// Default request resolution, metres per pixel.
pub const DEFAULT_RESOLUTION_METERS: f64 = 10.0;

/// Metres per degree of latitude on the WGS84 sphere (2πR / 360 with
/// R = 6 378 137 m). Longitude degrees scale by cos(latitude).
const METERS_PER_DEGREE: f64 = 111_319.490_793;

/// Compute the pixel dimensions `(width, height)` for a bounding box at a
/// given resolution.
///
/// Deterministic and reproducible: the same bbox and resolution always
/// yield the same strictly positive dimensions, which is what guarantees
/// the two rasters of a run share shape and transform.
///
/// Convention: geographic (degree) extents are converted to metres at the
/// bbox centre latitude; projected extents are taken as metres directly.
/// The extent/resolution quotient is rounded to the nearest integer and
/// clamped to at least 1.
pub fn bbox_to_dimensions(bbox: &BoundingBox, resolution: f64) -> Result<(usize, usize)> {
    if !(resolution > 0.0) || !resolution.is_finite() {
        return Err(HubError::InvalidResolution { value: resolution });
    }

    let (width_m, height_m) = if bbox.crs.is_geographic() {
        let (_, mid_lat) = bbox.center();
        (
            bbox.width() * METERS_PER_DEGREE * mid_lat.to_radians().cos(),
            bbox.height() * METERS_PER_DEGREE,
        )
    } else {
        (bbox.width(), bbox.height())
    };

    let width = ((width_m / resolution).round() as usize).max(1);
    let height = ((height_m / resolution).round() as usize).max(1);

    Ok((width, height))
}
