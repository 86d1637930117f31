//! Affine geotransformation for rasters

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{Error, Result};

/// Affine transformation coefficients for georeferencing rasters.
///
/// Converts between pixel coordinates (col, row) and geographic coordinates (x, y):
/// ```text
/// x = origin_x + col * pixel_width + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// For north-up images, `row_rotation` and `col_rotation` are 0 and
/// `pixel_height` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// X coordinate of the upper-left corner
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner
    pub origin_y: f64,
    /// Pixel width (cell size in X direction)
    pub pixel_width: f64,
    /// Pixel height (cell size in Y direction, usually negative)
    pub pixel_height: f64,
    /// Rotation about X axis (usually 0)
    pub row_rotation: f64,
    /// Rotation about Y axis (usually 0)
    pub col_rotation: f64,
}

impl GeoTransform {
    /// Create a new GeoTransform with no rotation (north-up image)
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    /// Build the north-up transform that maps a `width` x `height` pixel grid
    /// onto a bounding box, upper-left pixel corner at (min_x, max_y).
    ///
    /// This is the transform the fetcher stamps on every raster it returns,
    /// so two rasters requested with the same bbox and dimensions always
    /// share it exactly.
    pub fn from_bounds(bbox: &BoundingBox, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let pixel_width = (bbox.max_x - bbox.min_x) / width as f64;
        let pixel_height = -(bbox.max_y - bbox.min_y) / height as f64;
        Ok(Self::new(bbox.min_x, bbox.max_y, pixel_width, pixel_height))
    }

    /// Convert pixel corner coordinates to geographic coordinates.
    ///
    /// `(col, row)` addresses the top-left corner of the pixel, so valid
    /// inputs run to `cols` / `rows` inclusive. The polygonizer traces
    /// region boundaries along these corners.
    pub fn pixel_to_geo_corner(&self, col: usize, row: usize) -> (f64, f64) {
        let col_f = col as f64;
        let row_f = row as f64;

        let x = self.origin_x + col_f * self.pixel_width + row_f * self.row_rotation;
        let y = self.origin_y + col_f * self.col_rotation + row_f * self.pixel_height;

        (x, y)
    }

    /// Calculate the bounding rectangle for a raster of given dimensions,
    /// as (min_x, min_y, max_x, max_y).
    pub fn bounds(&self, width: usize, height: usize) -> (f64, f64, f64, f64) {
        let (x0, y0) = self.pixel_to_geo_corner(0, 0);
        let (x1, y1) = self.pixel_to_geo_corner(width, 0);
        let (x2, y2) = self.pixel_to_geo_corner(0, height);
        let (x3, y3) = self.pixel_to_geo_corner(width, height);

        let min_x = x0.min(x1).min(x2).min(x3);
        let max_x = x0.max(x1).max(x2).max(x3);
        let min_y = y0.min(y1).min(y2).min(y3);
        let max_y = y0.max(y1).max(y2).max(y3);

        (min_x, min_y, max_x, max_y)
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::Crs;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_bounds() {
        let bbox = BoundingBox::new(10.0, 40.0, 14.0, 42.0, Crs::wgs84()).unwrap();
        let gt = GeoTransform::from_bounds(&bbox, 400, 200).unwrap();

        assert_relative_eq!(gt.origin_x, 10.0);
        assert_relative_eq!(gt.origin_y, 42.0);
        assert_relative_eq!(gt.pixel_width, 0.01);
        assert_relative_eq!(gt.pixel_height, -0.01);

        // The transform must map the pixel grid back onto the bbox exactly.
        let (min_x, min_y, max_x, max_y) = gt.bounds(400, 200);
        assert_relative_eq!(min_x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(min_y, 40.0, epsilon = 1e-12);
        assert_relative_eq!(max_x, 14.0, epsilon = 1e-12);
        assert_relative_eq!(max_y, 42.0, epsilon = 1e-12);
    }

    #[test]
    fn test_from_bounds_zero_dims() {
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0, Crs::wgs84()).unwrap();
        assert!(GeoTransform::from_bounds(&bbox, 0, 10).is_err());
        assert!(GeoTransform::from_bounds(&bbox, 10, 0).is_err());
    }

    #[test]
    fn test_corner_mapping() {
        let gt = GeoTransform::new(100.0, 200.0, 10.0, -10.0);

        assert_eq!(gt.pixel_to_geo_corner(0, 0), (100.0, 200.0));
        assert_eq!(gt.pixel_to_geo_corner(5, 10), (150.0, 100.0));
    }
}
