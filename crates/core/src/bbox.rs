//! Geographic bounding boxes

use serde::{Deserialize, Serialize};

use crate::crs::Crs;
use crate::error::{Error, Result};

/// An axis-aligned geographic bounding box with its CRS.
///
/// Derived from an [`crate::aoi::AreaOfInterest`] and handed to the index
/// fetcher; both index rasters of a run are requested with the same box, so
/// they share shape and transform by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub crs: Crs,
}

impl BoundingBox {
    /// Create a bounding box, rejecting empty or inverted extents.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64, crs: Crs) -> Result<Self> {
        if !(min_x < max_x && min_y < max_y)
            || !min_x.is_finite()
            || !min_y.is_finite()
            || !max_x.is_finite()
            || !max_y.is_finite()
        {
            return Err(Error::InvalidBBox {
                min_x,
                min_y,
                max_x,
                max_y,
            });
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
            crs,
        })
    }

    /// Extent in X (native CRS units)
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent in Y (native CRS units)
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Centre point (x, y)
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// As `[west, south, east, north]`, the order wire formats use.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}
