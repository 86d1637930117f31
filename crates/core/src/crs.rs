//! Coordinate Reference System handling

use serde::{Deserialize, Serialize};
use std::fmt;

/// WKT for EPSG:4326, written into shapefile `.prj` sidecars.
const WGS84_WKT: &str = r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]]"#;

/// Coordinate Reference System representation.
///
/// EPSG-code-centric: the pipeline works in EPSG:4326 end to end, but the
/// type carries arbitrary codes so fetched rasters keep whatever CRS the
/// provider was asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    /// EPSG code if known
    epsg: Option<u32>,
    /// WKT representation if known
    wkt: Option<String>,
}

impl Crs {
    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self {
            epsg: Some(code),
            wkt: None,
        }
    }

    /// WGS84 geographic CRS (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::from_epsg(4326)
    }

    /// Get EPSG code if known
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Whether coordinates in this CRS are degrees rather than metres.
    ///
    /// Only EPSG:4326 is treated as geographic; everything else the
    /// pipeline requests is a projected metre-based system.
    pub fn is_geographic(&self) -> bool {
        self.epsg == Some(4326)
    }

    /// OGC CRS URI, the form the Sentinel Hub Process API expects
    /// (e.g. `http://www.opengis.net/def/crs/EPSG/0/4326`).
    pub fn ogc_uri(&self) -> Option<String> {
        self.epsg
            .map(|code| format!("http://www.opengis.net/def/crs/EPSG/0/{}", code))
    }

    /// Well-known WKT for this CRS, if we carry one.
    ///
    /// Used for the `.prj` sidecar; a CRS without one simply produces no
    /// `.prj` file.
    pub fn well_known_wkt(&self) -> Option<&str> {
        if let Some(wkt) = &self.wkt {
            return Some(wkt);
        }
        match self.epsg {
            Some(4326) => Some(WGS84_WKT),
            _ => None,
        }
    }

    /// Check if two CRS are equivalent
    pub fn is_equivalent(&self, other: &Crs) -> bool {
        if let (Some(a), Some(b)) = (self.epsg, other.epsg) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (&self.wkt, &other.wkt) {
            return a == b;
        }
        false
    }

    /// Get a string identifier for this CRS
    pub fn identifier(&self) -> String {
        if let Some(code) = self.epsg {
            return format!("EPSG:{}", code);
        }
        if let Some(wkt) = &self.wkt {
            return format!("WKT:{}", &wkt[..wkt.len().min(50)]);
        }
        "Unknown".to_string()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}
