//! Area-of-interest resolution
//!
//! Turns a user-supplied GeoJSON document (uploaded file or drawn shape,
//! both arrive in the same interchange schema) into a polygon geometry and
//! the bounding box the rest of the pipeline runs on.

use geo::BoundingRect;
use geo_types::Geometry;
use geojson::GeoJson;

use crate::bbox::BoundingBox;
use crate::crs::Crs;
use crate::error::{Error, Result};

/// A user-defined area of interest: one polygon geometry plus its CRS.
///
/// Input CRS is fixed to WGS84; the interchange format carries coordinates
/// in that reference system.
#[derive(Debug, Clone)]
pub struct AreaOfInterest {
    geometry: Geometry<f64>,
    crs: Crs,
}

impl AreaOfInterest {
    /// Build an AOI from an already-parsed polygon geometry.
    pub fn new(geometry: Geometry<f64>) -> Result<Self> {
        match &geometry {
            Geometry::Polygon(p) => {
                if p.exterior().0.len() < 4 {
                    return Err(Error::InvalidGeometry(
                        "polygon exterior has fewer than 3 distinct vertices".into(),
                    ));
                }
            }
            Geometry::MultiPolygon(mp) => {
                if mp.0.is_empty() {
                    return Err(Error::MissingGeometry);
                }
            }
            other => {
                return Err(Error::InvalidGeometry(format!(
                    "expected Polygon or MultiPolygon, got {}",
                    geometry_name(other)
                )))
            }
        }
        Ok(Self {
            geometry,
            crs: Crs::wgs84(),
        })
    }

    /// Parse an AOI from GeoJSON text.
    ///
    /// Accepts a Feature (the shape the upload and the map-draw widget both
    /// produce), a bare Geometry, or a FeatureCollection (first feature).
    /// A document with no geometry is `Error::MissingGeometry`: the
    /// pipeline must not proceed on an undefined AOI.
    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let parsed: GeoJson = text
            .parse()
            .map_err(|e| Error::InvalidGeometry(format!("invalid GeoJSON: {}", e)))?;

        let geometry = match parsed {
            GeoJson::Feature(feature) => feature.geometry.ok_or(Error::MissingGeometry)?,
            GeoJson::Geometry(geometry) => geometry,
            GeoJson::FeatureCollection(fc) => fc
                .features
                .into_iter()
                .next()
                .and_then(|f| f.geometry)
                .ok_or(Error::MissingGeometry)?,
        };

        let geometry = Geometry::<f64>::try_from(geometry.value)
            .map_err(|e| Error::InvalidGeometry(e.to_string()))?;

        Self::new(geometry)
    }

    /// The AOI geometry
    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    /// The AOI coordinate reference system
    pub fn crs(&self) -> &Crs {
        &self.crs
    }

    /// Minimum enclosing axis-aligned rectangle of the geometry.
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        let rect = self
            .geometry
            .bounding_rect()
            .ok_or(Error::MissingGeometry)?;

        BoundingBox::new(
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
            self.crs.clone(),
        )
    }
}

fn geometry_name(g: &Geometry<f64>) -> &'static str {
    match g {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AOI_FEATURE: &str = r#"{
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[-3.75, 40.38], [-3.65, 40.38], [-3.65, 40.45], [-3.75, 40.45], [-3.75, 40.38]]]
        }
    }"#;

    #[test]
    fn test_parse_feature() {
        let aoi = AreaOfInterest::from_geojson_str(AOI_FEATURE).unwrap();
        let bbox = aoi.bounding_box().unwrap();

        assert_eq!(bbox.to_array(), [-3.75, 40.38, -3.65, 40.45]);
        assert_eq!(bbox.crs, Crs::wgs84());
    }

    #[test]
    fn test_parse_bare_geometry() {
        let text = r#"{"type": "Polygon", "coordinates": [[[0,0],[2,0],[2,1],[0,1],[0,0]]]}"#;
        let aoi = AreaOfInterest::from_geojson_str(text).unwrap();
        assert_eq!(aoi.bounding_box().unwrap().to_array(), [0.0, 0.0, 2.0, 1.0]);
    }

    #[test]
    fn test_feature_without_geometry() {
        let text = r#"{"type": "Feature", "properties": {}, "geometry": null}"#;
        assert!(matches!(
            AreaOfInterest::from_geojson_str(text),
            Err(Error::MissingGeometry)
        ));
    }

    #[test]
    fn test_rejects_point() {
        let text = r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#;
        assert!(matches!(
            AreaOfInterest::from_geojson_str(text),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(AreaOfInterest::from_geojson_str("not json").is_err());
    }
}
