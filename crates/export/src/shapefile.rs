//! ESRI shapefile output.

use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Polygon as ShpPolygon, PolygonRing};
use tracing::debug;

use verdant_core::ChangeSet;

use crate::error::{ExportError, Result};

/// Write a change set as a shapefile at `shp_path` (which must end in
/// `.shp`), plus the `.cpg` and, when the CRS has a well-known WKT, the
/// `.prj` sidecar. The `.shx` and `.dbf` files are written by the
/// shapefile writer itself.
///
/// Each polygon becomes one record with a numeric `id` attribute matching
/// its extraction order.
pub fn write_shapefile(changes: &ChangeSet, shp_path: &Path) -> Result<()> {
    let id_field =
        FieldName::try_from("id").map_err(|e| ExportError::Shapefile(format!("{e:?}")))?;
    let table = TableWriterBuilder::new().add_numeric_field(id_field, 10, 0);

    let mut writer = shapefile::Writer::from_path(shp_path, table)
        .map_err(|e| ExportError::Shapefile(e.to_string()))?;

    for (id, polygon) in changes.iter().enumerate() {
        let shape = to_shp_polygon(polygon);
        let mut record = Record::default();
        record.insert("id".to_string(), FieldValue::Numeric(Some(id as f64)));
        writer
            .write_shape_and_record(&shape, &record)
            .map_err(|e| ExportError::Shapefile(e.to_string()))?;
    }

    // Sidecars the writer does not produce.
    fs::write(shp_path.with_extension("cpg"), "UTF-8")?;
    if let Some(wkt) = changes.crs().well_known_wkt() {
        fs::write(shp_path.with_extension("prj"), wkt)?;
    }

    debug!(path = %shp_path.display(), polygons = changes.len(), "wrote shapefile");
    Ok(())
}

/// Convert a geo polygon into a shapefile polygon.
///
/// The shapefile writer reorders ring windings to the format's convention,
/// so rings are passed through in whatever winding they arrive in.
fn to_shp_polygon(polygon: &geo_types::Polygon<f64>) -> ShpPolygon {
    let mut rings = Vec::with_capacity(1 + polygon.interiors().len());
    rings.push(PolygonRing::Outer(ring_points(polygon.exterior())));
    for interior in polygon.interiors() {
        rings.push(PolygonRing::Inner(ring_points(interior)));
    }
    ShpPolygon::with_rings(rings)
}

fn ring_points(ring: &geo_types::LineString<f64>) -> Vec<Point> {
    ring.coords().map(|c| Point::new(c.x, c.y)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;
    use verdant_core::Crs;

    fn sample_changes(crs: Crs) -> ChangeSet {
        let mut changes = ChangeSet::new(crs);
        changes.push(polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 2.0),
            (x: 0.0, y: 2.0),
            (x: 0.0, y: 0.0),
        ]);
        changes
    }

    #[test]
    fn writes_expected_sidecars() {
        let dir = tempfile::tempdir().unwrap();
        let shp = dir.path().join("changes.shp");
        write_shapefile(&sample_changes(Crs::wgs84()), &shp).unwrap();

        for ext in ["shp", "shx", "dbf", "cpg", "prj"] {
            assert!(shp.with_extension(ext).exists(), "missing .{ext}");
        }
        assert_eq!(fs::read_to_string(shp.with_extension("cpg")).unwrap(), "UTF-8");
        assert!(fs::read_to_string(shp.with_extension("prj"))
            .unwrap()
            .contains("WGS 84"));
    }

    #[test]
    fn prj_omitted_for_unknown_crs() {
        let dir = tempfile::tempdir().unwrap();
        let shp = dir.path().join("changes.shp");
        write_shapefile(&sample_changes(Crs::from_epsg(32630)), &shp).unwrap();

        assert!(shp.exists());
        assert!(!shp.with_extension("prj").exists());
    }

    #[test]
    fn written_polygons_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let shp = dir.path().join("changes.shp");
        write_shapefile(&sample_changes(Crs::wgs84()), &shp).unwrap();

        let shapes = shapefile::read_shapes(&shp).unwrap();
        assert_eq!(shapes.len(), 1);
    }
}
