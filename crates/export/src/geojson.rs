//! GeoJSON serialization of change sets.

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue};

use verdant_core::{ChangeSet, Crs};

use crate::error::{ExportError, Result};

/// Serialize a change set as a GeoJSON FeatureCollection string.
///
/// One feature per polygon, in extraction order, each with an integer `id`
/// property starting at 0. An empty change set produces a collection with
/// an empty `features` array, which is still valid GeoJSON.
pub fn to_geojson_string(changes: &ChangeSet) -> Result<String> {
    let features = changes
        .iter()
        .enumerate()
        .map(|(id, polygon)| {
            let mut properties = JsonObject::new();
            properties.insert("id".to_string(), JsonValue::from(id as u64));

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(polygon))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    serde_json::to_string(&collection).map_err(|e| ExportError::Geojson(e.to_string()))
}

/// Decode a FeatureCollection produced by [`to_geojson_string`] back into a
/// change set.
///
/// GeoJSON carries no CRS of its own (the interchange format is WGS84), so
/// the returned set is in WGS84. Feature order is preserved.
pub fn changeset_from_geojson_str(text: &str) -> Result<ChangeSet> {
    let parsed: GeoJson = text
        .parse()
        .map_err(|e: geojson::Error| ExportError::Geojson(e.to_string()))?;

    let GeoJson::FeatureCollection(collection) = parsed else {
        return Err(ExportError::Geojson(
            "expected a FeatureCollection".to_string(),
        ));
    };

    let mut changes = ChangeSet::new(Crs::wgs84());
    for feature in collection.features {
        let geometry = feature
            .geometry
            .ok_or_else(|| ExportError::Geojson("feature without geometry".to_string()))?;
        let polygon = geo_types::Polygon::<f64>::try_from(geometry.value)
            .map_err(|e| ExportError::Geojson(e.to_string()))?;
        changes.push(polygon);
    }

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;
    use std::convert::TryFrom;
    use verdant_core::Crs;

    fn unit_square() -> geo_types::Polygon<f64> {
        polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]
    }

    #[test]
    fn empty_changeset_is_empty_collection() {
        let changes = ChangeSet::new(Crs::wgs84());
        let json = to_geojson_string(&changes).unwrap();
        let parsed: geojson::GeoJson = json.parse().unwrap();
        match parsed {
            geojson::GeoJson::FeatureCollection(fc) => assert!(fc.features.is_empty()),
            other => panic!("expected FeatureCollection, got {other:?}"),
        }
    }

    #[test]
    fn features_carry_sequential_ids() {
        let mut changes = ChangeSet::new(Crs::wgs84());
        changes.push(unit_square());
        changes.push(unit_square());
        changes.push(unit_square());

        let json = to_geojson_string(&changes).unwrap();
        let parsed: geojson::GeoJson = json.parse().unwrap();
        let fc = FeatureCollection::try_from(parsed).unwrap();

        assert_eq!(fc.features.len(), 3);
        for (i, feature) in fc.features.iter().enumerate() {
            let id = feature.properties.as_ref().unwrap()["id"].as_u64().unwrap();
            assert_eq!(id, i as u64);
        }
    }

    #[test]
    fn geometry_round_trips() {
        let mut changes = ChangeSet::new(Crs::wgs84());
        changes.push(unit_square());
        changes.push(unit_square());

        let json = to_geojson_string(&changes).unwrap();
        let decoded = changeset_from_geojson_str(&json).unwrap();

        assert_eq!(decoded.len(), changes.len());
        assert_eq!(decoded.polygons()[0], unit_square());
        assert_eq!(decoded.crs(), changes.crs());
    }

    #[test]
    fn decode_rejects_non_collection() {
        assert!(changeset_from_geojson_str(r#"{"type":"Point","coordinates":[0,1]}"#).is_err());
        assert!(changeset_from_geojson_str("not json").is_err());
    }
}
