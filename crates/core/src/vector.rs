//! Vector change-set types

use geo_types::Polygon;

use crate::crs::Crs;

/// An ordered collection of change polygons in a single CRS.
///
/// One polygon per connected region of flagged mask pixels. Insertion order
/// is extraction order (raster scan order) and carries no meaning beyond
/// reproducibility.
#[derive(Debug, Clone)]
pub struct ChangeSet {
    polygons: Vec<Polygon<f64>>,
    crs: Crs,
}

impl ChangeSet {
    /// Create an empty change set in the given CRS
    pub fn new(crs: Crs) -> Self {
        Self {
            polygons: Vec::new(),
            crs,
        }
    }

    /// Append a polygon
    pub fn push(&mut self, polygon: Polygon<f64>) {
        self.polygons.push(polygon);
    }

    /// Number of change regions
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    /// Whether no change regions were detected
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// The polygons, in extraction order
    pub fn polygons(&self) -> &[Polygon<f64>] {
        &self.polygons
    }

    /// Iterate over the polygons
    pub fn iter(&self) -> impl Iterator<Item = &Polygon<f64>> {
        self.polygons.iter()
    }

    /// The CRS all polygons are expressed in
    pub fn crs(&self) -> &Crs {
        &self.crs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn test_insertion_order() {
        let mut set = ChangeSet::new(Crs::wgs84());
        assert!(set.is_empty());

        let a = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)];
        let b = polygon![(x: 5.0, y: 5.0), (x: 6.0, y: 5.0), (x: 6.0, y: 6.0), (x: 5.0, y: 5.0)];

        set.push(a.clone());
        set.push(b.clone());

        assert_eq!(set.len(), 2);
        assert_eq!(set.polygons()[0], a);
        assert_eq!(set.polygons()[1], b);
    }
}
