//! Export of change sets to GeoJSON and zipped ESRI shapefiles.
//!
//! Two deliverables per run: a GeoJSON FeatureCollection string and an
//! in-memory zip archive holding the shapefile sidecars.

pub mod archive;
pub mod error;
pub mod geojson;
pub mod shapefile;

pub use self::archive::{
    export_shapefile_zip, write_shapefile_zip, zip_shapefile, CHANGE_LAYER_NAME,
    SHAPEFILE_EXTENSIONS,
};
pub use self::error::{ExportError, Result};
pub use self::geojson::{changeset_from_geojson_str, to_geojson_string};
pub use self::shapefile::write_shapefile;
