//! Error types for export operations.

use thiserror::Error;

/// Errors produced while exporting change sets.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    Geojson(String),

    #[error("shapefile error: {0}")]
    Shapefile(String),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Result alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
