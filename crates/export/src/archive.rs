//! Zip packaging of shapefile sidecars.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use verdant_core::ChangeSet;

use crate::error::Result;
use crate::shapefile::write_shapefile;

/// Base name of the exported change layer.
pub const CHANGE_LAYER_NAME: &str = "ndvi_change";

/// Shapefile sidecar extensions, in archive order.
pub const SHAPEFILE_EXTENSIONS: [&str; 5] = ["shp", "shx", "dbf", "cpg", "prj"];

/// Zip the sidecars of the shapefile at `shp_path` into an in-memory
/// archive.
///
/// Sidecars that do not exist (a `.prj` for a CRS without WKT, say) are
/// skipped rather than treated as errors. Entries are stored flat under
/// their base file names.
pub fn zip_shapefile(shp_path: &Path) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for ext in SHAPEFILE_EXTENSIONS {
        let sidecar = shp_path.with_extension(ext);
        if !sidecar.exists() {
            continue;
        }
        let name = sidecar
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{CHANGE_LAYER_NAME}.{ext}"));
        writer.start_file(name, options)?;
        let mut file = File::open(&sidecar)?;
        std::io::copy(&mut file, &mut writer)?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Export a change set as an in-memory zipped shapefile.
///
/// The shapefile is staged in a temporary directory that is removed when
/// this function returns, on success and on error alike.
pub fn export_shapefile_zip(changes: &ChangeSet) -> Result<Vec<u8>> {
    let staging = tempfile::tempdir()?;
    let shp_path = staging.path().join(format!("{CHANGE_LAYER_NAME}.shp"));

    write_shapefile(changes, &shp_path)?;
    let bytes = zip_shapefile(&shp_path)?;

    debug!(size = bytes.len(), "packaged shapefile archive");
    Ok(bytes)
}

/// Write a zipped shapefile export to `path`.
pub fn write_shapefile_zip(changes: &ChangeSet, path: &Path) -> Result<()> {
    let bytes = export_shapefile_zip(changes)?;
    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    Ok(())
}
