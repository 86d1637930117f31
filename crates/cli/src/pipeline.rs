//! The change-detection pipeline.
//!
//! Fetch, difference, normalize, threshold, polygonize. Inputs are captured
//! in an immutable snapshot before the run starts, so a run is a pure
//! function of its inputs and the rasters the source returns.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use verdant_algorithms::{
    difference, normalize, polygonize, threshold, Connectivity, PolygonizeParams, ThresholdParams,
};
use verdant_core::bbox::BoundingBox;
use verdant_core::raster::Raster;
use verdant_core::ChangeSet;
use verdant_hub::IndexSource;

/// Immutable inputs for one change-detection run.
#[derive(Debug, Clone)]
pub struct ChangeDetectionInputs {
    /// Bounding box both rasters are requested over
    pub bbox: BoundingBox,
    /// Acquisition date of the "before" raster
    pub date_before: NaiveDate,
    /// Acquisition date of the "after" raster
    pub date_after: NaiveDate,
    /// Absolute NDVI difference above which a pixel counts as changed
    pub threshold: f64,
    /// Request resolution in metres per pixel
    pub resolution: f64,
    /// Pixel connectivity for region extraction
    pub connectivity: Connectivity,
}

/// Everything a run produces.
pub struct ChangeDetectionOutputs {
    /// Raw NDVI difference (after minus before)
    pub diff: Raster<f32>,
    /// Difference rescaled to [0, 1] for previews
    pub normalized: Raster<f32>,
    /// Binary change mask
    pub mask: Raster<u8>,
    /// Change polygons in the bbox CRS
    pub changes: ChangeSet,
}

/// Run the full pipeline against an index source.
pub fn detect_changes(
    source: &mut dyn IndexSource,
    inputs: &ChangeDetectionInputs,
) -> Result<ChangeDetectionOutputs> {
    info!(
        before = %inputs.date_before,
        after = %inputs.date_after,
        threshold = inputs.threshold,
        "starting change detection"
    );

    let before = source
        .fetch_index(&inputs.bbox, inputs.date_before, inputs.resolution)
        .with_context(|| format!("fetching NDVI for {}", inputs.date_before))?;
    let after = source
        .fetch_index(&inputs.bbox, inputs.date_after, inputs.resolution)
        .with_context(|| format!("fetching NDVI for {}", inputs.date_after))?;

    let diff = difference(&before, &after).context("computing NDVI difference")?;
    let normalized = normalize(&diff);

    let mask = threshold(
        &diff,
        &ThresholdParams {
            threshold: inputs.threshold,
        },
    )
    .context("thresholding NDVI difference")?;

    let changes = polygonize(
        &mask,
        &PolygonizeParams {
            connectivity: inputs.connectivity,
        },
    )
    .context("extracting change polygons")?;

    info!(regions = changes.len(), "change detection finished");

    Ok(ChangeDetectionOutputs {
        diff,
        normalized,
        mask,
        changes,
    })
}
