//! Serde models for the Process API request body.
//!
//! Covers the subset of the API this pipeline uses: one bounded, single-day,
//! single-response raster request per date.

use chrono::NaiveDate;
use serde::Serialize;

use verdant_core::bbox::BoundingBox;

use crate::config::HubConfig;
use crate::evalscript::NDVI_EVALSCRIPT;

/// Body for `POST /api/v1/process`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessRequest {
    pub input: ProcessInput,
    pub output: ProcessOutput,
    pub evalscript: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessInput {
    pub bounds: Bounds,
    pub data: Vec<DataInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bounds {
    /// `[west, south, east, north]`
    pub bbox: [f64; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BoundsProperties>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoundsProperties {
    /// OGC CRS URI
    pub crs: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataInput {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(rename = "dataFilter")]
    pub data_filter: DataFilter,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataFilter {
    #[serde(rename = "timeRange")]
    pub time_range: TimeRange,
    #[serde(rename = "maxCloudCoverage", skip_serializing_if = "Option::is_none")]
    pub max_cloud_coverage: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutput {
    pub width: u32,
    pub height: u32,
    pub responses: Vec<ResponseSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseSpec {
    pub identifier: String,
    pub format: ResponseFormat,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub type_: String,
}

impl ProcessRequest {
    /// Build an NDVI request for one date.
    ///
    /// The time interval is degenerate (the given day, start of day to end
    /// of day) and the output is a single `image/tiff` response at the
    /// given pixel dimensions.
    pub fn ndvi(
        config: &HubConfig,
        bbox: &BoundingBox,
        date: NaiveDate,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            input: ProcessInput {
                bounds: Bounds {
                    bbox: bbox.to_array(),
                    properties: bbox.crs.ogc_uri().map(|crs| BoundsProperties { crs }),
                },
                data: vec![DataInput {
                    type_: config.collection.clone(),
                    data_filter: DataFilter {
                        time_range: TimeRange {
                            from: format!("{date}T00:00:00Z"),
                            to: format!("{date}T23:59:59Z"),
                        },
                        max_cloud_coverage: config.max_cloud_coverage,
                    },
                }],
            },
            output: ProcessOutput {
                width: width as u32,
                height: height as u32,
                responses: vec![ResponseSpec {
                    identifier: "default".to_string(),
                    format: ResponseFormat {
                        type_: "image/tiff".to_string(),
                    },
                }],
            },
            evalscript: NDVI_EVALSCRIPT.to_string(),
        }
    }
}
