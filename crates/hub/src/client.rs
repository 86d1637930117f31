//! Async Process API client.

use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info};

use verdant_core::bbox::BoundingBox;
use verdant_core::io::read_geotiff_from_buffer;
use verdant_core::raster::{GeoTransform, Raster};

use crate::config::HubConfig;
use crate::dimensions::bbox_to_dimensions;
use crate::error::{HubError, Result};
use crate::models::ProcessRequest;

/// Options controlling client behaviour.
#[derive(Debug, Clone)]
pub struct HubClientOptions {
    /// Timeout applied to each HTTP request.
    pub request_timeout: Duration,
}

impl Default for HubClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Authenticated client for fetching index rasters.
///
/// Authentication happens once in [`HubClient::connect`]; each
/// [`fetch_index_raster`](HubClient::fetch_index_raster) call is a single
/// request with no retry, so a provider failure surfaces immediately as a
/// terminal error for the run.
pub struct HubClient {
    client: reqwest::Client,
    config: HubConfig,
    token: String,
}

impl HubClient {
    /// Build an HTTP client and perform the token exchange.
    pub async fn connect(config: HubConfig, options: HubClientOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .build()?;

        let token = crate::auth::fetch_access_token(&client, &config).await?;
        info!(process_url = %config.process_url, "connected to imagery provider");

        Ok(Self {
            client,
            config,
            token,
        })
    }

    /// Fetch the NDVI raster for one date over the given bounding box.
    ///
    /// The returned raster carries a geotransform derived from the bbox and
    /// the computed pixel dimensions, the bbox CRS, and NaN nodata. Both
    /// rasters of a run are fetched with the same bbox and resolution, so
    /// their shapes and transforms agree by construction.
    pub async fn fetch_index_raster(
        &self,
        bbox: &BoundingBox,
        date: NaiveDate,
        resolution: f64,
    ) -> Result<Raster<f32>> {
        let (width, height) = bbox_to_dimensions(bbox, resolution)?;
        debug!(%date, width, height, "requesting index raster");

        let request = ProcessRequest::ndvi(&self.config, bbox, date, width, height);

        let resp = self
            .client
            .post(&self.config.process_url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "image/tiff")
            .json(&request)
            .send()
            .await
            .map_err(|e| HubError::Network(format!("process request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(500)
                .collect();
            return Err(HubError::Provider { status, message });
        }

        let bytes = resp.bytes().await?;
        let mut raster: Raster<f32> = read_geotiff_from_buffer(&bytes)?;

        if raster.rows() != height || raster.cols() != width {
            return Err(HubError::UnexpectedShape {
                expected_rows: height,
                expected_cols: width,
                actual_rows: raster.rows(),
                actual_cols: raster.cols(),
            });
        }

        raster.set_transform(GeoTransform::from_bounds(bbox, width, height)?);
        raster.set_crs(Some(bbox.crs.clone()));
        raster.set_nodata(Some(f32::NAN));

        debug!(%date, "fetched index raster");
        Ok(raster)
    }
}
