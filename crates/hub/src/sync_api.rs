//! Blocking facade over the async client.
//!
//! The pipeline and CLI are synchronous; this wrapper owns a current-thread
//! runtime and drives the async client with `block_on`.

use chrono::NaiveDate;

use verdant_core::bbox::BoundingBox;
use verdant_core::raster::Raster;

use crate::client::{HubClient, HubClientOptions};
use crate::config::HubConfig;
use crate::error::{HubError, Result};
use crate::source::IndexSource;

/// Blocking hub client.
pub struct HubClientBlocking {
    rt: tokio::runtime::Runtime,
    inner: HubClient,
}

impl HubClientBlocking {
    /// Connect and authenticate, blocking until done.
    pub fn connect(config: HubConfig, options: HubClientOptions) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| HubError::Runtime(format!("building tokio runtime: {e}")))?;

        let inner = rt.block_on(HubClient::connect(config, options))?;
        Ok(Self { rt, inner })
    }

    /// Blocking version of [`HubClient::fetch_index_raster`].
    pub fn fetch_index_raster(
        &self,
        bbox: &BoundingBox,
        date: NaiveDate,
        resolution: f64,
    ) -> Result<Raster<f32>> {
        self.rt
            .block_on(self.inner.fetch_index_raster(bbox, date, resolution))
    }
}

impl IndexSource for HubClientBlocking {
    fn fetch_index(
        &mut self,
        bbox: &BoundingBox,
        date: NaiveDate,
        resolution: f64,
    ) -> Result<Raster<f32>> {
        self.fetch_index_raster(bbox, date, resolution)
    }
}
