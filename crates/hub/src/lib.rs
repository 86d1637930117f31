//! Sentinel Hub Process API client for fetching NDVI rasters.
//!
//! Provides an async [`HubClient`] with a blocking wrapper
//! ([`HubClientBlocking`]) for the synchronous pipeline, plus the
//! [`IndexSource`] trait the pipeline consumes so tests can substitute
//! synthetic rasters.

mod auth;

pub mod client;
pub mod config;
pub mod dimensions;
pub mod error;
pub mod evalscript;
pub mod models;
pub mod source;
pub mod sync_api;

pub use client::{HubClient, HubClientOptions};
pub use config::HubConfig;
pub use dimensions::{bbox_to_dimensions, DEFAULT_RESOLUTION_METERS};
pub use error::{HubError, Result};
pub use evalscript::NDVI_EVALSCRIPT;
pub use source::IndexSource;
pub use sync_api::HubClientBlocking;
