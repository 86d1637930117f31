//! Hub client configuration
//!
//! Credentials and endpoints are read once at process start and injected
//! into the client; nothing in the pipeline reads them ambiently, so tests
//! can swap in a fake index source without any real configuration.

use std::env;

use crate::error::{HubError, Result};

const DEFAULT_TOKEN_URL: &str = "https://services.sentinel-hub.com/oauth/token";
const DEFAULT_PROCESS_URL: &str = "https://services.sentinel-hub.com/api/v1/process";
const DEFAULT_COLLECTION: &str = "sentinel-2-l2a";

/// Immutable process-wide configuration for the hub client.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Token endpoint for the client-credentials exchange
    pub token_url: String,
    /// Process API endpoint
    pub process_url: String,
    /// Imagery collection to request (e.g. `sentinel-2-l2a`)
    pub collection: String,
    /// Optional cloud-coverage data filter in percent (0-100)
    pub max_cloud_coverage: Option<f64>,
}

impl HubConfig {
    /// Create a config with the default Sentinel Hub endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            process_url: DEFAULT_PROCESS_URL.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            max_cloud_coverage: None,
        }
    }

    /// Load configuration from the environment.
    ///
    /// `VERDANT_CLIENT_ID` and `VERDANT_CLIENT_SECRET` are required;
    /// `VERDANT_TOKEN_URL`, `VERDANT_PROCESS_URL`, `VERDANT_COLLECTION`
    /// and `VERDANT_MAX_CLOUD_COVERAGE` override the defaults.
    pub fn from_env() -> Result<Self> {
        let client_id = require_var("VERDANT_CLIENT_ID")?;
        let client_secret = require_var("VERDANT_CLIENT_SECRET")?;

        let mut config = Self::new(client_id, client_secret);
        if let Ok(url) = env::var("VERDANT_TOKEN_URL") {
            config.token_url = url;
        }
        if let Ok(url) = env::var("VERDANT_PROCESS_URL") {
            config.process_url = url;
        }
        if let Ok(collection) = env::var("VERDANT_COLLECTION") {
            config.collection = collection;
        }
        if let Ok(cc) = env::var("VERDANT_MAX_CLOUD_COVERAGE") {
            let value: f64 = cc.parse().map_err(|_| {
                HubError::Config(format!("VERDANT_MAX_CLOUD_COVERAGE is not a number: {cc}"))
            })?;
            config.max_cloud_coverage = Some(value);
        }

        Ok(config)
    }
}

fn require_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| HubError::Config(format!("missing environment variable {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HubConfig::new("id", "secret");
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.process_url, DEFAULT_PROCESS_URL);
        assert_eq!(config.collection, "sentinel-2-l2a");
        assert!(config.max_cloud_coverage.is_none());
    }
}
