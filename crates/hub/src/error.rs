//! Error types for the imagery hub client.

use thiserror::Error;

/// Errors produced by the hub client.
#[derive(Error, Debug)]
pub enum HubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned HTTP {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("provider returned a {actual_rows}x{actual_cols} raster, requested {expected_rows}x{expected_cols}")]
    UnexpectedShape {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    #[error("invalid resolution: {value} (must be positive and finite)")]
    InvalidResolution { value: f64 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("runtime error: {0}")]
    Runtime(String),

    #[error("core error: {0}")]
    Core(#[from] verdant_core::Error),
}

/// Result alias for hub operations.
pub type Result<T> = std::result::Result<T, HubError>;
