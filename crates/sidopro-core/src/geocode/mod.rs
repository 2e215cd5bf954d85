//! Reverse-geocoding proxy.
//!
//! [`GeocodeClient::reverse`] forwards a coordinate pair to an upstream
//! reverse-geocoding service and condenses the answer into a single
//! human-readable label. One request per call, no retries and no cache.

use thiserror::Error;

mod client;
mod label;

pub use client::{GeocodeClient, GeocodeResult, DEFAULT_GEOCODE_URL, DEFAULT_LANGUAGE, DEFAULT_USER_AGENT};
pub use label::build_label;

/// Failures of a reverse-geocoding lookup.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Both lat and lon query parameters are required")]
    MissingCoordinates,

    #[error("Upstream geocoding failed with status {status}")]
    UpstreamStatus { status: u16 },

    #[error("Geocoding request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid geocoding response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GeocodeError {
    /// HTTP status the proxy answers with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            GeocodeError::MissingCoordinates => 400,
            GeocodeError::UpstreamStatus { .. } => 502,
            GeocodeError::Transport(_) | GeocodeError::Decode(_) => 500,
        }
    }
}
