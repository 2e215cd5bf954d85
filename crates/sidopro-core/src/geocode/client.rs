use std::time::Duration;

use log::{debug, warn};
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use serde::Serialize;
use serde_json::Value;

use super::{label::build_label, GeocodeError};

pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/reverse";
pub const DEFAULT_USER_AGENT: &str = "sidopro-geocoder/0.1 (progress documentation)";
pub const DEFAULT_LANGUAGE: &str = "id";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Proxy answer: the condensed label plus the untouched upstream document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub label: String,
    pub raw: Value,
}

/// HTTP client for the upstream reverse-geocoding service.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
    language: String,
}

/// Trims a coordinate, treating blank input as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new(DEFAULT_GEOCODE_URL)
    }
}

impl GeocodeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to a default HTTP client without timeout or redirect policy: {e}");
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Looks up the place at `lat`/`lon`.
    ///
    /// The coordinates are forwarded as given; an absent or blank value is
    /// [`GeocodeError::MissingCoordinates`] and no request is made.
    pub async fn reverse(
        &self,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<GeocodeResult, GeocodeError> {
        let (Some(lat), Some(lon)) = (present(lat), present(lon)) else {
            return Err(GeocodeError::MissingCoordinates);
        };

        debug!("Reverse geocoding lat={lat} lon={lon} via {}", self.base_url);

        let response = self
            .http
            .get(&self.base_url)
            .query(&[("format", "jsonv2"), ("lat", lat), ("lon", lon)])
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT_LANGUAGE, &self.language)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream geocoder answered {status}");
            return Err(GeocodeError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let raw: Value = serde_json::from_slice(&body)?;

        Ok(GeocodeResult {
            label: build_label(&raw),
            raw,
        })
    }
}
