//! Server configuration loaded from `SIDOPRO_*` environment variables.

use std::{env, fmt::Display, net::SocketAddr, str::FromStr};

use log::{debug, info};

use crate::{
    error::{ConfigResultExt, ProgressError, Result},
    geocode::{GeocodeClient, DEFAULT_GEOCODE_URL, DEFAULT_LANGUAGE, DEFAULT_USER_AGENT},
};

pub const BIND_VAR: &str = "SIDOPRO_BIND";
pub const GEOCODE_URL_VAR: &str = "SIDOPRO_GEOCODE_URL";
pub const GEOCODE_USER_AGENT_VAR: &str = "SIDOPRO_GEOCODE_USER_AGENT";
pub const GEOCODE_LANGUAGE_VAR: &str = "SIDOPRO_GEOCODE_LANGUAGE";
pub const SESSION_SECRET_VAR: &str = "SIDOPRO_SESSION_SECRET";

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";

/// Settings of the HTTP server and its upstream geocoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub geocode_url: String,
    pub geocode_user_agent: String,
    pub geocode_language: String,
    /// Enables signed role cookies when set
    pub session_secret: Option<String>,
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Unset or blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = parse_or_default(BIND_VAR, non_blank(&lookup, BIND_VAR), DEFAULT_BIND)?;
        let geocode = GeocodeConfig::from_lookup(&lookup)?;

        Ok(Self {
            bind,
            geocode_url: geocode.url,
            geocode_user_agent: geocode.user_agent,
            geocode_language: geocode.language,
            session_secret: non_blank(&lookup, SESSION_SECRET_VAR),
        })
    }

    /// Overrides the bind address from a `host:port` string.
    pub fn with_bind(mut self, bind: Option<&str>) -> Result<Self> {
        if let Some(bind) = bind {
            self.bind = bind
                .parse()
                .config_context(&format!("Invalid bind address '{bind}'"))?;
        }
        Ok(self)
    }

    /// Overrides the upstream geocoder URL; it must be http(s).
    pub fn with_geocode_url(mut self, url: Option<String>) -> Result<Self> {
        if let Some(url) = url {
            self.geocode_url = checked_geocode_url(url)?;
        }
        Ok(self)
    }

    pub fn with_session_secret(mut self, secret: Option<String>) -> Self {
        if secret.is_some() {
            self.session_secret = secret;
        }
        self
    }

    /// Upstream geocoding client for these settings.
    pub fn geocoder(&self) -> GeocodeClient {
        GeocodeClient::new(self.geocode_url.clone())
            .with_user_agent(self.geocode_user_agent.clone())
            .with_language(self.geocode_language.clone())
    }
}

/// Upstream geocoder settings.
///
/// Loaded on their own by commands that geocode without serving, so a bad
/// server-only variable does not get in their way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeConfig {
    pub url: String,
    pub user_agent: String,
    pub language: String,
}

impl GeocodeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads only the `SIDOPRO_GEOCODE_*` variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = non_blank(&lookup, GEOCODE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_GEOCODE_URL.to_string());

        Ok(Self {
            url: checked_geocode_url(url)?,
            user_agent: non_blank(&lookup, GEOCODE_USER_AGENT_VAR)
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            language: non_blank(&lookup, GEOCODE_LANGUAGE_VAR)
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        })
    }

    pub fn with_url(mut self, url: Option<String>) -> Result<Self> {
        if let Some(url) = url {
            self.url = checked_geocode_url(url)?;
        }
        Ok(self)
    }

    pub fn client(&self) -> GeocodeClient {
        GeocodeClient::new(self.url.clone())
            .with_user_agent(self.user_agent.clone())
            .with_language(self.language.clone())
    }
}

fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn checked_geocode_url(url: String) -> Result<String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(ProgressError::Configuration {
            message: format!("{GEOCODE_URL_VAR} must be an http(s) URL, got '{url}'"),
        })
    }
}

fn parse_or_default<T>(key: &str, value: Option<String>, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = match value {
        Some(value) => {
            debug!("{key}={value}");
            value
        }
        None => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    };

    raw.parse()
        .config_context(&format!("Invalid {key} value '{raw}'"))
}
