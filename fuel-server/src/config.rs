//! Application configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::carburantes::CarburantesConfig;
use crate::geocode::NominatimConfig;

/// Error reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be used.
    #[error("invalid value {value:?} for {var}: {message}")]
    InvalidValue {
        var: &'static str,
        value: String,
        message: String,
    },
}

/// Server configuration.
///
/// | Variable | Default |
/// |---|---|
/// | `FUEL_API_BASE_URL` | the Ministry's production endpoint |
/// | `GEOCODER_BASE_URL` | `https://nominatim.openstreetmap.org` |
/// | `GEOCODER_USER_AGENT` | `fuel-server/<version>` |
/// | `HTTP_TIMEOUT_SECS` | `30` |
/// | `BIND_ADDR` | `127.0.0.1:3000` |
/// | `FUEL_MOCK_DATA` | unset (live data source) |
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Fuel price API client settings.
    pub carburantes: CarburantesConfig,

    /// Geocoder client settings.
    pub geocoder: NominatimConfig,

    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// Fixture directory; when set the mock data source is used.
    pub mock_data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout_secs = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                ConfigError::InvalidValue {
                    var: "HTTP_TIMEOUT_SECS",
                    value: raw.clone(),
                    message: "expected a positive number of seconds".to_string(),
                }
            })?,
            None => 30,
        };

        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidValue {
                    var: "BIND_ADDR",
                    value: raw.clone(),
                    message: e.to_string(),
                }
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3000)),
        };

        let mut carburantes = CarburantesConfig::new().with_timeout(timeout_secs);
        if let Some(url) = get("FUEL_API_BASE_URL") {
            carburantes = carburantes.with_base_url(url);
        }

        let mut geocoder = NominatimConfig::new().with_timeout(timeout_secs);
        if let Some(url) = get("GEOCODER_BASE_URL") {
            geocoder = geocoder.with_base_url(url);
        }
        if let Some(agent) = get("GEOCODER_USER_AGENT") {
            geocoder = geocoder.with_user_agent(agent);
        }

        Ok(Self {
            carburantes,
            geocoder,
            bind_addr,
            mock_data_dir: get("FUEL_MOCK_DATA").map(PathBuf::from),
        })
    }
}
