//! Nominatim geocoding client.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Coordinate, parse_decimal};

use super::Geocoder;
use super::error::GeocodingError;

/// Default Nominatim endpoint.
const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying User-Agent.
const DEFAULT_USER_AGENT: &str = concat!("fuel-server/", env!("CARGO_PKG_VERSION"));

/// Province names upstream are Spanish, so addresses are requested in Spanish.
const DEFAULT_LANGUAGE: &str = "es";

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the service
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Preferred language for returned addresses
    pub language: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NominatimConfig {
    /// Create a config pointing at the public Nominatim instance.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of `/reverse?format=json`.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    error: Option<String>,
}

/// Element of `/search?format=json`.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// Nominatim HTTP client.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    language: String,
}

impl NominatimClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodingError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GeocodingError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(&[("format", "json"), ("accept-language", self.language.as_str())])
            .query(query)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GeocodingError::Json {
            message: e.to_string(),
        })
    }
}

impl Geocoder for NominatimClient {
    async fn reverse(&self, coord: Coordinate) -> Result<String, GeocodingError> {
        let response: ReverseResponse = self
            .get_json(
                "/reverse",
                &[("lat", coord.lat().to_string()), ("lon", coord.lng().to_string())],
            )
            .await?;

        match (response.display_name, response.error) {
            (Some(address), _) if !address.trim().is_empty() => {
                debug!(%coord, %address, "reverse geocoded");
                Ok(address)
            }
            _ => Err(GeocodingError::NoMatch {
                query: coord.to_string(),
            }),
        }
    }

    async fn forward(&self, address: &str) -> Result<Coordinate, GeocodingError> {
        let hits: Vec<SearchHit> = self
            .get_json("/search", &[("q", address.to_string())])
            .await?;

        let Some(first) = hits.first() else {
            return Err(GeocodingError::NoMatch {
                query: address.to_string(),
            });
        };

        let (Some(lat), Some(lng)) = (parse_decimal(&first.lat), parse_decimal(&first.lon)) else {
            return Err(GeocodingError::InvalidCoordinate {
                message: format!("{}, {}", first.lat, first.lon),
            });
        };

        let coord = Coordinate::new(lat, lng).map_err(|e| GeocodingError::InvalidCoordinate {
            message: e.to_string(),
        })?;
        debug!(address, %coord, "forward geocoded");
        Ok(coord)
    }
}
