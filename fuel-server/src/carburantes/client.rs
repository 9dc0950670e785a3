//! Fuel price API HTTP client.
//!
//! Provides async methods for querying the Ministry's `PreciosCarburantes`
//! REST service. The service needs no authentication.

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::{FuelProduct, Region, StationRecord};

use super::convert::{StationListing, convert_listing, convert_products, convert_province};
use super::error::DataSourceError;
use super::source::StationSource;
use super::types::{ProductDto, ProvinceDto, StationListResponse};

/// Default base URL for the fuel price API.
const DEFAULT_BASE_URL: &str =
    "https://sedeaplicaciones.minetur.gob.es/ServiciosRESTCarburantes/PreciosCarburantes";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the fuel price client.
#[derive(Debug, Clone)]
pub struct CarburantesConfig {
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl CarburantesConfig {
    /// Create a config pointing at the production service.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for CarburantesConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fuel price API client.
#[derive(Debug, Clone)]
pub struct CarburantesClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CarburantesClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CarburantesConfig) -> Result<Self, DataSourceError> {
        let invalid = |message: String| DataSourceError::InvalidUrl {
            url: config.base_url.clone(),
            message,
        };
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(invalid("URL cannot carry a path".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The base URL with `segments` appended.
    ///
    /// Each segment is percent-encoded, so ids containing `/` stay a single
    /// segment and `.` or `..` cannot climb out of the endpoint.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Fetch the full candidate listing for a province and product.
    ///
    /// Unlike [`StationSource::fetch_candidates`] this keeps the upstream
    /// timestamp and result code.
    pub async fn fetch_listing(
        &self,
        region_id: &str,
        fuel_product_id: &str,
    ) -> Result<StationListing, DataSourceError> {
        let url = self.endpoint(&[
            "EstacionesTerrestres",
            "FiltroProvinciaProducto",
            region_id.trim(),
            fuel_product_id.trim(),
        ]);
        let response: StationListResponse = self.get_json(url).await?;
        let listing = convert_listing(response);

        if !listing.is_ok() {
            warn!(
                region_id,
                fuel_product_id,
                result = %listing.result,
                "fuel price API reported a non-OK result"
            );
        }

        debug!(
            region_id,
            fuel_product_id,
            count = listing.stations.len(),
            "fetched station listing"
        );

        Ok(listing)
    }

    /// GET `url` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, DataSourceError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataSourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| DataSourceError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl StationSource for CarburantesClient {
    async fn list_regions(&self) -> Result<Vec<Region>, DataSourceError> {
        let url = self.endpoint(&["Listados", "Provincias", ""]);
        let provinces: Vec<ProvinceDto> = self.get_json(url).await?;
        Ok(provinces.into_iter().map(convert_province).collect())
    }

    async fn list_fuel_products(&self) -> Result<Vec<FuelProduct>, DataSourceError> {
        let url = self.endpoint(&["Listados", "ProductosPetroliferos", ""]);
        let products: Vec<ProductDto> = self.get_json(url).await?;
        Ok(convert_products(products))
    }

    async fn fetch_candidates(
        &self,
        region_id: &str,
        fuel_product_id: &str,
    ) -> Result<Vec<StationRecord>, DataSourceError> {
        let listing = self.fetch_listing(region_id, fuel_product_id).await?;
        Ok(listing.stations)
    }
}
