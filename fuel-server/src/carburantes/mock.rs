//! Mock station data source for running without the live API.
//!
//! Serves fixture regions, products and station listings from memory. The
//! fixtures can be loaded from a directory laid out as:
//!
//! ```text
//! provinces.json            -- GET /Listados/Provincias/ body
//! products.json             -- GET /Listados/ProductosPetroliferos/ body
//! stations/{region}_{product}.json
//!                           -- FiltroProvinciaProducto body
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use crate::domain::{FuelProduct, Region, StationRecord};

use super::convert::{convert_listing, convert_products, convert_province};
use super::error::DataSourceError;
use super::source::StationSource;
use super::types::{ProductDto, ProvinceDto, StationListResponse};

/// Fixture-backed station source.
///
/// Cheap to clone; clones share fixtures and counters.
#[derive(Clone, Default)]
pub struct MockCarburantesClient {
    regions: Arc<RwLock<Vec<Region>>>,
    products: Arc<RwLock<Vec<FuelProduct>>>,
    /// Listings keyed by (region id, product id).
    listings: Arc<RwLock<HashMap<(String, String), Vec<StationRecord>>>>,
    region_calls: Arc<AtomicUsize>,
    product_calls: Arc<AtomicUsize>,
    candidate_calls: Arc<AtomicUsize>,
    /// Simulated upstream latency for listing fetches.
    fetch_delay: Option<Duration>,
}

impl MockCarburantesClient {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from a directory.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, DataSourceError> {
        let data_dir = data_dir.as_ref();

        let provinces: Vec<ProvinceDto> = read_json(&data_dir.join("provinces.json"))?;
        let products: Vec<ProductDto> = read_json(&data_dir.join("products.json"))?;

        let mut listings = HashMap::new();
        let stations_dir = data_dir.join("stations");
        if stations_dir.is_dir() {
            let entries = std::fs::read_dir(&stations_dir).map_err(|e| DataSourceError::Fixture {
                message: format!("failed to read {}: {}", stations_dir.display(), e),
            })?;

            for entry in entries {
                let entry = entry.map_err(|e| DataSourceError::Fixture {
                    message: format!("failed to read directory entry: {}", e),
                })?;

                let path = entry.path();
                if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                    continue;
                }

                // "28_5.json" -> ("28", "5")
                let Some((region, product)) = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| s.split_once('_'))
                else {
                    return Err(DataSourceError::Fixture {
                        message: format!(
                            "invalid listing filename {}, expected {{region}}_{{product}}.json",
                            path.display()
                        ),
                    });
                };

                let response: StationListResponse = read_json(&path)?;
                listings.insert(
                    (region.to_string(), product.to_string()),
                    convert_listing(response).stations,
                );
            }
        }

        Ok(Self {
            regions: Arc::new(RwLock::new(
                provinces.into_iter().map(convert_province).collect(),
            )),
            products: Arc::new(RwLock::new(convert_products(products))),
            listings: Arc::new(RwLock::new(listings)),
            ..Self::default()
        })
    }

    /// Replace the region list.
    pub async fn set_regions(&self, regions: Vec<Region>) {
        *self.regions.write().await = regions;
    }

    /// Replace the product list. The allow-list is applied on read.
    pub async fn set_products(&self, products: Vec<FuelProduct>) {
        *self.products.write().await = products;
    }

    /// Set the candidate listing for a region and product.
    pub async fn set_candidates(
        &self,
        region_id: impl Into<String>,
        fuel_product_id: impl Into<String>,
        stations: Vec<StationRecord>,
    ) {
        self.listings
            .write()
            .await
            .insert((region_id.into(), fuel_product_id.into()), stations);
    }

    /// Delay every listing fetch by `delay`.
    ///
    /// Clones made afterwards share fixtures with the original but keep
    /// their own delay.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Number of `list_regions` calls served.
    pub fn region_calls(&self) -> usize {
        self.region_calls.load(Ordering::SeqCst)
    }

    /// Number of `list_fuel_products` calls served.
    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_candidates` calls served.
    pub fn candidate_calls(&self) -> usize {
        self.candidate_calls.load(Ordering::SeqCst)
    }
}

impl StationSource for MockCarburantesClient {
    async fn list_regions(&self) -> Result<Vec<Region>, DataSourceError> {
        self.region_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.regions.read().await.clone())
    }

    async fn list_fuel_products(&self) -> Result<Vec<FuelProduct>, DataSourceError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| p.is_recognised())
            .cloned()
            .collect())
    }

    async fn fetch_candidates(
        &self,
        region_id: &str,
        fuel_product_id: &str,
    ) -> Result<Vec<StationRecord>, DataSourceError> {
        self.candidate_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        let listings = self.listings.read().await;
        let key = (region_id.to_string(), fuel_product_id.to_string());
        // Upstream answers an unknown combination with an empty list.
        Ok(listings.get(&key).cloned().unwrap_or_default())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataSourceError> {
    let json = std::fs::read_to_string(path).map_err(|e| DataSourceError::Fixture {
        message: format!("failed to read {}: {}", path.display(), e),
    })?;

    serde_json::from_str(&json).map_err(|e| DataSourceError::Fixture {
        message: format!("failed to parse {}: {}", path.display(), e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn load_fixtures_from_dir() {
        let dir = tempdir().unwrap();
        write(
            &dir.path().join("provinces.json"),
            r#"[{"IDProvincia": "28", "Provincia": "MADRID", "CCAA": "Madrid"}]"#,
        );
        write(
            &dir.path().join("products.json"),
            r#"[{"IDProducto": "4", "NombreProducto": "Gasóleo A habitual", "NombreProductoAbreviatura": "GOA"},
                {"IDProducto": "17", "NombreProducto": "GLP", "NombreProductoAbreviatura": "GLP"}]"#,
        );
        write(
            &dir.path().join("stations").join("28_4.json"),
            r#"{"Fecha": "15/10/2026 10:00:00", "ListaEESSPrecio": [
                {"IDEESS": "1", "Rótulo": "BP", "Latitud": "40,42", "Longitud (WGS84)": "-3,7", "PrecioProducto": "1,459"}
            ], "Nota": "", "ResultadoConsulta": "OK"}"#,
        );

        let client = MockCarburantesClient::from_dir(dir.path()).unwrap();

        let regions = client.list_regions().await.unwrap();
        assert_eq!(regions, vec![Region::new("28", "MADRID", "Madrid")]);

        let products = client.list_fuel_products().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "4");

        let stations = client.fetch_candidates("28", "4").await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].brand, "BP");
        assert_eq!(client.candidate_calls(), 1);
    }

    #[test]
    fn missing_dir_is_fixture_error() {
        let result = MockCarburantesClient::from_dir("/nonexistent/fixtures");
        assert!(matches!(result, Err(DataSourceError::Fixture { .. })));
    }

    #[tokio::test]
    async fn bad_listing_filename_is_rejected() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("provinces.json"), "[]");
        write(&dir.path().join("products.json"), "[]");
        write(&dir.path().join("stations").join("madrid.json"), "{}");

        let result = MockCarburantesClient::from_dir(dir.path());
        assert!(matches!(result, Err(DataSourceError::Fixture { .. })));
    }

    #[tokio::test]
    async fn fetch_delay_is_per_clone() {
        let slow = MockCarburantesClient::new()
            .with_fetch_delay(Duration::from_secs(60));
        let fast = MockCarburantesClient {
            fetch_delay: None,
            ..slow.clone()
        };

        let started = tokio::time::Instant::now();
        fast.fetch_candidates("28", "1").await.unwrap();
        assert!(started.elapsed() < Duration::from_secs(60));
        assert_eq!(slow.candidate_calls(), 1);
    }

    #[tokio::test]
    async fn bundled_fixtures_load() {
        let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/data/mock");
        let mock = MockCarburantesClient::from_dir(dir).unwrap();

        let regions = mock.list_regions().await.unwrap();
        assert!(regions.iter().any(|r| r.id == "28" && r.name == "MADRID"));

        let products = mock.list_fuel_products().await.unwrap();
        assert!(products.iter().all(FuelProduct::is_recognised));

        let stations = mock.fetch_candidates("28", "1").await.unwrap();
        assert_eq!(stations.len(), 6);
        assert_eq!(stations.iter().filter(|s| s.location.is_none()).count(), 1);
        assert_eq!(stations.iter().filter(|s| s.price.is_none()).count(), 1);
    }

    #[tokio::test]
    async fn unknown_listing_is_empty() {
        let client = MockCarburantesClient::new();
        let stations = client.fetch_candidates("99", "1").await.unwrap();
        assert!(stations.is_empty());
        assert_eq!(client.candidate_calls(), 1);
    }
}
