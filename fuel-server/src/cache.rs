//! Session-scoped cache for reference lists.
//!
//! Provinces and fuel products change rarely, so a session loads each list
//! once and keeps it until [`ReferenceCache::reload`]. A failed load stores
//! nothing, so the next request tries again. Station listings are never
//! cached: every search fetches fresh prices.

use std::sync::Arc;

use moka::future::Cache as MokaCache;
use tracing::{debug, info};

use crate::carburantes::{DataSourceError, StationSource};
use crate::domain::{FuelProduct, Region};

/// Each list is a single cache entry under the unit key.
type ListCache<T> = MokaCache<(), Arc<Vec<T>>>;

/// Lazily populated region and product lists.
#[derive(Clone)]
pub struct ReferenceCache {
    regions: ListCache<Region>,
    products: ListCache<FuelProduct>,
}

impl ReferenceCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            regions: MokaCache::builder().max_capacity(1).build(),
            products: MokaCache::builder().max_capacity(1).build(),
        }
    }

    /// Regions, loading them from `source` on first use.
    pub async fn regions<S: StationSource>(
        &self,
        source: &S,
    ) -> Result<Arc<Vec<Region>>, DataSourceError> {
        if let Some(cached) = self.regions.get(&()).await {
            return Ok(cached);
        }

        let regions = Arc::new(source.list_regions().await?);
        debug!(count = regions.len(), "loaded region list");

        // A concurrent first load may have stored a list already; keep that one.
        let entry = self.regions.entry(()).or_insert(regions).await;
        Ok(entry.into_value())
    }

    /// Fuel products, loading them from `source` on first use.
    pub async fn fuel_products<S: StationSource>(
        &self,
        source: &S,
    ) -> Result<Arc<Vec<FuelProduct>>, DataSourceError> {
        if let Some(cached) = self.products.get(&()).await {
            return Ok(cached);
        }

        let products = Arc::new(source.list_fuel_products().await?);
        debug!(count = products.len(), "loaded fuel product list");

        let entry = self.products.entry(()).or_insert(products).await;
        Ok(entry.into_value())
    }

    /// Load both lists.
    pub async fn warm<S: StationSource>(&self, source: &S) -> Result<(), DataSourceError> {
        let (regions, products) =
            futures::try_join!(self.regions(source), self.fuel_products(source))?;
        info!(
            regions = regions.len(),
            products = products.len(),
            "reference lists ready"
        );
        Ok(())
    }

    /// Drop both lists; the next access re-fetches them.
    pub fn reload(&self) {
        self.regions.invalidate_all();
        self.products.invalidate_all();
    }

    #[cfg(test)]
    pub(crate) async fn has_regions(&self) -> bool {
        self.regions.get(&()).await.is_some()
    }
}

impl Default for ReferenceCache {
    fn default() -> Self {
        Self::new()
    }
}
