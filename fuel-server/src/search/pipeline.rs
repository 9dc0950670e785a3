//! The search pipeline.
//!
//! A search resolves the origin's region, fetches that region's listing for
//! the requested fuel, and ranks the candidates. The three network-bound
//! stages run one after another; each is also callable on its own so that
//! a [`super::SearchSession`] can track progress between them.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::ReferenceCache;
use crate::carburantes::{DataSourceError, StationSource};
use crate::domain::{AnnotatedStation, Coordinate, FuelProduct, Region, StationRecord};
use crate::geocode::Geocoder;
use crate::locale::LocaleResolver;

use super::config::SearchConfig;
use super::criteria::SearchCriteria;
use super::error::SearchError;
use super::rank;

/// Fuel station search over a data source and a geocoder.
///
/// Owns the reference cache, so one `FuelSearch` corresponds to one
/// session's view of the region and product lists.
pub struct FuelSearch<S: StationSource, G: Geocoder> {
    source: S,
    geocoder: G,
    references: ReferenceCache,
    config: SearchConfig,
}

impl<S: StationSource, G: Geocoder> FuelSearch<S, G> {
    /// Create a new search with an empty reference cache.
    pub fn new(source: S, geocoder: G, config: SearchConfig) -> Self {
        Self {
            source,
            geocoder,
            references: ReferenceCache::new(),
            config,
        }
    }

    /// Search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    #[cfg(test)]
    pub(crate) fn geocoder(&self) -> &G {
        &self.geocoder
    }

    fn resolver(&self) -> LocaleResolver<'_, S, G> {
        LocaleResolver::new(&self.source, &self.geocoder, &self.references)
    }

    /// Regions known to the data source (cached).
    pub async fn regions(&self) -> Result<Arc<Vec<Region>>, DataSourceError> {
        self.references.regions(&self.source).await
    }

    /// Searchable fuel products (cached).
    pub async fn fuel_products(&self) -> Result<Arc<Vec<FuelProduct>>, DataSourceError> {
        self.references.fuel_products(&self.source).await
    }

    /// Load the reference lists ahead of the first search.
    pub async fn warm(&self) -> Result<(), DataSourceError> {
        self.references.warm(&self.source).await
    }

    /// Forget the reference lists; they are fetched again on next use.
    pub fn reload(&self) {
        info!("reloading reference lists");
        self.references.reload();
    }

    /// Coordinate of a typed address.
    pub async fn locate(&self, address: &str) -> Result<Coordinate, SearchError> {
        self.resolver().locate(address).await
    }

    /// Check `criteria`, returning the search origin.
    pub fn validate(&self, criteria: &SearchCriteria) -> Result<Coordinate, SearchError> {
        criteria.validate()
    }

    /// Region containing `origin`.
    pub async fn resolve_region(&self, origin: Coordinate) -> Result<Region, SearchError> {
        self.resolver().resolve_region(origin).await
    }

    /// Raw candidates for a region and fuel product.
    pub async fn fetch_candidates(
        &self,
        region: &Region,
        fuel_product_id: &str,
    ) -> Result<Vec<StationRecord>, SearchError> {
        let candidates = self
            .source
            .fetch_candidates(&region.id, fuel_product_id.trim())
            .await?;
        info!(
            region = %region.name,
            product = fuel_product_id,
            count = candidates.len(),
            "fetched candidate stations"
        );
        Ok(candidates)
    }

    /// Filter and order candidates.
    pub fn rank(
        &self,
        candidates: Vec<StationRecord>,
        origin: Coordinate,
        criteria: &SearchCriteria,
    ) -> Vec<AnnotatedStation> {
        let total = candidates.len();
        let ranked = rank::rank(candidates, origin, criteria);
        debug!(
            total,
            kept = ranked.len(),
            max_distance_km = criteria.max_distance_km,
            brands = ?criteria.brand_filter,
            sort = %criteria.sort_key,
            "ranked stations"
        );
        ranked
    }

    /// Run a complete search.
    ///
    /// Returns every matching station in display order. No stations is not
    /// an error. When the region cannot be resolved nothing is fetched.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<AnnotatedStation>, SearchError> {
        let origin = self.validate(criteria)?;
        let region = self.resolve_region(origin).await?;
        let candidates = self
            .fetch_candidates(&region, &criteria.fuel_product_id)
            .await?;
        Ok(self.rank(candidates, origin, criteria))
    }
}
