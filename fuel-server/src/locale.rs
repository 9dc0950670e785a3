//! Locale resolution: which province is a coordinate in?
//!
//! The fuel price API is queried per province, so every search starts by
//! reverse geocoding the origin and looking for a province name inside the
//! returned address.

use tracing::{debug, info};

use crate::cache::ReferenceCache;
use crate::carburantes::StationSource;
use crate::domain::{Coordinate, Region};
use crate::geocode::Geocoder;
use crate::search::SearchError;

/// Find the first region whose name appears in `address`.
///
/// Matching is a case-insensitive substring test, so list order decides
/// ties and a short province name can match inside a longer place name.
pub fn match_region<'r>(regions: &'r [Region], address: &str) -> Option<&'r Region> {
    regions.iter().find(|r| r.appears_in(address))
}

/// Resolves coordinates to regions using a geocoder and the region list.
pub struct LocaleResolver<'a, S: StationSource, G: Geocoder> {
    source: &'a S,
    geocoder: &'a G,
    references: &'a ReferenceCache,
}

impl<'a, S: StationSource, G: Geocoder> LocaleResolver<'a, S, G> {
    /// Create a new resolver.
    pub fn new(source: &'a S, geocoder: &'a G, references: &'a ReferenceCache) -> Self {
        Self {
            source,
            geocoder,
            references,
        }
    }

    /// Resolve the region containing `coord`.
    ///
    /// Fails with [`SearchError::RegionNotFound`] when no region name occurs
    /// in the reverse-geocoded address.
    pub async fn resolve_region(&self, coord: Coordinate) -> Result<Region, SearchError> {
        let address = self.geocoder.reverse(coord).await?;
        let regions = self.references.regions(self.source).await?;

        match match_region(&regions, &address) {
            Some(region) => {
                info!(%coord, region = %region.name, region_id = %region.id, "resolved region");
                Ok(region.clone())
            }
            None => {
                debug!(%coord, %address, "no region name found in address");
                Err(SearchError::RegionNotFound { address })
            }
        }
    }

    /// Coordinate for a typed address.
    pub async fn locate(&self, address: &str) -> Result<Coordinate, SearchError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(SearchError::InvalidCriteria(
                "address must not be empty".to_string(),
            ));
        }
        Ok(self.geocoder.forward(address).await?)
    }
}
