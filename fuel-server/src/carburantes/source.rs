//! The station data source abstraction.

use std::future::Future;

use crate::domain::{FuelProduct, Region, StationRecord};

use super::error::DataSourceError;

/// Read-only access to station and reference data.
///
/// This abstraction allows the search pipeline to be tested with fixture data.
/// Every call is one-shot: implementations do not retry.
pub trait StationSource: Send + Sync {
    /// All provinces, in upstream order.
    fn list_regions(&self) -> impl Future<Output = Result<Vec<Region>, DataSourceError>> + Send;

    /// Fuel products, restricted to the recognised allow-list.
    fn list_fuel_products(
        &self,
    ) -> impl Future<Output = Result<Vec<FuelProduct>, DataSourceError>> + Send;

    /// Stations in `region_id` carrying a price for `fuel_product_id`.
    fn fetch_candidates(
        &self,
        region_id: &str,
        fuel_product_id: &str,
    ) -> impl Future<Output = Result<Vec<StationRecord>, DataSourceError>> + Send;
}
