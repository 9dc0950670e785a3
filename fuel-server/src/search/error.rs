//! Error types for fuel station search.

use thiserror::Error;

use crate::carburantes::DataSourceError;
use crate::geocode::GeocodingError;

/// Error from a search or one of its stages.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request is malformed.
    #[error("invalid search criteria: {0}")]
    InvalidCriteria(String),

    /// No known region name occurs in the origin's address.
    #[error("no region found in address {address:?}")]
    RegionNotFound { address: String },

    /// The station data source failed.
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// The geocoder failed.
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),
}
