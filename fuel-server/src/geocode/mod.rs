//! Geocoding: translating between coordinates and free-text addresses.
//!
//! The locale resolver needs a reverse lookup (coordinate → address) to find
//! the user's province; typed locations need a forward lookup
//! (address → coordinate). The live implementation talks to Nominatim.

mod client;
mod error;
mod mock;

use std::future::Future;

use crate::domain::Coordinate;

pub use client::{NominatimClient, NominatimConfig};
pub use error::GeocodingError;
pub use mock::StaticGeocoder;

/// Address ↔ coordinate lookups.
pub trait Geocoder: Send + Sync {
    /// Free-text address for a coordinate.
    fn reverse(&self, coord: Coordinate)
    -> impl Future<Output = Result<String, GeocodingError>> + Send;

    /// Coordinate of the best match for a free-text address.
    fn forward(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Coordinate, GeocodingError>> + Send;
}
