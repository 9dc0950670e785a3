//! In-memory geocoder for tests and offline development.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::Coordinate;

use super::Geocoder;
use super::error::GeocodingError;

/// Geocoder answering from fixed tables.
///
/// Reverse lookups return the configured fallback address for any coordinate
/// unless a specific answer was registered. Forward lookups match the address
/// exactly, ignoring case.
#[derive(Clone, Default)]
pub struct StaticGeocoder {
    fallback_address: Option<String>,
    addresses: HashMap<String, String>,
    places: HashMap<String, Coordinate>,
    reverse_calls: Arc<AtomicUsize>,
}

impl StaticGeocoder {
    /// A geocoder that answers every reverse lookup with `address`.
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            fallback_address: Some(address.into()),
            ..Self::default()
        }
    }

    /// A geocoder that knows nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register the address returned for `coord`.
    pub fn address_at(mut self, coord: Coordinate, address: impl Into<String>) -> Self {
        self.addresses.insert(coord.to_string(), address.into());
        self
    }

    /// Register a forward lookup.
    pub fn place(mut self, address: &str, coord: Coordinate) -> Self {
        self.places.insert(address.trim().to_lowercase(), coord);
        self
    }

    /// Number of reverse lookups served.
    pub fn reverse_calls(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for StaticGeocoder {
    async fn reverse(&self, coord: Coordinate) -> Result<String, GeocodingError> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        self.addresses
            .get(&coord.to_string())
            .or(self.fallback_address.as_ref())
            .cloned()
            .ok_or_else(|| GeocodingError::NoMatch {
                query: coord.to_string(),
            })
    }

    async fn forward(&self, address: &str) -> Result<Coordinate, GeocodingError> {
        self.places
            .get(&address.trim().to_lowercase())
            .copied()
            .ok_or_else(|| GeocodingError::NoMatch {
                query: address.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reverse_prefers_specific_answer() {
        let sol = Coordinate::new(40.4168, -3.7038).unwrap();
        let geocoder = StaticGeocoder::with_address("Somewhere")
            .address_at(sol, "Puerta del Sol, Madrid");

        assert_eq!(geocoder.reverse(sol).await.unwrap(), "Puerta del Sol, Madrid");
        let other = Coordinate::new(41.0, 2.0).unwrap();
        assert_eq!(geocoder.reverse(other).await.unwrap(), "Somewhere");
        assert_eq!(geocoder.reverse_calls(), 2);
    }

    #[tokio::test]
    async fn empty_geocoder_finds_nothing() {
        let geocoder = StaticGeocoder::empty();
        let coord = Coordinate::new(0.0, 0.0).unwrap();
        assert!(geocoder.reverse(coord).await.unwrap_err().is_no_match());
        assert!(geocoder.forward("Madrid").await.unwrap_err().is_no_match());
    }

    #[tokio::test]
    async fn forward_ignores_case() {
        let sol = Coordinate::new(40.4168, -3.7038).unwrap();
        let geocoder = StaticGeocoder::empty().place("Puerta del Sol", sol);
        assert_eq!(geocoder.forward("puerta del sol").await.unwrap(), sol);
    }

    #[tokio::test]
    async fn registered_place_is_trimmed() {
        let sol = Coordinate::new(40.4168, -3.7038).unwrap();
        let geocoder = StaticGeocoder::empty().place("  Puerta del Sol ", sol);
        assert_eq!(geocoder.forward("Puerta del Sol").await.unwrap(), sol);
        assert_eq!(geocoder.forward(" puerta del sol  ").await.unwrap(), sol);
    }
}
