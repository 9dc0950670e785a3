//! Fuel station records.

use serde::Serialize;

use crate::distance::distance_km;

use super::coordinate::Coordinate;
use super::decimal::parse_decimal;

/// Where a station sits relative to the carriageway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Margin code `"D"`.
    Motorway,
    /// Any other margin code.
    Road,
}

impl Placement {
    /// Classify an upstream margin code.
    pub fn from_margin_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("D") {
            Placement::Motorway
        } else {
            Placement::Road
        }
    }
}

/// A station carrying a price for one fuel product.
///
/// Built from the upstream DTO by [`crate::carburantes`]; numeric fields
/// are already parsed. `location` is `None` when the upstream coordinates
/// are unusable and `price` is `None` when the price is missing, malformed
/// or not positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    /// Upstream station id (`IDEESS`).
    pub id: String,

    /// Brand or sign shown at the station (`Rótulo`).
    pub brand: String,

    /// Street address.
    pub address: String,

    /// Postal code.
    pub postal_code: String,

    /// Locality (town).
    pub locality: String,

    /// Municipality.
    pub municipality: String,

    /// Province name.
    pub region_name: String,

    /// Free-text opening hours.
    pub schedule: String,

    /// Raw margin code (`"D"`, `"I"`, `"N"`).
    pub margin: String,

    /// Parsed station location.
    pub location: Option<Coordinate>,

    /// Parsed price in euros per litre.
    pub price: Option<f64>,

    /// The price text as delivered.
    pub raw_price: String,
}

impl StationRecord {
    /// Motorway or road placement derived from the margin code.
    pub fn placement(&self) -> Placement {
        Placement::from_margin_code(&self.margin)
    }

    /// Price used for ordering: missing prices compare as `+inf`.
    pub fn sort_price(&self) -> f64 {
        self.price.unwrap_or(f64::INFINITY)
    }

    /// Whether the brand contains any of `terms`, ignoring case.
    pub fn brand_matches_any(&self, terms: &[String]) -> bool {
        let brand = self.brand.to_lowercase();
        terms
            .iter()
            .any(|term| brand.contains(term.to_lowercase().as_str()))
    }
}

/// Parse a product price. Zero and negative values count as missing.
pub fn parse_price(raw: &str) -> Option<f64> {
    parse_decimal(raw).filter(|p| *p > 0.0)
}

/// A station with its distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedStation {
    /// The underlying record.
    pub station: StationRecord,

    /// The station's location.
    pub location: Coordinate,

    /// Great-circle distance from the origin in kilometres.
    pub distance_km: f64,
}

impl AnnotatedStation {
    /// Annotate a record with its distance from `origin`.
    ///
    /// Returns `None` for records without a usable location.
    pub fn annotate(station: StationRecord, origin: Coordinate) -> Option<Self> {
        let location = station.location?;
        Some(Self {
            distance_km: distance_km(origin, location),
            location,
            station,
        })
    }
}
