//! Search criteria.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, is_recognised_product};

use super::error::SearchError;

/// Radius used when none is given (kilometres).
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 30.0;

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Cheapest first; stations without a price last.
    #[default]
    Price,
    /// Nearest first.
    Distance,
}

impl FromStr for SortKey {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "distance" => Ok(SortKey::Distance),
            other => Err(SearchError::InvalidCriteria(format!(
                "unknown sort key {other:?}, expected \"price\" or \"distance\""
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Price => write!(f, "price"),
            SortKey::Distance => write!(f, "distance"),
        }
    }
}

/// One search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    /// Upstream fuel product id.
    pub fuel_product_id: String,

    /// Where the user is.
    pub origin: Option<Coordinate>,

    /// Brand terms, matched case-insensitively; empty means no brand filter.
    pub brand_filter: Vec<String>,

    /// Inclusive radius in kilometres.
    pub max_distance_km: f64,

    /// Result ordering.
    pub sort_key: SortKey,
}

impl SearchCriteria {
    /// Criteria with the default radius, price ordering and no brand filter.
    pub fn new(fuel_product_id: impl Into<String>, origin: Coordinate) -> Self {
        Self {
            fuel_product_id: fuel_product_id.into(),
            origin: Some(origin),
            brand_filter: Vec::new(),
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            sort_key: SortKey::default(),
        }
    }

    /// Restrict to brands containing any of `brands`.
    ///
    /// Terms are trimmed and lowercased; blank terms are dropped.
    pub fn with_brands<I, B>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<str>,
    {
        self.brand_filter = normalise_brands(brands);
        self
    }

    /// Set the radius.
    pub fn with_max_distance(mut self, km: f64) -> Self {
        self.max_distance_km = km;
        self
    }

    /// Set the ordering.
    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Check the criteria and return the origin.
    pub fn validate(&self) -> Result<Coordinate, SearchError> {
        if self.fuel_product_id.trim().is_empty() {
            return Err(SearchError::InvalidCriteria(
                "fuel product id must not be empty".to_string(),
            ));
        }
        if !is_recognised_product(self.fuel_product_id.trim()) {
            return Err(SearchError::InvalidCriteria(format!(
                "unknown fuel product {:?}",
                self.fuel_product_id
            )));
        }

        // Range checks happen when the coordinate is built.
        let origin = self.origin.ok_or_else(|| {
            SearchError::InvalidCriteria("search origin is required".to_string())
        })?;

        if self.max_distance_km.is_nan() || self.max_distance_km < 0.0 {
            return Err(SearchError::InvalidCriteria(format!(
                "max distance must be a non-negative number, got {}",
                self.max_distance_km
            )));
        }

        Ok(origin)
    }
}

/// Trim and lowercase brand terms, dropping blanks.
pub fn normalise_brands<I, B>(brands: I) -> Vec<String>
where
    I: IntoIterator<Item = B>,
    B: AsRef<str>,
{
    brands
        .into_iter()
        .map(|b| b.as_ref().trim().to_lowercase())
        .filter(|b| !b.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn madrid() -> Coordinate {
        Coordinate::new(40.4168, -3.7038).unwrap()
    }

    #[test]
    fn defaults() {
        let criteria = SearchCriteria::new("1", madrid());
        assert_eq!(criteria.max_distance_km, 30.0);
        assert_eq!(criteria.sort_key, SortKey::Price);
        assert!(criteria.brand_filter.is_empty());
        assert_eq!(criteria.validate().unwrap(), madrid());
    }

    #[test]
    fn brands_are_normalised() {
        let criteria = SearchCriteria::new("1", madrid())
            .with_brands([" Repsol ", "", "BALLENOIL"]);
        assert_eq!(criteria.brand_filter, vec!["repsol", "ballenoil"]);
    }

    #[test]
    fn blank_product_is_rejected() {
        let criteria = SearchCriteria::new("  ", madrid());
        assert!(matches!(
            criteria.validate(),
            Err(SearchError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn unknown_product_is_rejected() {
        for id in ["2", "17", "1/../../Listados/Provincias", ".."] {
            let criteria = SearchCriteria::new(id, madrid());
            assert!(
                matches!(criteria.validate(), Err(SearchError::InvalidCriteria(_))),
                "{id} should be rejected"
            );
        }
        assert!(SearchCriteria::new(" 5 ", madrid()).validate().is_ok());
    }

    #[test]
    fn missing_origin_is_rejected() {
        let mut criteria = SearchCriteria::new("1", madrid());
        criteria.origin = None;
        assert!(matches!(
            criteria.validate(),
            Err(SearchError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn bad_radius_is_rejected() {
        for km in [-1.0, f64::NAN] {
            let criteria = SearchCriteria::new("1", madrid()).with_max_distance(km);
            assert!(criteria.validate().is_err(), "{km} should be rejected");
        }
        let criteria = SearchCriteria::new("1", madrid()).with_max_distance(0.0);
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!("Distance".parse::<SortKey>().unwrap(), SortKey::Distance);
        assert!("name".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Distance.to_string(), "distance");
    }
}
