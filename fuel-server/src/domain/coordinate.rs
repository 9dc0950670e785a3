//! Geographic coordinate type.

use std::fmt;

use serde::Serialize;

use super::decimal::parse_decimal;

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A WGS84 point in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
/// Any `Coordinate` value is valid by construction.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::Coordinate;
///
/// let madrid = Coordinate::new(40.4168, -3.7038).unwrap();
/// assert_eq!(madrid.lat(), 40.4168);
///
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Create a coordinate, validating both components.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinate {
                reason: "components must be finite numbers",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within [-90, 90]",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within [-180, 180]",
            });
        }

        Ok(Self { lat, lng })
    }

    /// Parse a coordinate from locale-formatted strings (`"40,4168"`).
    ///
    /// Returns `None` when either component is not a number or the pair is
    /// out of range.
    pub fn parse_locale(lat: &str, lng: &str) -> Option<Self> {
        let lat = parse_decimal(lat)?;
        let lng = parse_decimal(lng)?;
        Self::new(lat, lng).ok()
    }

    /// Latitude in decimal degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.0001, 0.0).is_err());
        assert!(Coordinate::new(-91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.5).is_err());
        assert!(Coordinate::new(0.0, -181.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn parse_locale_handles_comma_decimals() {
        let c = Coordinate::parse_locale("40,420000", "-3,700000").unwrap();
        assert_eq!(c.lat(), 40.42);
        assert_eq!(c.lng(), -3.7);
    }

    #[test]
    fn parse_locale_rejects_garbage() {
        assert!(Coordinate::parse_locale("abc", "-3,7").is_none());
        assert!(Coordinate::parse_locale("40,4", "").is_none());
        assert!(Coordinate::parse_locale("140,4", "-3,7").is_none());
    }

    #[test]
    fn display_format() {
        let c = Coordinate::new(40.5, -3.25).unwrap();
        assert_eq!(c.to_string(), "40.5,-3.25");
    }
}
