//! Great-circle distance between coordinates.

use crate::domain::Coordinate;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometres.
///
/// Symmetric, zero for identical points and always finite and
/// non-negative for valid coordinates.
///
/// # Examples
///
/// ```
/// use fuel_server::distance::distance_km;
/// use fuel_server::domain::Coordinate;
///
/// let madrid = Coordinate::new(40.4168, -3.7038).unwrap();
/// let barcelona = Coordinate::new(41.3851, 2.1734).unwrap();
/// let d = distance_km(madrid, barcelona);
/// assert!((d - 504.0).abs() < 5.0);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lng = (b.lng() - a.lng()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h marginally outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);

    EARTH_RADIUS_KM * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}
