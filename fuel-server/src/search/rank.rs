//! Filtering and ordering of candidate stations.
//!
//! Takes the raw candidates for a region and produces the final result
//! list: annotate with distance, drop what is out of range or the wrong
//! brand, then sort.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::{AnnotatedStation, Coordinate, StationRecord};

use super::criteria::{SearchCriteria, SortKey};

/// Annotate candidates with their distance from `origin`.
///
/// Records without a usable location are dropped.
pub fn annotate_candidates(
    records: Vec<StationRecord>,
    origin: Coordinate,
) -> Vec<AnnotatedStation> {
    let total = records.len();
    let annotated: Vec<AnnotatedStation> = records
        .into_iter()
        .filter_map(|record| AnnotatedStation::annotate(record, origin))
        .collect();

    let dropped = total - annotated.len();
    if dropped > 0 {
        debug!(dropped, total, "dropped stations without usable coordinates");
    }

    annotated
}

/// Keep stations no further than `max_distance_km` (inclusive).
pub fn filter_by_radius(
    stations: Vec<AnnotatedStation>,
    max_distance_km: f64,
) -> Vec<AnnotatedStation> {
    stations
        .into_iter()
        .filter(|s| s.distance_km <= max_distance_km)
        .collect()
}

/// Keep stations whose brand contains any of `terms`, ignoring case.
///
/// An empty term list keeps everything.
pub fn filter_by_brand(
    stations: Vec<AnnotatedStation>,
    terms: &[String],
) -> Vec<AnnotatedStation> {
    if terms.is_empty() {
        return stations;
    }
    stations
        .into_iter()
        .filter(|s| s.station.brand_matches_any(terms))
        .collect()
}

/// Sort stations in place.
///
/// The sort is stable: stations with equal keys keep their upstream order.
/// Stations without a price sort after every priced station.
pub fn sort_stations(stations: &mut [AnnotatedStation], key: SortKey) {
    stations.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &AnnotatedStation, b: &AnnotatedStation, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => a.station.sort_price().total_cmp(&b.station.sort_price()),
        SortKey::Distance => a.distance_km.total_cmp(&b.distance_km),
    }
}

/// Run the whole ranking pipeline over raw candidates.
pub fn rank(
    records: Vec<StationRecord>,
    origin: Coordinate,
    criteria: &SearchCriteria,
) -> Vec<AnnotatedStation> {
    let annotated = annotate_candidates(records, origin);
    let in_range = filter_by_radius(annotated, criteria.max_distance_km);
    let mut stations = filter_by_brand(in_range, &criteria.brand_filter);
    sort_stations(&mut stations, criteria.sort_key);
    stations
}
