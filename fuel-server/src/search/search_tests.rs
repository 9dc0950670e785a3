//! End-to-end tests for the search pipeline against the mock data source.

use super::rank::test_support::station_north_of;
use super::*;
use crate::carburantes::{MockCarburantesClient, StationDto, convert_station};
use crate::domain::{Coordinate, Region};
use crate::geocode::StaticGeocoder;

fn sol() -> Coordinate {
    Coordinate::new(40.4168, -3.7038).unwrap()
}

fn km(station: &crate::domain::AnnotatedStation) -> f64 {
    (station.distance_km * 10.0).round() / 10.0
}

async fn madrid_source() -> MockCarburantesClient {
    let source = MockCarburantesClient::new();
    source
        .set_regions(vec![
            Region::new("08", "BARCELONA", "Cataluña"),
            Region::new("28", "MADRID", "Madrid"),
        ])
        .await;
    source
        .set_candidates(
            "28",
            "5",
            vec![
                station_north_of("A", "REPSOL", sol(), 5.0, "1,50"),
                station_north_of("B", "CEPSA", sol(), 40.0, "1,40"),
                station_north_of("C", "BALLENOIL", sol(), 15.0, "1,45"),
            ],
        )
        .await;
    source
}

fn madrid_search(
    source: MockCarburantesClient,
) -> FuelSearch<MockCarburantesClient, StaticGeocoder> {
    let geocoder = StaticGeocoder::with_address(
        "Puerta del Sol, Centro, Madrid, Comunidad de Madrid, 28013, España",
    );
    FuelSearch::new(source, geocoder, SearchConfig::default())
}

#[tokio::test]
async fn madrid_cheapest_within_thirty_km() {
    let search = madrid_search(madrid_source().await);
    let criteria = SearchCriteria::new("5", sol());

    let results = search.search(&criteria).await.unwrap();

    let summary: Vec<(&str, f64, Option<f64>)> = results
        .iter()
        .map(|s| (s.station.id.as_str(), km(s), s.station.price))
        .collect();
    assert_eq!(summary, vec![("C", 15.0, Some(1.45)), ("A", 5.0, Some(1.50))]);
}

#[tokio::test]
async fn madrid_nearest_first() {
    let search = madrid_search(madrid_source().await);
    let criteria = SearchCriteria::new("5", sol())
        .with_sort(SortKey::Distance)
        .with_max_distance(50.0);

    let results = search.search(&criteria).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|s| s.station.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "C", "B"]);
}

#[tokio::test]
async fn unknown_area_fetches_nothing() {
    let source = madrid_source().await;
    let search = FuelSearch::new(
        source.clone(),
        StaticGeocoder::with_address("Some Unknown Place"),
        SearchConfig::default(),
    );

    let err = search
        .search(&SearchCriteria::new("5", sol()))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::RegionNotFound { .. }));
    assert_eq!(source.candidate_calls(), 0);
}

#[tokio::test]
async fn invalid_criteria_touches_nothing() {
    let source = madrid_source().await;
    let search = madrid_search(source.clone());

    let err = search
        .search(&SearchCriteria::new(" ", sol()))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::InvalidCriteria(_)));
    assert_eq!(search.geocoder().reverse_calls(), 0);
    assert_eq!(source.candidate_calls(), 0);
}

#[tokio::test]
async fn unparsable_coordinates_are_excluded() {
    let source = madrid_source().await;
    let broken = convert_station(StationDto {
        id: "X".to_string(),
        brand: "REPSOL".to_string(),
        latitude: "abc".to_string(),
        longitude: "-3,7038".to_string(),
        price: "1,10".to_string(),
        ..StationDto::default()
    });
    let good = station_north_of("A", "REPSOL", sol(), 1.0, "1,50");
    source.set_candidates("28", "5", vec![broken, good]).await;

    let results = madrid_search(source)
        .search(&SearchCriteria::new("5", sol()))
        .await
        .unwrap();

    let ids: Vec<&str> = results.iter().map(|s| s.station.id.as_str()).collect();
    assert_eq!(ids, vec!["A"]);
}

#[tokio::test]
async fn no_stations_is_not_an_error() {
    let source = madrid_source().await;
    let results = madrid_search(source)
        .search(&SearchCriteria::new("4", sol()))
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn brand_filter_end_to_end() {
    let search = madrid_search(madrid_source().await);
    let criteria = SearchCriteria::new("5", sol())
        .with_max_distance(50.0)
        .with_brands(["cepsa", "Ballenoil"]);

    let results = search.search(&criteria).await.unwrap();
    let ids: Vec<&str> = results.iter().map(|s| s.station.id.as_str()).collect();
    assert_eq!(ids, vec!["B", "C"]);
}

#[tokio::test]
async fn regions_are_fetched_once_per_session() {
    let source = madrid_source().await;
    let search = madrid_search(source.clone());
    let criteria = SearchCriteria::new("5", sol());

    search.search(&criteria).await.unwrap();
    search.search(&criteria).await.unwrap();
    assert_eq!(source.region_calls(), 1);
    assert_eq!(source.candidate_calls(), 2);

    search.reload();
    search.search(&criteria).await.unwrap();
    assert_eq!(source.region_calls(), 2);
}

#[tokio::test]
async fn paging_through_results() {
    let source = madrid_source().await;
    let records = (0..10)
        .map(|i| station_north_of(&i.to_string(), "REPSOL", sol(), i as f64, "1,50"))
        .collect();
    source.set_candidates("28", "5", records).await;
    let search = madrid_search(source);

    let all = search
        .search(&SearchCriteria::new("5", sol()))
        .await
        .unwrap();
    let size = search.config().default_page_size;

    let first = page(&all, size, 1);
    assert_eq!(first.stations.len(), 6);
    assert!(first.has_more);

    let second = page(&all, size, 2);
    assert_eq!(second.stations.len(), 10);
    assert!(!second.has_more);
}
