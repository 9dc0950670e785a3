//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{AnnotatedStation, Coordinate, FuelProduct, Placement, Region};
use crate::search::SearchPhase;

/// Base of Google Maps search links.
const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// Query parameters of `/api/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    /// Fuel product id
    pub product: String,

    /// Origin latitude (with `lng`)
    pub lat: Option<f64>,

    /// Origin longitude (with `lat`)
    pub lng: Option<f64>,

    /// Origin as a free-text address, used when no coordinates are given
    pub address: Option<String>,

    /// Comma-separated brand terms
    pub brands: Option<String>,

    /// Radius in kilometres
    pub max_distance: Option<f64>,

    /// `price` or `distance`
    pub sort: Option<String>,

    /// 1-based cumulative page index
    pub page: Option<usize>,

    /// Stations per page
    pub page_size: Option<usize>,

    /// Client-chosen session id for last-request-wins arbitration
    pub session: Option<String>,
}

impl SearchRequest {
    /// Brand terms split on commas.
    pub fn brand_terms(&self) -> Vec<&str> {
        self.brands
            .as_deref()
            .map(|b| b.split(',').collect())
            .unwrap_or_default()
    }
}

/// Query parameters of `/api/geocode`.
#[derive(Debug, Deserialize)]
pub struct GeocodeRequest {
    /// Address to look up
    pub address: String,
}

/// Response of `/api/geocode`.
#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub lat: f64,
    pub lng: f64,
}

impl From<Coordinate> for GeocodeResponse {
    fn from(c: Coordinate) -> Self {
        Self {
            lat: c.lat(),
            lng: c.lng(),
        }
    }
}

/// A region.
#[derive(Debug, Serialize)]
pub struct RegionResult {
    pub id: String,
    pub name: String,
    pub community: String,
}

impl From<&Region> for RegionResult {
    fn from(r: &Region) -> Self {
        Self {
            id: r.id.clone(),
            name: r.name.clone(),
            community: r.parent_group_name.clone(),
        }
    }
}

/// A fuel product.
#[derive(Debug, Serialize)]
pub struct ProductResult {
    pub id: String,
    pub name: String,
    pub short_name: String,
}

impl From<&FuelProduct> for ProductResult {
    fn from(p: &FuelProduct) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            short_name: p.short_name.clone(),
        }
    }
}

/// Response of `/api/brands`.
#[derive(Debug, Serialize)]
pub struct BrandsResponse {
    pub brands: Vec<String>,
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Upstream station id
    pub id: String,

    /// Brand shown at the station
    pub brand: String,

    /// Street address
    pub address: String,

    /// Postal code
    pub postal_code: String,

    /// Town
    pub locality: String,

    /// Municipality
    pub municipality: String,

    /// Province name
    pub region: String,

    /// Opening hours as published
    pub schedule: String,

    /// `motorway` or `road`
    pub placement: Placement,

    pub lat: f64,
    pub lng: f64,

    /// Distance from the origin, kilometres
    pub distance_km: f64,

    /// Price in euros per litre, absent when unknown
    pub price: Option<f64>,

    /// Price text as published
    pub price_text: String,

    /// Google Maps link for the station
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
}

impl From<&AnnotatedStation> for StationResult {
    fn from(a: &AnnotatedStation) -> Self {
        let s = &a.station;
        Self {
            id: s.id.clone(),
            brand: s.brand.clone(),
            address: s.address.clone(),
            postal_code: s.postal_code.clone(),
            locality: s.locality.clone(),
            municipality: s.municipality.clone(),
            region: s.region_name.clone(),
            schedule: s.schedule.clone(),
            placement: s.placement(),
            lat: a.location.lat(),
            lng: a.location.lng(),
            distance_km: a.distance_km,
            price: s.price,
            price_text: s.raw_price.clone(),
            maps_url: maps_url(a),
        }
    }
}

/// Response of `/api/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Region the search ran in
    pub region: RegionResult,

    /// Number of matching stations
    pub total: usize,

    /// Whether a further page would show more
    pub has_more: bool,

    /// Page index served
    pub page: usize,

    /// Stations on pages `1..=page`
    pub stations: Vec<StationResult>,
}

/// Query parameters of `/api/session`.
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    /// Session id as passed to `/api/search`
    pub id: String,
}

/// Response of `/api/session`.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Phase of the latest search
    pub phase: SearchPhase,

    /// Failure message when the latest search failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Size of the stored result list, once a search has completed
    pub total: Option<usize>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Google Maps search link for a station.
///
/// Searches for "Gasolinera" plus the station's brand and address, pinned
/// near its coordinates so the map lands on a single result.
pub fn maps_url(station: &AnnotatedStation) -> Option<String> {
    let s = &station.station;
    let text = [
        "Gasolinera",
        s.brand.as_str(),
        s.address.as_str(),
        s.postal_code.as_str(),
        s.locality.as_str(),
        s.region_name.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.trim().is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    let query = format!("{text} @{}", station.location);
    reqwest::Url::parse_with_params(MAPS_SEARCH_URL, &[("api", "1"), ("query", query.as_str())])
        .ok()
        .map(String::from)
}
