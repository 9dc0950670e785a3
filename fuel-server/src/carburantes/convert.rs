//! Conversion from fuel price API DTOs to domain types.
//!
//! Conversion never fails: unparseable coordinates or prices become `None`
//! on the record and are dealt with by the search pipeline.

use chrono::NaiveDateTime;

use crate::domain::{Coordinate, FuelProduct, Region, StationRecord, parse_price};

use super::types::{ProductDto, ProvinceDto, StationDto, StationListResponse};

/// Timestamp format of the `Fecha` field.
const PUBLISHED_AT_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// A parsed candidate listing for one province and product.
#[derive(Debug, Clone)]
pub struct StationListing {
    /// When upstream published these prices, if the timestamp was well-formed.
    pub published_at: Option<NaiveDateTime>,

    /// Upstream note.
    pub note: String,

    /// Upstream result code (`"OK"` on success).
    pub result: String,

    /// Stations in upstream order.
    pub stations: Vec<StationRecord>,
}

impl StationListing {
    /// Whether upstream reported success.
    pub fn is_ok(&self) -> bool {
        self.result.trim().eq_ignore_ascii_case("OK")
    }
}

/// Convert a province entry.
pub fn convert_province(dto: ProvinceDto) -> Region {
    Region::new(dto.id, dto.name, dto.community)
}

/// Convert the product catalogue, keeping only recognised products.
pub fn convert_products(dtos: Vec<ProductDto>) -> Vec<FuelProduct> {
    dtos.into_iter()
        .map(|p| FuelProduct::new(p.id, p.name, p.short_name))
        .filter(FuelProduct::is_recognised)
        .collect()
}

/// Convert one station entry.
pub fn convert_station(dto: StationDto) -> StationRecord {
    let location = Coordinate::parse_locale(&dto.latitude, &dto.longitude);
    let price = parse_price(&dto.price);

    StationRecord {
        id: dto.id,
        brand: dto.brand.trim().to_string(),
        address: dto.address,
        postal_code: dto.postal_code,
        locality: dto.locality,
        municipality: dto.municipality,
        region_name: dto.province,
        schedule: dto.schedule,
        margin: dto.margin,
        location,
        price,
        raw_price: dto.price,
    }
}

/// Convert a full listing response.
pub fn convert_listing(response: StationListResponse) -> StationListing {
    let published_at =
        NaiveDateTime::parse_from_str(response.published_at.trim(), PUBLISHED_AT_FORMAT).ok();

    StationListing {
        published_at,
        note: response.note,
        result: response.result,
        stations: response
            .stations
            .into_iter()
            .map(convert_station)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn dto(lat: &str, lng: &str, price: &str) -> StationDto {
        StationDto {
            id: "12054".to_string(),
            brand: " REPSOL ".to_string(),
            address: "CALLE GRAN VÍA, 123".to_string(),
            postal_code: "28001".to_string(),
            locality: "MADRID".to_string(),
            municipality: "Madrid".to_string(),
            province: "MADRID".to_string(),
            schedule: "L-D: 06:00-22:00".to_string(),
            margin: "I".to_string(),
            latitude: lat.to_string(),
            longitude: lng.to_string(),
            price: price.to_string(),
        }
    }

    #[test]
    fn converts_valid_station() {
        let record = convert_station(dto("40,420000", "-3,700000", "1,479"));
        let location = record.location.unwrap();
        assert_eq!(location.lat(), 40.42);
        assert_eq!(location.lng(), -3.7);
        assert_eq!(record.price, Some(1.479));
        assert_eq!(record.raw_price, "1,479");
        assert_eq!(record.brand, "REPSOL");
        assert_eq!(record.region_name, "MADRID");
    }

    #[test]
    fn bad_coordinates_become_none() {
        let record = convert_station(dto("abc", "-3,700000", "1,479"));
        assert!(record.location.is_none());
        assert_eq!(record.price, Some(1.479));
    }

    #[test]
    fn bad_price_becomes_none() {
        let record = convert_station(dto("40,42", "-3,7", ""));
        assert!(record.location.is_some());
        assert!(record.price.is_none());
    }

    #[test]
    fn filters_unrecognised_products() {
        let products = convert_products(vec![
            ProductDto {
                id: "1".to_string(),
                name: "Gasolina 95 E5".to_string(),
                short_name: "G95E5".to_string(),
            },
            ProductDto {
                id: "17".to_string(),
                name: "Gases licuados del petróleo".to_string(),
                short_name: "GLP".to_string(),
            },
            ProductDto {
                id: "4".to_string(),
                name: "Gasóleo A habitual".to_string(),
                short_name: "GOA".to_string(),
            },
        ]);

        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn listing_timestamp_parsed() {
        let listing = convert_listing(StationListResponse {
            published_at: "15/10/2026 10:23:45".to_string(),
            stations: vec![dto("40,42", "-3,7", "1,5")],
            note: String::new(),
            result: "OK".to_string(),
        });

        let ts = listing.published_at.unwrap();
        assert_eq!(ts.year(), 2026);
        assert_eq!(ts.month(), 10);
        assert_eq!(ts.hour(), 10);
        assert!(listing.is_ok());
        assert_eq!(listing.stations.len(), 1);
    }

    #[test]
    fn malformed_timestamp_is_tolerated() {
        let listing = convert_listing(StationListResponse {
            published_at: "yesterday".to_string(),
            stations: Vec::new(),
            note: String::new(),
            result: "Error".to_string(),
        });
        assert!(listing.published_at.is_none());
        assert!(!listing.is_ok());
    }

    #[test]
    fn province_conversion() {
        let region = convert_province(ProvinceDto {
            id: "28".to_string(),
            name: "MADRID".to_string(),
            community: "Madrid".to_string(),
        });
        assert_eq!(region, Region::new("28", "MADRID", "Madrid"));
    }
}
