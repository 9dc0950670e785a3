//! Fuel price data source.
//!
//! This module provides an HTTP client for the Spanish Ministry's
//! `PreciosCarburantes` REST service, which publishes station prices per
//! province and fuel product.
//!
//! Key characteristics of the service:
//! - Numbers (coordinates and prices) are strings with a comma as decimal
//!   separator
//! - Station keys are Spanish field names with accents and punctuation
//!   (`"Rótulo"`, `"Longitud (WGS84)"`, `"C.P."`)
//! - The product catalogue lists far more products than end users search
//!   for, so it is filtered to an allow-list

mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use client::{CarburantesClient, CarburantesConfig};
pub use convert::{StationListing, convert_station};
pub use error::DataSourceError;
pub use mock::MockCarburantesClient;
pub use source::StationSource;
pub use types::{ProductDto, ProvinceDto, StationDto, StationListResponse};
