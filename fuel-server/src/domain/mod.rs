//! Domain types for the fuel station finder.
//!
//! This module contains validated value types. Locale-formatted upstream
//! strings are parsed once, at the boundary, so code receiving these types
//! works with plain numbers.

mod coordinate;
mod decimal;
mod product;
mod region;
mod station;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use decimal::parse_decimal;
pub use product::{FuelProduct, RECOGNISED_PRODUCT_IDS, is_recognised_product};
pub use region::Region;
pub use station::{AnnotatedStation, Placement, StationRecord, parse_price};
