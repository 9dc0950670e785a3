//! Fuel products.

use serde::Serialize;

/// Upstream fuel product ids offered to end users.
///
/// The API lists many more products (LPG, hydrogen, biofuels, ...); only
/// these are searchable.
pub const RECOGNISED_PRODUCT_IDS: [&str; 10] =
    ["1", "23", "24", "25", "20", "3", "21", "4", "5", "26"];

/// A fuel product from the upstream catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuelProduct {
    /// Product id (e.g. `"4"`).
    pub id: String,

    /// Full name (e.g. `"Gasóleo A habitual"`).
    pub name: String,

    /// Abbreviation (e.g. `"GOA"`).
    pub short_name: String,
}

impl FuelProduct {
    /// Create a new fuel product.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            short_name: short_name.into(),
        }
    }

    /// Whether this product is in the recognised allow-list.
    pub fn is_recognised(&self) -> bool {
        is_recognised_product(&self.id)
    }
}

/// Whether `id` is one of [`RECOGNISED_PRODUCT_IDS`].
pub fn is_recognised_product(id: &str) -> bool {
    RECOGNISED_PRODUCT_IDS.contains(&id.trim())
}
