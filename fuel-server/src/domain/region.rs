//! Administrative regions (provinces).

use serde::Serialize;

/// A province as listed by the fuel price API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Province identifier (e.g. `"28"` for Madrid).
    pub id: String,

    /// Province name as published upstream (e.g. `"MADRID"`).
    pub name: String,

    /// Autonomous community the province belongs to.
    pub parent_group_name: String,
}

impl Region {
    /// Create a new region.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        parent_group_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_group_name: parent_group_name.into(),
        }
    }

    /// Whether this region's name appears, ignoring case, anywhere in `address`.
    ///
    /// Plain substring matching: a short name can match inside a longer word.
    pub fn appears_in(&self, address: &str) -> bool {
        let name = self.name.trim();
        if name.is_empty() {
            return false;
        }
        address.to_lowercase().contains(&name.to_lowercase())
    }
}
