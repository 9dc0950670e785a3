//! Search configuration.

use super::criteria::DEFAULT_MAX_DISTANCE_KM;

/// Tunables for fuel station search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Radius used when a request does not give one (kilometres).
    pub default_max_distance_km: f64,

    /// Stations per page when a request does not give a page size.
    pub default_page_size: usize,

    /// Upper bound on the requested page size.
    pub max_page_size: usize,

    /// Brand names offered as filter suggestions.
    pub brand_suggestions: Vec<String>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        default_max_distance_km: f64,
        default_page_size: usize,
        max_page_size: usize,
        brand_suggestions: Vec<String>,
    ) -> Self {
        Self {
            default_max_distance_km,
            default_page_size,
            max_page_size,
            brand_suggestions,
        }
    }

    /// Set the default radius.
    pub fn with_default_max_distance(mut self, km: f64) -> Self {
        self.default_max_distance_km = km;
        self
    }

    /// Set the default page size.
    pub fn with_default_page_size(mut self, size: usize) -> Self {
        self.default_page_size = size;
        self
    }

    /// Set the maximum page size.
    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }

    /// Set the brand suggestions.
    pub fn with_brand_suggestions(mut self, brands: Vec<String>) -> Self {
        self.brand_suggestions = brands;
        self
    }

    /// Clamp a requested page size into `1..=max_page_size`.
    ///
    /// `None` means the default page size.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            default_page_size: 6,
            max_page_size: 50,
            brand_suggestions: ["Repsol", "Plenergy", "Ballenoil", "Petroprix"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.default_max_distance_km, 30.0);
        assert_eq!(config.default_page_size, 6);
        assert_eq!(config.max_page_size, 50);
        assert_eq!(
            config.brand_suggestions,
            vec!["Repsol", "Plenergy", "Ballenoil", "Petroprix"]
        );
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::default()
            .with_default_max_distance(10.0)
            .with_default_page_size(3)
            .with_max_page_size(20)
            .with_brand_suggestions(vec!["Cepsa".to_string()]);

        assert_eq!(config.default_max_distance_km, 10.0);
        assert_eq!(config.default_page_size, 3);
        assert_eq!(config.max_page_size, 20);
        assert_eq!(config.brand_suggestions, vec!["Cepsa"]);
    }

    #[test]
    fn page_size_is_clamped() {
        let config = SearchConfig::default();

        assert_eq!(config.page_size(None), 6);
        assert_eq!(config.page_size(Some(10)), 10);
        assert_eq!(config.page_size(Some(0)), 1);
        assert_eq!(config.page_size(Some(500)), 50);
    }
}
