//! Locale-formatted decimal parsing.
//!
//! The fuel price API formats every number with a comma as the decimal
//! separator (`"1,479"`, `"40,416775"`). All numeric ingestion goes through
//! [`parse_decimal`].

/// Parse a decimal number that may use a comma as decimal separator.
///
/// Normalization is idempotent: `"1,479"` and `"1.479"` both parse to
/// `1.479`. Blank input, non-numeric input and non-finite values yield `None`.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::parse_decimal;
///
/// assert_eq!(parse_decimal("1,479"), Some(1.479));
/// assert_eq!(parse_decimal("1.479"), Some(1.479));
/// assert_eq!(parse_decimal("abc"), None);
/// ```
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}
