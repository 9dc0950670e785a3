//! Cumulative result paging.
//!
//! The result list grows as the user asks for more: page `k` is the first
//! `k * page_size` stations, not the `k`th slice.

use crate::domain::AnnotatedStation;

/// A visible prefix of the results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a> {
    /// Stations to show.
    pub stations: &'a [AnnotatedStation],

    /// Whether more stations exist beyond this prefix.
    pub has_more: bool,
}

/// The first `page_size * page_index` stations of `all`.
///
/// Page indices start at 1; index 0 yields an empty prefix.
pub fn page(all: &[AnnotatedStation], page_size: usize, page_index: usize) -> Page<'_> {
    let end = page_size.saturating_mul(page_index).min(all.len());
    Page {
        stations: &all[..end],
        has_more: all.len() > end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;
    use crate::search::rank::{annotate_candidates, test_support::station_north_of};
    use proptest::prelude::*;

    fn stations(n: usize) -> Vec<AnnotatedStation> {
        let origin = Coordinate::new(40.4168, -3.7038).unwrap();
        let records = (0..n)
            .map(|i| station_north_of(&i.to_string(), "BP", origin, i as f64, "1,5"))
            .collect();
        annotate_candidates(records, origin)
    }

    #[test]
    fn first_pages_of_ten() {
        let all = stations(10);

        let p1 = page(&all, 6, 1);
        assert_eq!(p1.stations.len(), 6);
        assert!(p1.has_more);

        let p2 = page(&all, 6, 2);
        assert_eq!(p2.stations.len(), 10);
        assert!(!p2.has_more);
    }

    #[test]
    fn page_zero_is_empty() {
        let all = stations(3);
        let p = page(&all, 6, 0);
        assert!(p.stations.is_empty());
        assert!(p.has_more);
    }

    #[test]
    fn empty_results() {
        let p = page(&[], 6, 1);
        assert!(p.stations.is_empty());
        assert!(!p.has_more);
    }

    proptest! {
        #[test]
        fn pages_are_growing_prefixes(n in 0usize..40, size in 1usize..10, k in 0usize..8) {
            let all = stations(n);
            let this = page(&all, size, k);
            let next = page(&all, size, k + 1);

            prop_assert_eq!(this.stations.len(), (size * k).min(n));
            prop_assert!(next.stations.starts_with(this.stations));
            prop_assert_eq!(this.has_more, n > this.stations.len());
            prop_assert_eq!(page(&all, size, k), this);
        }
    }
}
