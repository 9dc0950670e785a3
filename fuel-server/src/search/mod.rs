//! Fuel station search.
//!
//! This module answers "which stations near me sell this fuel, and which
//! are cheapest (or closest)?":
//!
//! 1. Resolve the origin's province via the locale resolver
//! 2. Fetch the province's listing for the requested fuel
//! 3. Annotate with distances, filter by radius and brand, and sort
//!
//! Results are shown through a cumulative [`page`] and searches started in
//! quick succession are arbitrated by a [`SearchSession`].

mod config;
mod criteria;
mod error;
mod pager;
mod pipeline;
mod rank;
mod session;

#[cfg(test)]
mod search_tests;

pub use config::SearchConfig;
pub use criteria::{DEFAULT_MAX_DISTANCE_KM, SearchCriteria, SortKey, normalise_brands};
pub use error::SearchError;
pub use pager::{Page, page};
pub use pipeline::FuelSearch;
pub use rank::{annotate_candidates, filter_by_brand, filter_by_radius, rank, sort_stations};
pub use session::{SearchOutcome, SearchPhase, SearchResults, SearchSession, SearchTicket};
