//! Search sessions with last-request-wins semantics.
//!
//! A user can start a new search before the previous one finishes. Every
//! search run through a session takes a ticket; only the holder of the
//! latest ticket may move the session's phase or publish results. Earlier
//! searches still run to completion (there is no network cancellation) but
//! their outcome is discarded.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::carburantes::StationSource;
use crate::domain::{AnnotatedStation, Region};
use crate::geocode::Geocoder;

use super::criteria::SearchCriteria;
use super::error::SearchError;
use super::pipeline::FuelSearch;

/// Where the latest search of a session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    /// No search started yet.
    Idle,
    /// Finding the origin's region.
    Resolving,
    /// Fetching the region's listing.
    Fetching,
    /// Filtering and sorting.
    Ranking,
    /// Results are available.
    Ready,
    /// The latest search failed.
    Failed,
}

/// Sequence number of one search within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

impl SearchTicket {
    /// The raw sequence number.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SearchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Published results of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// Criteria the search ran with.
    pub criteria: SearchCriteria,

    /// Region the search ran in.
    pub region: Region,

    /// Ranked stations.
    pub stations: Arc<Vec<AnnotatedStation>>,
}

/// What happened to one search.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// This search was the latest and its results are published.
    Completed(SearchResults),

    /// A newer search started meanwhile; this one's outcome was dropped.
    Superseded,
}

impl SearchOutcome {
    /// Whether the search was overtaken by a newer one.
    pub fn is_superseded(&self) -> bool {
        matches!(self, SearchOutcome::Superseded)
    }
}

#[derive(Debug)]
struct SessionState {
    phase: SearchPhase,
    results: Option<SearchResults>,
    last_error: Option<String>,
}

/// One user's sequence of searches.
#[derive(Debug)]
pub struct SearchSession {
    latest: AtomicU64,
    state: RwLock<SessionState>,
}

impl SearchSession {
    /// Create an idle session.
    pub fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
            state: RwLock::new(SessionState {
                phase: SearchPhase::Idle,
                results: None,
                last_error: None,
            }),
        }
    }

    /// Start a search, superseding any search in flight.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is the latest search.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Current phase.
    pub async fn phase(&self) -> SearchPhase {
        self.state.read().await.phase
    }

    /// Results of the latest completed search, if any.
    pub async fn results(&self) -> Option<SearchResults> {
        self.state.read().await.results.clone()
    }

    /// Message of the latest failure, if the session is in [`SearchPhase::Failed`].
    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    /// Move to `phase` if `ticket` is still the latest.
    pub async fn advance(&self, ticket: SearchTicket, phase: SearchPhase) -> bool {
        let mut state = self.state.write().await;
        // Checked under the lock so a newer ticket's update cannot be overwritten.
        if !self.is_current(ticket) {
            return false;
        }
        state.phase = phase;
        if phase != SearchPhase::Failed {
            state.last_error = None;
        }
        true
    }

    /// Publish results if `ticket` is still the latest.
    pub async fn complete(&self, ticket: SearchTicket, results: SearchResults) -> SearchOutcome {
        let mut state = self.state.write().await;
        if !self.is_current(ticket) {
            debug!(%ticket, "discarding results of superseded search");
            return SearchOutcome::Superseded;
        }
        state.phase = SearchPhase::Ready;
        state.results = Some(results.clone());
        state.last_error = None;
        SearchOutcome::Completed(results)
    }

    async fn fail(&self, ticket: SearchTicket, error: &SearchError) -> bool {
        let mut state = self.state.write().await;
        if !self.is_current(ticket) {
            return false;
        }
        state.phase = SearchPhase::Failed;
        state.last_error = Some(error.to_string());
        true
    }

    /// Run a search through this session.
    ///
    /// Invalid criteria are rejected before a ticket is taken. Errors of a
    /// superseded search are swallowed and reported as
    /// [`SearchOutcome::Superseded`].
    pub async fn run<S: StationSource, G: Geocoder>(
        &self,
        searcher: &FuelSearch<S, G>,
        criteria: &SearchCriteria,
    ) -> Result<SearchOutcome, SearchError> {
        let origin = searcher.validate(criteria)?;
        let ticket = self.begin();
        debug!(%ticket, product = %criteria.fuel_product_id, %origin, "search started");

        self.advance(ticket, SearchPhase::Resolving).await;
        let region = match searcher.resolve_region(origin).await {
            Ok(region) => region,
            Err(e) => return self.failed(ticket, e).await,
        };

        if !self.advance(ticket, SearchPhase::Fetching).await {
            return Ok(SearchOutcome::Superseded);
        }
        let candidates = match searcher
            .fetch_candidates(&region, &criteria.fuel_product_id)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => return self.failed(ticket, e).await,
        };

        if !self.advance(ticket, SearchPhase::Ranking).await {
            return Ok(SearchOutcome::Superseded);
        }
        let stations = searcher.rank(candidates, origin, criteria);

        Ok(self
            .complete(
                ticket,
                SearchResults {
                    criteria: criteria.clone(),
                    region,
                    stations: Arc::new(stations),
                },
            )
            .await)
    }

    async fn failed(
        &self,
        ticket: SearchTicket,
        error: SearchError,
    ) -> Result<SearchOutcome, SearchError> {
        if self.fail(ticket, &error).await {
            Err(error)
        } else {
            debug!(%ticket, %error, "ignoring failure of superseded search");
            Ok(SearchOutcome::Superseded)
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}
