//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::carburantes::StationSource;
use crate::geocode::Geocoder;
use crate::search::{FuelSearch, SearchSession};

/// How long an unused client session is remembered.
const SESSION_IDLE: Duration = Duration::from_secs(30 * 60);

/// Upper bound on remembered client sessions.
const MAX_SESSIONS: u64 = 10_000;

/// Shared application state.
///
/// Contains the search pipeline and the per-client search sessions.
pub struct AppState<S: StationSource, G: Geocoder> {
    /// Search pipeline with its reference cache
    pub search: Arc<FuelSearch<S, G>>,

    /// Search sessions keyed by client-chosen id
    pub sessions: MokaCache<String, Arc<SearchSession>>,
}

impl<S: StationSource, G: Geocoder> AppState<S, G> {
    /// Create a new app state.
    pub fn new(search: FuelSearch<S, G>) -> Self {
        Self {
            search: Arc::new(search),
            sessions: MokaCache::builder()
                .max_capacity(MAX_SESSIONS)
                .time_to_idle(SESSION_IDLE)
                .build(),
        }
    }

    /// The session named `id`, created on first use.
    pub async fn session(&self, id: &str) -> Arc<SearchSession> {
        self.sessions
            .get_with(id.to_string(), async { Arc::new(SearchSession::new()) })
            .await
    }
}

// Derived Clone would require S: Clone and G: Clone.
impl<S: StationSource, G: Geocoder> Clone for AppState<S, G> {
    fn clone(&self) -> Self {
        Self {
            search: Arc::clone(&self.search),
            sessions: self.sessions.clone(),
        }
    }
}
