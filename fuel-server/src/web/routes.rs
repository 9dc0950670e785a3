//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{debug, warn};

use crate::carburantes::{DataSourceError, StationSource};
use crate::domain::Coordinate;
use crate::geocode::Geocoder;
use crate::search::{
    SearchCriteria, SearchError, SearchOutcome, SearchSession, SortKey, normalise_brands, page,
};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S, G>(state: AppState<S, G>) -> Router
where
    S: StationSource + 'static,
    G: Geocoder + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/products", get(list_products::<S, G>))
        .route("/api/regions", get(list_regions::<S, G>))
        .route("/api/brands", get(list_brands::<S, G>))
        .route("/api/geocode", get(geocode::<S, G>))
        .route("/api/search", get(search::<S, G>))
        .route("/api/session", get(session_status::<S, G>))
        .route("/api/reload", post(reload::<S, G>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Searchable fuel products.
async fn list_products<S: StationSource, G: Geocoder>(
    State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<ProductResult>>, AppError> {
    let products = state.search.fuel_products().await?;
    Ok(Json(products.iter().map(ProductResult::from).collect()))
}

/// Provinces.
async fn list_regions<S: StationSource, G: Geocoder>(
    State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<RegionResult>>, AppError> {
    let regions = state.search.regions().await?;
    Ok(Json(regions.iter().map(RegionResult::from).collect()))
}

/// Brand filter suggestions.
async fn list_brands<S: StationSource, G: Geocoder>(
    State(state): State<AppState<S, G>>,
) -> Json<BrandsResponse> {
    Json(BrandsResponse {
        brands: state.search.config().brand_suggestions.clone(),
    })
}

/// Coordinates of a typed address.
async fn geocode<S: StationSource, G: Geocoder>(
    State(state): State<AppState<S, G>>,
    Query(req): Query<GeocodeRequest>,
) -> Result<Json<GeocodeResponse>, AppError> {
    let coord = state.search.locate(&req.address).await?;
    Ok(Json(coord.into()))
}

/// Drop and re-fetch the reference lists.
async fn reload<S: StationSource, G: Geocoder>(
    State(state): State<AppState<S, G>>,
) -> Result<StatusCode, AppError> {
    state.search.reload();
    state.search.warm().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Search for stations.
async fn search<S: StationSource, G: Geocoder>(
    State(state): State<AppState<S, G>>,
    Query(req): Query<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let config = state.search.config();

    // Coordinates take precedence over a typed address
    let origin = match (req.lat, req.lng, req.address.as_deref()) {
        (Some(lat), Some(lng), _) => Some(Coordinate::new(lat, lng).map_err(|e| {
            AppError::BadRequest {
                message: e.to_string(),
            }
        })?),
        (None, None, Some(address)) => Some(state.search.locate(address).await?),
        (None, None, None) => None,
        _ => {
            return Err(AppError::BadRequest {
                message: "lat and lng must be given together".to_string(),
            });
        }
    };

    let sort_key = req
        .sort
        .as_deref()
        .map(str::parse::<SortKey>)
        .transpose()?
        .unwrap_or_default();

    let criteria = SearchCriteria {
        fuel_product_id: req.product.clone(),
        origin,
        brand_filter: normalise_brands(req.brand_terms()),
        max_distance_km: req.max_distance.unwrap_or(config.default_max_distance_km),
        sort_key,
    };

    let page_index = req.page.unwrap_or(1);
    let session = match req.session.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Some(state.session(id).await),
        _ => None,
    };

    // Later pages extend the stored list rather than searching again
    let stored = match &session {
        Some(session) if page_index > 1 => session
            .results()
            .await
            .filter(|results| results.criteria == criteria),
        _ => None,
    };

    let results = match stored {
        Some(results) => {
            debug!(page = page_index, total = results.stations.len(), "paging stored results");
            results
        }
        None => {
            let session = session.unwrap_or_else(|| Arc::new(SearchSession::new()));
            match session.run(&*state.search, &criteria).await? {
                SearchOutcome::Completed(results) => results,
                SearchOutcome::Superseded => {
                    return Err(AppError::Conflict {
                        message: "superseded by a newer search".to_string(),
                    });
                }
            }
        }
    };

    let page_size = config.page_size(req.page_size);
    let visible = page(&results.stations, page_size, page_index);

    Ok(Json(SearchResponse {
        region: (&results.region).into(),
        total: results.stations.len(),
        has_more: visible.has_more,
        page: page_index,
        stations: visible.stations.iter().map(StationResult::from).collect(),
    }))
}

/// Progress of a named search session.
async fn session_status<S: StationSource, G: Geocoder>(
    State(state): State<AppState<S, G>>,
    Query(req): Query<SessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let Some(session) = state.sessions.get(req.id.trim()).await else {
        return Err(AppError::NotFound {
            message: format!("unknown session {:?}", req.id),
        });
    };

    Ok(Json(SessionResponse {
        phase: session.phase().await,
        error: session.last_error().await,
        total: session.results().await.map(|r| r.stations.len()),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Unprocessable { message: String },
    BadGateway { message: String },
}

impl From<DataSourceError> for AppError {
    fn from(e: DataSourceError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidCriteria(message) => AppError::BadRequest { message },
            SearchError::RegionNotFound { address } => {
                debug!(%address, "no region for address");
                AppError::NotFound {
                    message: "couldn't determine your area".to_string(),
                }
            }
            SearchError::Geocoding(e) if e.is_no_match() => AppError::Unprocessable {
                message: e.to_string(),
            },
            SearchError::Geocoding(e) => AppError::BadGateway {
                message: e.to_string(),
            },
            SearchError::DataSource(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            warn!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
