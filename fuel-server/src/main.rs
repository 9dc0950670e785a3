use std::error::Error;
use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fuel_server::carburantes::{CarburantesClient, MockCarburantesClient, StationSource};
use fuel_server::config::AppConfig;
use fuel_server::geocode::{Geocoder, NominatimClient};
use fuel_server::search::{FuelSearch, SearchConfig};
use fuel_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fuel_server=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let geocoder = NominatimClient::new(config.geocoder.clone())?;
    let search_config = SearchConfig::default();

    // Fixture data replaces the live API, geocoding stays live
    match &config.mock_data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "using mock station data");
            let source = MockCarburantesClient::from_dir(dir)?;
            serve(
                FuelSearch::new(source, geocoder, search_config),
                config.bind_addr,
            )
            .await
        }
        None => {
            info!(base_url = %config.carburantes.base_url, "using live station data");
            let source = CarburantesClient::new(config.carburantes.clone())?;
            serve(
                FuelSearch::new(source, geocoder, search_config),
                config.bind_addr,
            )
            .await
        }
    }
}

async fn serve<S, G>(search: FuelSearch<S, G>, addr: SocketAddr) -> Result<(), Box<dyn Error>>
where
    S: StationSource + 'static,
    G: Geocoder + 'static,
{
    // Not fatal: the lists are fetched again on first use
    if let Err(e) = search.warm().await {
        warn!(error = %e, "failed to load reference lists");
    }

    let app = create_router(AppState::new(search));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "fuel station finder listening");
    info!(
        "endpoints: GET /health, /api/products, /api/regions, /api/brands, /api/geocode, \
         /api/search, /api/session; POST /api/reload"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
