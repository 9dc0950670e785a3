//! Web layer for the fuel station finder.
//!
//! Provides JSON endpoints for reference lists, geocoding and station search.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
