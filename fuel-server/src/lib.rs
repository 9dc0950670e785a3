//! Fuel station finder server.
//!
//! Answers: "where is the cheapest (or nearest) station selling my fuel
//! around here?" using the Spanish Ministry's published fuel prices.

pub mod cache;
pub mod carburantes;
pub mod config;
pub mod distance;
pub mod domain;
pub mod geocode;
pub mod locale;
pub mod search;
pub mod web;
