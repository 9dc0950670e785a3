//! Fuel price API response DTOs.
//!
//! These types map directly to the JSON served by the Ministry's
//! `PreciosCarburantes` REST service. Keys are the upstream Spanish names.
//! Every station field is defaulted because the service omits or blanks
//! fields freely; numbers arrive as comma-decimal strings.

use serde::{Deserialize, Serialize};

/// Entry of `GET /Listados/Provincias/`.
///
/// The live list spells its id key `IDPovincia`; both spellings are read.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvinceDto {
    #[serde(rename = "IDProvincia", alias = "IDPovincia")]
    pub id: String,

    #[serde(rename = "Provincia")]
    pub name: String,

    #[serde(rename = "CCAA", default)]
    pub community: String,
}

/// Entry of `GET /Listados/ProductosPetroliferos/`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductDto {
    #[serde(rename = "IDProducto")]
    pub id: String,

    #[serde(rename = "NombreProducto")]
    pub name: String,

    #[serde(rename = "NombreProductoAbreviatura", default)]
    pub short_name: String,
}

/// Response from `GET /EstacionesTerrestres/FiltroProvinciaProducto/{province}/{product}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationListResponse {
    /// Publication timestamp, `dd/mm/yyyy HH:MM:SS`.
    #[serde(rename = "Fecha", default)]
    pub published_at: String,

    /// Stations carrying a price for the product.
    #[serde(rename = "ListaEESSPrecio", default)]
    pub stations: Vec<StationDto>,

    /// Free-text note.
    #[serde(rename = "Nota", default)]
    pub note: String,

    /// `"OK"` on success.
    #[serde(rename = "ResultadoConsulta", default)]
    pub result: String,
}

/// A station as listed in `ListaEESSPrecio`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StationDto {
    #[serde(rename = "IDEESS")]
    pub id: String,

    #[serde(rename = "Rótulo")]
    pub brand: String,

    #[serde(rename = "Dirección")]
    pub address: String,

    #[serde(rename = "C.P.")]
    pub postal_code: String,

    #[serde(rename = "Localidad")]
    pub locality: String,

    #[serde(rename = "Municipio")]
    pub municipality: String,

    #[serde(rename = "Provincia")]
    pub province: String,

    #[serde(rename = "Horario")]
    pub schedule: String,

    #[serde(rename = "Margen")]
    pub margin: String,

    #[serde(rename = "Latitud")]
    pub latitude: String,

    #[serde(rename = "Longitud (WGS84)")]
    pub longitude: String,

    #[serde(rename = "PrecioProducto")]
    pub price: String,
}
