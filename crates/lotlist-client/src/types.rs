//! Parking API response types.
//!
//! A city endpoint answers with `{"last_updated": ..., "lots": [...]}`. Most
//! per-lot fields are optional in practice: small operators omit coordinates
//! and addresses, and lots without a live counter omit `free`.

use serde::Deserialize;

/// Response of `GET {base}/{city}`.
#[derive(Debug, Deserialize)]
pub struct CityResponse {
    #[serde(default)]
    pub last_updated: Option<String>,
    pub lots: Vec<RawLot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLot {
    pub name: String,
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub free: Option<i64>,
    /// `open`, `closed`, `nodata`, `unknown`, and in older feeds `many`,
    /// `few` or `full`.
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub coords: Option<RawCoords>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawCoords {
    pub lat: f64,
    pub lng: f64,
}

/// Response of `GET {base}/notification`.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
