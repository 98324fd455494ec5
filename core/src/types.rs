//! Domain DTOs for the rewards API.
//!
//! # Design
//! Field names follow the remote service's JSON exactly, so no serde renames
//! are needed. The mock-server crate defines its own copies; the end-to-end
//! test catches schema drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Anonymous per-device user identifier.
///
/// Never empty when produced by [`IdentityProvider`](crate::IdentityProvider).
/// Tokens supplied through `set_identity` are not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Point total for one user. Only ever mutated server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    pub user_id_string: String,
    pub balance: i64,
}

/// A past award, in whatever order the server returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryItem {
    pub item_name: String,
    pub location_name: String,
    pub points_awarded: i64,
    /// ISO-8601 timestamp, kept verbatim.
    pub date: String,
}

/// A scannable SKU and the points it is worth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    pub item_sku: String,
    pub name: String,
    pub description: String,
    pub points_awarded: i64,
}

/// A participating store or recycling point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `POST /api/returns`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReturnRequest {
    pub user_id_string: String,
    pub item_sku: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReturnResponse {
    pub status: String,
    pub message: String,
}

/// A `ReturnResponse` normalized for the scanner screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanOutcome {
    pub success: bool,
    pub barcode: String,
    pub status: String,
    pub message: String,
}

impl ScanOutcome {
    pub fn from_response(barcode: &str, response: ReturnResponse) -> Self {
        Self {
            success: matches!(response.status.as_str(), "success" | "ok"),
            barcode: barcode.to_string(),
            status: response.status,
            message: response.message,
        }
    }
}
