//! In-memory stand-in for the Eco Bonus rewards API.
//!
//! Serves the same five endpoints as the real service, pre-seeded with the
//! catalogue and store locations. Errors use the FastAPI shape
//! (`{"detail": "..."}` or `{"detail": [{loc, msg, type}]}`).

mod seed;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

/// Location recorded on history entries created by a scan.
pub const SCAN_LOCATION: &str = "Mobile App";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    pub user_id_string: String,
    pub balance: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryItem {
    pub item_name: String,
    pub location_name: String,
    pub points_awarded: i64,
    pub date: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogItem {
    pub item_sku: String,
    pub name: String,
    pub description: String,
    pub points_awarded: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
pub struct ReturnRequest {
    pub user_id_string: String,
    pub item_sku: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReturnResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Default)]
struct Account {
    balance: i64,
    /// Oldest first.
    history: Vec<HistoryItem>,
}

#[derive(Debug)]
pub struct Store {
    catalog: Vec<CatalogItem>,
    locations: Vec<Location>,
    accounts: HashMap<String, Account>,
}

impl Store {
    pub fn seeded() -> Self {
        Self::new(seed::catalog(), seed::locations())
    }

    pub fn new(catalog: Vec<CatalogItem>, locations: Vec<Location>) -> Self {
        Self {
            catalog,
            locations,
            accounts: HashMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationIssue {
    fn body(field: &str, msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string(), field.to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("validation failed")]
    Validation(Vec<ValidationIssue>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "detail": message })),
            )
                .into_response(),
            AppError::Validation(issues) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(serde_json::json!({ "detail": issues })),
            )
                .into_response(),
        }
    }
}

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/users/{user_id}/balance", get(get_balance))
        .route("/api/users/{user_id}/history", get(get_history))
        .route("/api/catalog", get(get_catalog))
        .route("/api/locations", get(get_locations))
        .route("/api/returns", post(register_return))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_balance(State(db): State<Db>, Path(user_id): Path<String>) -> Result<Json<Balance>, AppError> {
    let store = db.read().await;
    let account = store
        .accounts
        .get(&user_id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(Balance {
        user_id_string: user_id,
        balance: account.balance,
    }))
}

/// Newest first; unknown users have an empty history.
async fn get_history(State(db): State<Db>, Path(user_id): Path<String>) -> Json<Vec<HistoryItem>> {
    let store = db.read().await;
    let history = store
        .accounts
        .get(&user_id)
        .map(|account| account.history.iter().rev().cloned().collect())
        .unwrap_or_default();
    Json(history)
}

async fn get_catalog(State(db): State<Db>) -> Json<Vec<CatalogItem>> {
    Json(db.read().await.catalog.clone())
}

async fn get_locations(State(db): State<Db>) -> Json<Vec<Location>> {
    Json(db.read().await.locations.clone())
}

/// Every accepted request awards points; duplicates are not detected.
async fn register_return(
    State(db): State<Db>,
    payload: Result<Json<ReturnRequest>, JsonRejection>,
) -> Result<Json<ReturnResponse>, AppError> {
    let Json(input) = payload.map_err(|rejection| {
        AppError::Validation(vec![ValidationIssue {
            loc: vec!["body".to_string()],
            msg: rejection.body_text(),
            kind: "json_invalid".to_string(),
        }])
    })?;

    if input.user_id_string.trim().is_empty() {
        return Err(AppError::Validation(vec![ValidationIssue::body(
            "user_id_string",
            "user_id_string must not be empty",
            "value_error",
        )]));
    }

    let mut store = db.write().await;
    let item = store
        .catalog
        .iter()
        .find(|item| item.item_sku == input.item_sku)
        .cloned()
        .ok_or_else(|| {
            AppError::Validation(vec![ValidationIssue::body("item_sku", "SKU not found", "value_error")])
        })?;

    let account = store.accounts.entry(input.user_id_string.clone()).or_default();
    account.balance += item.points_awarded;
    account.history.push(HistoryItem {
        item_name: item.name.clone(),
        location_name: SCAN_LOCATION.to_string(),
        points_awarded: item.points_awarded,
        date: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    });
    info!(user_id = %input.user_id_string, sku = %item.item_sku, balance = account.balance, "return registered");

    Ok(Json(ReturnResponse {
        status: "success".to_string(),
        message: format!("Return registered: +{} points for {}", item.points_awarded, item.name),
    }))
}
