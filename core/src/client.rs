//! Stateless HTTP request builder and response parser for the rewards API.
//!
//! # Design
//! `RewardsClient` holds only a `base_url`. Each remote operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. Identity resolution and the
//! actual round-trip live one layer up in [`RewardsApi`](crate::RewardsApi).

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ErrorDetail};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Balance, CatalogItem, HistoryItem, Location, ReturnRequest, ReturnResponse, UserId};

#[derive(Debug, Clone)]
pub struct RewardsClient {
    base_url: String,
}

impl RewardsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_balance(&self, user: &UserId) -> HttpRequest {
        self.get(format!("/api/users/{}/balance", urlencoding::encode(user.as_str())))
    }

    pub fn build_get_history(&self, user: &UserId) -> HttpRequest {
        self.get(format!("/api/users/{}/history", urlencoding::encode(user.as_str())))
    }

    pub fn build_get_catalog(&self) -> HttpRequest {
        self.get("/api/catalog".to_string())
    }

    pub fn build_get_locations(&self) -> HttpRequest {
        self.get("/api/locations".to_string())
    }

    pub fn build_register_return(&self, user: &UserId, sku: &str) -> Result<HttpRequest, ApiError> {
        let input = ReturnRequest {
            user_id_string: user.as_str().to_string(),
            item_sku: sku.to_string(),
        };
        let body = serde_json::to_string(&input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/returns", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_get_balance(&self, response: HttpResponse) -> Result<Balance, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_history(&self, response: HttpResponse) -> Result<Vec<HistoryItem>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_catalog(&self, response: HttpResponse) -> Result<Vec<CatalogItem>, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_locations(&self, response: HttpResponse) -> Result<Vec<Location>, ApiError> {
        parse_json(response)
    }

    pub fn parse_register_return(&self, response: HttpResponse) -> Result<ReturnResponse, ApiError> {
        parse_json(response)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx responses to `ApiError::Http`, decoding any `detail` payload.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        detail: ErrorDetail::from_body(&response.body),
        body: response.body.clone(),
    })
}
