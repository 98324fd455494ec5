//! Error types for the rewards API client.
//!
//! # Design
//! The server reports failures FastAPI-style: a JSON body whose `detail`
//! field is either a plain message or a list of field-level validation
//! errors. That shape is decoded once, here, into [`ErrorDetail`] so callers
//! never have to guess at it again.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Errors returned by `RewardsClient` parse methods, transports, and
/// `RewardsApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, deadline hit).
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {}", describe_http(.detail.as_ref(), .body))]
    Http {
        status: u16,
        detail: Option<ErrorDetail>,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The anonymous identity could not be read or persisted.
    #[error(transparent)]
    Identity(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Best human-readable message: the server's own wording when it sent
    /// one, otherwise the error's display text.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http {
                detail: Some(detail),
                ..
            } => detail.message(),
            other => other.to_string(),
        }
    }
}

fn describe_http(detail: Option<&ErrorDetail>, body: &str) -> String {
    match detail {
        Some(detail) => detail.message(),
        None if body.is_empty() => "request failed".to_string(),
        None => body.to_string(),
    }
}

/// The `detail` field of a server error body.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    Validation(Vec<FieldError>),
    Message(String),
}

/// One entry of a validation-error list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl ErrorDetail {
    /// Decode the `detail` field of an error body. Returns `None` when the
    /// body is not JSON or has no `detail`.
    pub fn from_body(body: &str) -> Option<Self> {
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        match value.get("detail")? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) => Some(ErrorDetail::Message(text.clone())),
            serde_json::Value::Array(items) => {
                let fields: Vec<FieldError> = items
                    .iter()
                    .filter_map(|item| FieldError::deserialize(item).ok())
                    .collect();
                if fields.is_empty() && !items.is_empty() {
                    Some(ErrorDetail::Message(serde_json::Value::Array(items.clone()).to_string()))
                } else {
                    Some(ErrorDetail::Validation(fields))
                }
            }
            other => Some(ErrorDetail::Message(other.to_string())),
        }
    }

    /// Validation messages joined with `", "`, or the plain message.
    pub fn message(&self) -> String {
        match self {
            ErrorDetail::Validation(fields) => fields
                .iter()
                .map(|f| f.msg.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            ErrorDetail::Message(text) => text.clone(),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Failures of an [`IdentityStore`](crate::IdentityStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access identity store {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("identity store {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("identity store unavailable: {0}")]
    Unavailable(String),
}

/// A failed barcode scan, carrying the message the scanner screen shows.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ScanError {
    pub message: String,
    #[source]
    pub source: ApiError,
}

impl From<ApiError> for ScanError {
    fn from(source: ApiError) -> Self {
        let message = match source.user_message() {
            m if m.trim().is_empty() => "Failed to scan barcode".to_string(),
            m => m,
        };
        Self { message, source }
    }
}
