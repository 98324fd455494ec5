//! Client core for the Eco Bonus rewards service.
//!
//! # Overview
//! Users earn points for returning recyclable items. This crate holds the
//! anonymous identity, the typed API client, and the screen-level policies
//! around it (demo-data fallback, presentation adapters, scanner errors).
//!
//! # Design
//! - `RewardsClient` is sans-IO: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`.
//! - `RewardsApi` composes an injected `IdentityProvider`, the client, and a
//!   `Transport`. One request per call; no retries, caching or dedup.
//! - Server error bodies are decoded once into `ErrorDetail`.
//! - DTOs are defined independently from the mock-server crate; the
//!   end-to-end test catches schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod demo;
pub mod error;
pub mod fallback;
pub mod http;
pub mod identity;
pub mod presentation;
pub mod scanner;
pub mod transport;
pub mod types;
pub mod views;

pub use api::RewardsApi;
pub use client::RewardsClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ErrorDetail, FieldError, ScanError, StoreError};
pub use fallback::{with_fallback, Sourced};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use identity::{FileStore, IdentityProvider, IdentityStore, MemoryStore, USER_ID_KEY};
pub use presentation::{Product, Transaction};
pub use transport::{Transport, UreqTransport};
pub use types::{Balance, CatalogItem, HistoryItem, Location, ReturnRequest, ReturnResponse, ScanOutcome, UserId};
