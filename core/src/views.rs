//! View-model loaders for each screen.
//!
//! Each loader issues its requests and applies the demo-data fallback, so a
//! screen only renders what it gets back. None of them return an error.

use std::thread;

use crate::api::RewardsApi;
use crate::demo;
use crate::error::{ApiError, StoreError};
use crate::fallback::{with_fallback, Sourced};
use crate::identity::IdentityStore;
use crate::presentation::{transactions_from_history, Product, Transaction};
use crate::transport::Transport;
use crate::types::{Balance, Location, ScanOutcome};

#[derive(Debug)]
pub struct HomeView {
    pub balance: Sourced<Balance>,
    pub transactions: Sourced<Vec<Transaction>>,
}

/// Fetch balance and history concurrently and wait for both.
///
/// The identity is resolved once up front so a fresh store cannot mint two
/// different ids for the two requests.
pub fn load_home<S: IdentityStore, T: Transport>(api: &RewardsApi<S, T>) -> HomeView {
    let (balance, history) = match api.current_user() {
        Ok(user) => thread::scope(|scope| {
            let balance = scope.spawn(|| api.balance_for(&user));
            let history = scope.spawn(|| api.history_for(&user));
            (
                balance.join().unwrap_or_else(|_| Err(panicked())),
                history.join().unwrap_or_else(|_| Err(panicked())),
            )
        }),
        Err(error) => {
            let again = ApiError::Identity(StoreError::Unavailable(error.to_string()));
            (Err(error), Err(again))
        }
    };

    HomeView {
        balance: with_fallback("balance", balance, demo::balance),
        transactions: with_fallback(
            "transactions",
            history.map(|items| transactions_from_history(&items)),
            demo::transactions,
        ),
    }
}

pub fn load_catalogue<S: IdentityStore, T: Transport>(api: &RewardsApi<S, T>) -> Sourced<Vec<Product>> {
    with_fallback("catalogue", api.get_products(), demo::products)
}

pub fn load_locations<S: IdentityStore, T: Transport>(api: &RewardsApi<S, T>) -> Sourced<Vec<Location>> {
    with_fallback("locations", api.get_locations(), demo::locations)
}

/// Result of submitting a barcode from the scanner screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanView {
    pub outcome: ScanOutcome,
    /// The raw failure message, shown alongside the demo outcome.
    pub error: Option<String>,
}

pub fn submit_barcode<S: IdentityStore, T: Transport>(api: &RewardsApi<S, T>, code: &str) -> ScanView {
    match api.scan_barcode(code) {
        Ok(outcome) => ScanView { outcome, error: None },
        Err(err) => {
            tracing::warn!(code, error = %err, "scan failed, showing demo outcome");
            ScanView {
                outcome: demo::scan(code),
                error: Some(err.message),
            }
        }
    }
}

fn panicked() -> ApiError {
    ApiError::Transport("request thread panicked".to_string())
}
