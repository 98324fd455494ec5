//! The rewards API client: identity + request building + transport.

use tracing::info;

use crate::client::RewardsClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ScanError};
use crate::identity::{FileStore, IdentityProvider, IdentityStore};
use crate::presentation::{products_from_catalog, transactions_from_history, Product, Transaction};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Balance, CatalogItem, HistoryItem, Location, ReturnResponse, ScanOutcome, UserId};

/// Single point of contact with the remote service.
///
/// Every method is one independent request/response pair. Nothing is
/// cached, retried or deduplicated.
#[derive(Debug)]
pub struct RewardsApi<S, T> {
    identity: IdentityProvider<S>,
    client: RewardsClient,
    transport: T,
}

impl RewardsApi<FileStore, UreqTransport> {
    /// Production wiring: file-backed identity and a ureq transport.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            IdentityProvider::new(FileStore::new(&config.state_file)),
            RewardsClient::new(&config.base_url),
            UreqTransport::new(config.timeout),
        )
    }
}

impl<S: IdentityStore, T: Transport> RewardsApi<S, T> {
    pub fn new(identity: IdentityProvider<S>, client: RewardsClient, transport: T) -> Self {
        Self {
            identity,
            client,
            transport,
        }
    }

    pub fn identity(&self) -> &IdentityProvider<S> {
        &self.identity
    }

    pub fn client(&self) -> &RewardsClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn current_user(&self) -> Result<UserId, ApiError> {
        Ok(self.identity.get_identity()?)
    }

    pub fn get_balance(&self) -> Result<Balance, ApiError> {
        let user = self.current_user()?;
        self.balance_for(&user)
    }

    /// Balance for an explicit identity, bypassing the provider.
    pub fn balance_for(&self, user: &UserId) -> Result<Balance, ApiError> {
        let response = self.transport.execute(self.client.build_get_balance(user))?;
        self.client.parse_get_balance(response)
    }

    pub fn get_history(&self) -> Result<Vec<HistoryItem>, ApiError> {
        let user = self.current_user()?;
        self.history_for(&user)
    }

    pub fn history_for(&self, user: &UserId) -> Result<Vec<HistoryItem>, ApiError> {
        let response = self.transport.execute(self.client.build_get_history(user))?;
        self.client.parse_get_history(response)
    }

    pub fn get_catalog(&self) -> Result<Vec<CatalogItem>, ApiError> {
        let response = self.transport.execute(self.client.build_get_catalog())?;
        self.client.parse_get_catalog(response)
    }

    pub fn get_locations(&self) -> Result<Vec<Location>, ApiError> {
        let response = self.transport.execute(self.client.build_get_locations())?;
        self.client.parse_get_locations(response)
    }

    /// Submit one return for the current identity.
    ///
    /// Not idempotent: each call is a separate award server-side.
    pub fn register_return(&self, sku: &str) -> Result<ReturnResponse, ApiError> {
        let user = self.current_user()?;
        self.register_return_for(&user, sku)
    }

    /// Return on behalf of an explicit identity, bypassing the provider.
    pub fn register_return_for(&self, user: &UserId, sku: &str) -> Result<ReturnResponse, ApiError> {
        let request = self.client.build_register_return(user, sku)?;
        let response = self.transport.execute(request)?;
        let result = self.client.parse_register_return(response)?;
        info!(user_id = %user, sku, status = %result.status, "return registered");
        Ok(result)
    }

    /// `register_return` normalized for the scanner screen.
    pub fn scan_barcode(&self, code: &str) -> Result<ScanOutcome, ScanError> {
        let response = self.register_return(code)?;
        Ok(ScanOutcome::from_response(code, response))
    }

    /// History reshaped for display. See [`crate::presentation`].
    pub fn get_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        Ok(transactions_from_history(&self.get_history()?))
    }

    /// Catalogue reshaped for display. See [`crate::presentation`].
    pub fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(products_from_catalog(&self.get_catalog()?))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::http::{HttpRequest, HttpResponse};
    use crate::identity::MemoryStore;

    /// Transport that replays canned responses and records every request.
    #[derive(Default)]
    pub struct ScriptedTransport {
        pub requests: Mutex<Vec<HttpRequest>>,
        replies: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    }

    impl ScriptedTransport {
        pub fn reply(self, status: u16, body: &str) -> Self {
            self.replies.lock().unwrap().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Err(ApiError::Transport(message.to_string())));
            self
        }

        pub fn sent(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for ScriptedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted reply".to_string())))
        }
    }

    /// Transport that routes by URL suffix, safe to call from several threads.
    pub struct RoutedTransport {
        pub routes: Vec<(&'static str, u16, &'static str)>,
    }

    impl Transport for RoutedTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.routes
                .iter()
                .find(|(suffix, _, _)| request.path.ends_with(suffix))
                .map(|(_, status, body)| HttpResponse {
                    status: *status,
                    headers: Vec::new(),
                    body: body.to_string(),
                })
                .ok_or_else(|| ApiError::Transport("connection refused".to_string()))
        }
    }

    pub fn api_with<T: Transport>(user: &str, transport: T) -> RewardsApi<MemoryStore, T> {
        let identity = IdentityProvider::new(MemoryStore::new());
        identity.set_identity(user).unwrap();
        RewardsApi::new(identity, RewardsClient::new("http://api.test"), transport)
    }
}
