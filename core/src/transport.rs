//! Executes `HttpRequest` values against the network.
//!
//! `Transport` is the seam between the deterministic client core and real
//! I/O. Tests substitute canned or failing transports; production code uses
//! [`UreqTransport`].

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Fixed request deadline used when no configuration overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub trait Transport: Send + Sync {
    /// Perform one round-trip. Non-2xx statuses are returned as data; only
    /// a missing response is an error.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a ureq agent.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses reach `RewardsClient` for interpretation.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), url = %request.path, "api request");

        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.path);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.path);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| {
            warn!(url = %request.path, error = %e, "api request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(status, url = %request.path, "api response");
        if status >= 400 {
            warn!(status, url = %request.path, body = %body, "api error response");
        }

        Ok(HttpResponse { status, headers, body })
    }
}
