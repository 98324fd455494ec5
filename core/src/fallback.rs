//! Data source with a fallback policy.
//!
//! Screens never surface a fetch failure as an error: they show fixed
//! demonstration data plus a non-blocking notice. `Sourced` records which of
//! the two a screen got, so the policy can be tested without rendering.

use tracing::warn;

use crate::error::ApiError;

#[derive(Debug)]
pub enum Sourced<T> {
    Live(T),
    Demo { data: T, error: ApiError },
}

impl<T> Sourced<T> {
    pub fn data(&self) -> &T {
        match self {
            Sourced::Live(data) | Sourced::Demo { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Sourced::Live(data) | Sourced::Demo { data, .. } => data,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Sourced::Demo { .. })
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Sourced::Live(_) => None,
            Sourced::Demo { error, .. } => Some(error),
        }
    }

    /// Banner text for demo results.
    pub fn notice(&self) -> Option<String> {
        self.error()
            .map(|error| format!("Using demo data. {}", error.user_message()))
    }
}

/// Use `result` when it succeeded, otherwise log and substitute `demo()`.
pub fn with_fallback<T>(what: &str, result: Result<T, ApiError>, demo: impl FnOnce() -> T) -> Sourced<T> {
    match result {
        Ok(data) => Sourced::Live(data),
        Err(error) => {
            warn!(what, %error, "falling back to demo data");
            Sourced::Demo { data: demo(), error }
        }
    }
}
