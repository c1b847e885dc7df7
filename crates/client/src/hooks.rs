//! Request/response observers.
//!
//! Hooks run in registration order around every call made by
//! [`RuleApiClient`](crate::RuleApiClient). They observe only; they cannot
//! change the request or the outcome.

use crate::error::ApiError;

pub trait RequestHook: Send + Sync {
    /// Called before the request is handed to the transport.
    fn on_request(&self, _path: &str, _body: &serde_json::Value) {}

    /// Called when the backend answered with a 2xx status.
    fn on_response(&self, _path: &str, _status: u16) {}

    /// Called when the call failed, with the error returned to the caller.
    fn on_error(&self, _path: &str, _error: &ApiError) {}
}

/// Logs every request, response and error through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl RequestHook for TracingHook {
    fn on_request(&self, path: &str, body: &serde_json::Value) {
        tracing::debug!(path, body = %body, "Rule API request");
    }

    fn on_response(&self, path: &str, status: u16) {
        tracing::debug!(path, status, "Rule API response");
    }

    fn on_error(&self, path: &str, error: &ApiError) {
        tracing::warn!(path, status = ?error.status(), error = %error, "Rule API error");
    }
}
