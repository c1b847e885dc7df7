//! Typed client for the rule backend endpoints.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use rule_api_core::report::{RuleReportRequest, RuleReportResponse};
use rule_api_core::rule::{RuleGenerationRequest, RuleGenerationResponse};
use rule_api_core::validation::{
    wrap_rule_json, RuleValidationRequest, RuleValidationResponse, ValidationEndpoint,
};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::hooks::{RequestHook, TracingHook};
use crate::transport::{HttpTransport, Transport};

pub const GENERATE_PATH: &str = "/api/v1/rules/generate";
pub const REPORT_PATH: &str = "/api/v1/rules/report";

/// Client for the rule-management backend.
///
/// Every call is a single stateless POST. Cloning is cheap and clones
/// share the transport.
#[derive(Clone)]
pub struct RuleApiClient {
    transport: Arc<dyn Transport>,
    hooks: Vec<Arc<dyn RequestHook>>,
}

impl RuleApiClient {
    /// Create a client over an explicit transport, with no hooks.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            hooks: Vec::new(),
        }
    }

    /// Create an HTTP client from configuration. Installs [`TracingHook`]
    /// when `debug_logging` is set.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(config)?;
        let client = Self::new(Arc::new(transport));
        if config.debug_logging {
            Ok(client.with_hook(TracingHook))
        } else {
            Ok(client)
        }
    }

    /// Append a hook. Hooks run in the order they were added.
    pub fn with_hook(mut self, hook: impl RequestHook + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Generate a rule from a natural-language description.
    pub async fn generate_rule(
        &self,
        request: &RuleGenerationRequest,
    ) -> Result<RuleGenerationResponse, ApiError> {
        self.call(GENERATE_PATH, to_body(request)?).await
    }

    /// Validate a rule. `{"rule": ...}` goes to the rule-object endpoint,
    /// `{"rule_json": ...}` to the raw-JSON endpoint, and any other payload
    /// is wrapped as `{"rule_json": payload}` first.
    pub async fn validate_rule(
        &self,
        request: RuleValidationRequest,
    ) -> Result<RuleValidationResponse, ApiError> {
        let call = request.into_backend_call();
        self.call(call.endpoint.path(), call.body).await
    }

    /// Validate raw rule JSON. Always wraps the argument as
    /// `{"rule_json": rule_json}`, even if it already has that shape.
    pub async fn validate_rule_json(
        &self,
        rule_json: serde_json::Value,
    ) -> Result<RuleValidationResponse, ApiError> {
        self.call(ValidationEndpoint::RuleJson.path(), wrap_rule_json(rule_json))
            .await
    }

    /// Generate a human-readable report for raw rule JSON.
    pub async fn generate_rule_report(
        &self,
        request: &RuleReportRequest,
    ) -> Result<RuleReportResponse, ApiError> {
        self.call(REPORT_PATH, to_body(request)?).await
    }

    /// POST an arbitrary body to an arbitrary path and return the raw JSON
    /// response. Errors follow the same rules as the typed calls.
    pub async fn post(
        &self,
        path: &str,
        data: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        let (status, value) = self.send(path, data).await?;
        self.notify_response(path, status);
        Ok(value)
    }

    // ---- private helpers ----

    /// Send and decode. Hooks see `on_response` only once the body has
    /// decoded into `T`.
    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        let (status, value) = self.send(path, &body).await?;
        match serde_json::from_value(value) {
            Ok(decoded) => {
                self.notify_response(path, status);
                Ok(decoded)
            }
            Err(e) => {
                tracing::error!(
                    path,
                    status,
                    error = %e,
                    "Unexpected response shape from rule API"
                );
                let err = ApiError::other();
                self.notify_error(path, &err);
                Err(err)
            }
        }
    }

    /// Run the request hooks and the transport. Returns the 2xx status and
    /// body; every failure has already been reported to the error hooks.
    async fn send(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<(u16, serde_json::Value), ApiError> {
        for hook in &self.hooks {
            hook.on_request(path, body);
        }

        match self.transport.post_json(path, body).await {
            Ok(response) if response.is_success() => Ok((response.status, response.body)),
            Ok(response) => {
                let err = ApiError::from_server_response(response.status, &response.body);
                self.notify_error(path, &err);
                Err(err)
            }
            Err(transport_err) => {
                tracing::debug!(path, error = %transport_err, "Rule API transport failure");
                let err = ApiError::from(transport_err);
                self.notify_error(path, &err);
                Err(err)
            }
        }
    }

    fn notify_response(&self, path: &str, status: u16) {
        for hook in &self.hooks {
            hook.on_response(path, status);
        }
    }

    fn notify_error(&self, path: &str, err: &ApiError) {
        for hook in &self.hooks {
            hook.on_error(path, err);
        }
    }
}

impl std::fmt::Debug for RuleApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleApiClient")
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

fn to_body<T: Serialize>(request: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(request).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize rule API request");
        ApiError::other()
    })
}
