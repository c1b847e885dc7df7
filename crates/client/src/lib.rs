//! HTTP client for the rule-management backend.
//!
//! [`RuleApiClient`] turns typed calls into JSON POSTs against the
//! backend's rule endpoints and collapses every failure into one
//! [`ApiError`] with a human-readable message. The HTTP layer sits
//! behind the [`Transport`] trait and request logging behind
//! [`RequestHook`], so both can be replaced in tests.

pub mod client;
pub mod config;
pub mod error;
pub mod hooks;
pub mod transport;

pub use client::RuleApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ApiErrorKind};
pub use hooks::{RequestHook, TracingHook};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
