//! Shared types for the rule-management backend API.
//!
//! Defines the rule data model, the request/response records exchanged
//! with the backend, and the normalization of validation requests into
//! one of the two backend validation endpoints.

pub mod error;
pub mod report;
pub mod rule;
pub mod validation;
