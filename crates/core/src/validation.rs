//! Validation result types and validation-request normalization.
//!
//! The backend validates rules through two endpoints: one accepting a
//! typed [`Rule`] (`{"rule": ...}`) and one accepting raw rule JSON
//! (`{"rule_json": ...}`). [`RuleValidationRequest`] classifies caller
//! input into one of those shapes, with an untagged fallback for callers
//! that pass the bare rule payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::rule::Rule;

/// Top-level key selecting the rule-object endpoint.
pub const RULE_KEY: &str = "rule";

/// Top-level key selecting the raw-JSON endpoint.
pub const RULE_JSON_KEY: &str = "rule_json";

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A single problem found by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    #[serde(default)]
    pub message: String,
    /// Analyzer category, e.g. `type_mismatch` or `complexity_warning`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Human-readable description, falling back to `explanation` when the
    /// backend left `message` empty.
    pub fn text(&self) -> &str {
        match &self.explanation {
            Some(explanation) if self.message.is_empty() => explanation,
            _ => &self.message,
        }
    }
}

/// Structural metrics of the analyzed condition tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleStructure {
    pub depth: u32,
    pub condition_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_node_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_condition_count: Option<u32>,
    #[serde(default)]
    pub unique_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(alias = "is_valid")]
    pub valid: bool,
    pub summary: String,
    #[serde(default)]
    pub issues: Vec<ValidationIssue>,
    /// Number of issues per issue type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_counts: Option<BTreeMap<String, u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<RuleStructure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_comment: Option<String>,
}

impl ValidationResult {
    /// Issues of the given severity, in backend order.
    pub fn issues_with(&self, severity: Severity) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.severity == severity)
    }
}

/// Response of both validation endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleValidationResponse {
    pub validation_result: ValidationResult,
    pub rule_summary: String,
}

// ---------------------------------------------------------------------------
// Request normalization
// ---------------------------------------------------------------------------

/// The two backend validation endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationEndpoint {
    /// `POST /api/v1/rules/validate`, body `{"rule": Rule}`.
    Rule,
    /// `POST /api/v1/rules/validate-json`, body `{"rule_json": object}`.
    RuleJson,
}

impl ValidationEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            ValidationEndpoint::Rule => "/api/v1/rules/validate",
            ValidationEndpoint::RuleJson => "/api/v1/rules/validate-json",
        }
    }
}

/// A validation request resolved to exactly one endpoint and body.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationCall {
    pub endpoint: ValidationEndpoint,
    pub body: serde_json::Value,
}

/// Caller input for rule validation.
///
/// Tagged variants keep the caller's object verbatim so it is transmitted
/// unmodified.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValidationRequest {
    /// An object with a `rule` key.
    Rule(serde_json::Map<String, serde_json::Value>),
    /// An object with a `rule_json` key and no `rule` key.
    RuleJson(serde_json::Map<String, serde_json::Value>),
    /// Anything else: the bare rule payload, wrapped before sending.
    Untagged(serde_json::Value),
}

impl RuleValidationRequest {
    /// Classify arbitrary JSON. `rule` wins over `rule_json`.
    pub fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) if map.contains_key(RULE_KEY) => Self::Rule(map),
            serde_json::Value::Object(map) if map.contains_key(RULE_JSON_KEY) => {
                Self::RuleJson(map)
            }
            other => Self::Untagged(other),
        }
    }

    /// Parse and classify a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, CoreError> {
        Ok(Self::from_value(serde_json::from_str(input)?))
    }

    /// `{"rule_json": rule_json}` for the raw-JSON endpoint.
    pub fn rule_json(rule_json: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut map = serde_json::Map::new();
        map.insert(RULE_JSON_KEY.to_string(), serde_json::Value::Object(rule_json));
        Self::RuleJson(map)
    }

    pub fn endpoint(&self) -> ValidationEndpoint {
        match self {
            Self::Rule(_) => ValidationEndpoint::Rule,
            Self::RuleJson(_) | Self::Untagged(_) => ValidationEndpoint::RuleJson,
        }
    }

    /// Resolve into the endpoint and the exact body to transmit.
    pub fn into_backend_call(self) -> ValidationCall {
        let endpoint = self.endpoint();
        let body = match self {
            Self::Rule(map) | Self::RuleJson(map) => serde_json::Value::Object(map),
            Self::Untagged(payload) => wrap_rule_json(payload),
        };
        ValidationCall { endpoint, body }
    }
}

impl From<Rule> for RuleValidationRequest {
    fn from(rule: Rule) -> Self {
        let mut map = serde_json::Map::new();
        map.insert(RULE_KEY.to_string(), serde_json::json!(rule));
        Self::Rule(map)
    }
}

/// Wrap a payload as `{"rule_json": payload}` without inspecting it.
pub fn wrap_rule_json(payload: serde_json::Value) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert(RULE_JSON_KEY.to_string(), payload);
    serde_json::Value::Object(map)
}
