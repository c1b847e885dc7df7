//! Rule report request/response records.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Body of `POST /api/v1/rules/report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleReportRequest {
    /// Raw rule JSON to summarize.
    pub rule_json: serde_json::Map<String, serde_json::Value>,
    /// Ask for a markdown report. The backend defaults to `true` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_markdown: Option<bool>,
}

/// Response of `POST /api/v1/rules/report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleReportResponse {
    pub report: String,
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub rule_name: Option<String>,
}

impl RuleReportRequest {
    pub fn new(rule_json: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            rule_json,
            include_markdown: None,
        }
    }

    /// Build a request from an arbitrary JSON value, which must be an object.
    pub fn from_value(rule_json: serde_json::Value) -> Result<Self, CoreError> {
        match rule_json {
            serde_json::Value::Object(map) => Ok(Self::new(map)),
            _ => Err(CoreError::NotAnObject("rule_json")),
        }
    }

    pub fn with_markdown(mut self, include_markdown: bool) -> Self {
        self.include_markdown = Some(include_markdown);
        self
    }
}
