//! Rule data model and the rule-generation request/response records.

use serde::{Deserialize, Serialize};

/// Priority assigned by the backend when a rule does not specify one.
pub const DEFAULT_PRIORITY: i64 = 1;

/// A named condition/action structure evaluated by the backend rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Backend identifier. Always serialized, as `null` when unset.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub conditions: Vec<RuleCondition>,
    pub actions: Vec<RuleAction>,
    /// Execution priority (lower runs first).
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// A single comparison, or a logical group when `conditions` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub value: serde_json::Value,
    /// Nested conditions of an `and` / `or` group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<RuleCondition>>,
}

/// An action performed when a rule's conditions match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAction {
    pub action_type: String,
    #[serde(default)]
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

/// Body of `POST /api/v1/rules/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGenerationRequest {
    /// Natural-language description of the rule to generate.
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

/// Response of `POST /api/v1/rules/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleGenerationResponse {
    pub rule: Rule,
    /// How the backend arrived at the generated rule.
    pub explanation: String,
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

fn default_enabled() -> bool {
    true
}

impl RuleCondition {
    /// A plain `field operator value` comparison.
    pub fn compare(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
            conditions: None,
        }
    }

    /// Whether this condition is a logical group rather than a comparison.
    pub fn is_group(&self) -> bool {
        self.conditions.is_some()
    }
}

impl RuleGenerationRequest {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            additional_context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.additional_context = Some(context.into());
        self
    }
}
