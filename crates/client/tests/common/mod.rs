#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use rule_api_client::{
    ApiError, RequestHook, RuleApiClient, Transport, TransportError, TransportResponse,
};
use rule_api_core::report::RuleReportRequest;
use rule_api_core::rule::RuleGenerationRequest;
use rule_api_core::validation::RuleValidationRequest;

/// Transport that records every request and answers with a fixed reply.
pub struct MockTransport {
    reply: Result<TransportResponse, TransportError>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockTransport {
    pub fn replying(status: u16, body: Value) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(TransportResponse { status, body }),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: TransportError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    /// The single request sent so far.
    pub fn only_request(&self) -> (String, Value) {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<TransportResponse, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), body.clone()));
        self.reply.clone()
    }
}

/// Hook that records the events it sees, as `"<event> <path>"` strings.
#[derive(Clone, Default)]
pub struct RecordingHook {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl RecordingHook {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl RequestHook for RecordingHook {
    fn on_request(&self, path: &str, _body: &Value) {
        self.events.lock().unwrap().push(format!("request {path}"));
    }

    fn on_response(&self, path: &str, status: u16) {
        self.events
            .lock()
            .unwrap()
            .push(format!("response {path} {status}"));
    }

    fn on_error(&self, path: &str, error: &ApiError) {
        self.events
            .lock()
            .unwrap()
            .push(format!("error {path} {error}"));
    }
}

pub fn client_for(transport: &Arc<MockTransport>) -> RuleApiClient {
    RuleApiClient::new(transport.clone())
}

/// Run every client operation once, each expected to fail, and collect
/// the errors in call order.
pub async fn errors_from_every_call(client: &RuleApiClient) -> Vec<ApiError> {
    vec![
        client
            .generate_rule(&RuleGenerationRequest::new("d"))
            .await
            .unwrap_err(),
        client
            .validate_rule(RuleValidationRequest::from_value(json!({"rule": {}})))
            .await
            .unwrap_err(),
        client.validate_rule_json(json!({})).await.unwrap_err(),
        client
            .generate_rule_report(&RuleReportRequest::new(Default::default()))
            .await
            .unwrap_err(),
        client.post("/api/v1/custom", &json!(null)).await.unwrap_err(),
    ]
}

/// A rule as the backend returns it from `/generate`.
pub fn generated_rule_json() -> Value {
    json!({
        "id": "rule-7f3a",
        "name": "High value order review",
        "description": "Flag orders above 1,000,000 KRW from new customers",
        "conditions": [
            {"field": "amount", "operator": ">", "value": 1000000},
            {
                "field": "placeholder",
                "operator": "or",
                "value": null,
                "conditions": [
                    {"field": "membership", "operator": "==", "value": "new"},
                    {"field": "tags", "operator": "contains", "value": ["first_order"]}
                ]
            }
        ],
        "actions": [
            {"action_type": "flag_for_review", "parameters": {"queue": "fraud", "sla_hours": 4}}
        ],
        "priority": 2,
        "enabled": true
    })
}

pub fn validation_response_json() -> Value {
    json!({
        "validation_result": {
            "valid": true,
            "issues": [],
            "summary": "Rule is valid"
        },
        "rule_summary": "Flags large orders from new customers"
    })
}
