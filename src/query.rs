// Scalar query client
//
// Issues one GET per refresh tick against the query endpoint and
// normalizes the response into a ScalarOutcome. The endpoint's payload
// uses a type discriminator whose field names appear in both casings
// ("type"/"Type", "value"/"Value") depending on server version; both
// are tolerated.
//
// This layer does not prevent overlapping requests - the scheduler
// serializes its own ticks, and a manual refresh racing a scheduled one
// is an accepted race (last response wins).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::Value;

/// Classified result of one poll. Produced fresh on every tick and
/// never persisted across polls.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarOutcome {
    /// No request was issued (empty expression or unresolved server).
    /// Not an error: the caller clears any prior error messages.
    Skipped,
    /// The expression evaluated to a scalar.
    Scalar(f64),
    /// The server reported a logical error, or transport failed.
    QueryError(String),
    /// The result is not a scalar and cannot be gauged.
    UnsupportedType(String),
}

/// Clears the in-flight flag when a request completes, whatever the
/// outcome (drop runs on early return and panic unwind alike).
struct InFlightGuard(Arc<AtomicBool>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// HTTP client for the scalar query endpoint.
#[derive(Clone)]
pub struct ScalarQueryClient {
    http: reqwest::Client,
    in_flight: Arc<AtomicBool>,
}

impl ScalarQueryClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a request is currently outstanding. The TUI uses this to
    /// show a busy indicator rather than to serialize requests.
    pub fn request_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Fetch and classify one scalar result.
    ///
    /// An empty expression or server URL is a silent no-op, not an
    /// error. All other paths produce a ScalarOutcome; this function
    /// never returns Err past the polling boundary.
    pub async fn fetch_scalar(&self, server_url: &str, expression: &str) -> ScalarOutcome {
        if expression.is_empty() || server_url.is_empty() {
            return ScalarOutcome::Skipped;
        }

        self.in_flight.store(true, Ordering::SeqCst);
        let _guard = InFlightGuard(Arc::clone(&self.in_flight));

        let url = format!("{}/api/query", server_url.trim_end_matches('/'));
        tracing::debug!("Querying {} with expr={}", url, expression);

        let response = match self
            .http
            .get(&url)
            .query(&[("expr", expression)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return ScalarOutcome::QueryError(format!(
                    "Expression {}: request failed: {}.",
                    expression, e
                ));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return ScalarOutcome::QueryError(format!(
                "Expression {}: Server returned status {}.",
                expression,
                status.as_u16()
            ));
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                return ScalarOutcome::QueryError(format!(
                    "Expression {}: invalid response body: {}.",
                    expression, e
                ));
            }
        };

        classify_payload(expression, &body)
    }
}

/// Read a field tolerating both lowercase and capitalized names.
fn field<'a>(body: &'a Value, lower: &str, upper: &str) -> Option<&'a Value> {
    body.get(lower).or_else(|| body.get(upper))
}

/// Classify a query response body into a ScalarOutcome.
///
/// Pure over the JSON payload so the branch logic is testable without a
/// server.
pub fn classify_payload(expression: &str, body: &Value) -> ScalarOutcome {
    let result_type = field(body, "type", "Type")
        .and_then(Value::as_str)
        .unwrap_or("");

    match result_type {
        "scalar" => {
            let Some(raw) = field(body, "value", "Value") else {
                return ScalarOutcome::UnsupportedType(format!(
                    "Expression {}: Result type \"scalar\" has no data.",
                    expression
                ));
            };
            // Servers send the scalar either as a JSON number or as a
            // numeric string.
            let parsed = match raw {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            match parsed {
                Some(value) => ScalarOutcome::Scalar(value),
                None => ScalarOutcome::QueryError(format!(
                    "Expression {}: scalar value {} is not a number.",
                    expression, raw
                )),
            }
        }
        "error" => {
            let message = field(body, "value", "Value")
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            ScalarOutcome::QueryError(format!("Expression {}: {}", expression, message))
        }
        other => ScalarOutcome::UnsupportedType(format!(
            "Expression {}: Result type \"{}\" cannot be gauged. Must be scalar type.",
            expression, other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn empty_expression_skips_without_request() {
        let client = ScalarQueryClient::new(reqwest::Client::new());
        let outcome = client.fetch_scalar("http://localhost:9090", "").await;
        assert_eq!(outcome, ScalarOutcome::Skipped);
        assert!(!client.request_in_flight());
    }

    #[tokio::test]
    async fn empty_server_skips_without_request() {
        let client = ScalarQueryClient::new(reqwest::Client::new());
        let outcome = client.fetch_scalar("", "up").await;
        assert_eq!(outcome, ScalarOutcome::Skipped);
    }

    #[tokio::test]
    async fn unreachable_server_yields_query_error() {
        let client = ScalarQueryClient::new(reqwest::Client::new());
        // Reserved TEST-NET-1 address; nothing listens there
        let outcome = client.fetch_scalar("http://192.0.2.1:1", "up").await;
        match outcome {
            ScalarOutcome::QueryError(msg) => assert!(msg.contains("up")),
            other => panic!("expected QueryError, got {:?}", other),
        }
        assert!(!client.request_in_flight());
    }

    #[test]
    fn classifies_scalar_string_value() {
        let body = json!({"type": "scalar", "value": "1"});
        assert_eq!(classify_payload("up", &body), ScalarOutcome::Scalar(1.0));
    }

    #[test]
    fn classifies_scalar_numeric_value() {
        let body = json!({"type": "scalar", "value": 0.25});
        assert_eq!(classify_payload("up", &body), ScalarOutcome::Scalar(0.25));
    }

    #[test]
    fn tolerates_capitalized_field_names() {
        let body = json!({"Type": "scalar", "Value": "42.5"});
        assert_eq!(classify_payload("up", &body), ScalarOutcome::Scalar(42.5));
    }

    #[test]
    fn scalar_without_value_is_unsupported() {
        let body = json!({"type": "scalar"});
        match classify_payload("up", &body) {
            ScalarOutcome::UnsupportedType(msg) => {
                assert!(msg.contains("up"));
                assert!(msg.contains("has no data"));
            }
            other => panic!("expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn error_payload_carries_expression_and_message() {
        let body = json!({"type": "error", "value": "parse error"});
        match classify_payload("up", &body) {
            ScalarOutcome::QueryError(msg) => {
                assert!(msg.contains("up"));
                assert!(msg.contains("parse error"));
            }
            other => panic!("expected QueryError, got {:?}", other),
        }
    }

    #[test]
    fn non_scalar_type_is_unsupported() {
        let body = json!({"type": "matrix", "value": []});
        match classify_payload("rate(http_requests[5m])", &body) {
            ScalarOutcome::UnsupportedType(msg) => {
                assert!(msg.contains("matrix"));
                assert!(msg.contains("Must be scalar"));
            }
            other => panic!("expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn unparsable_scalar_is_query_error() {
        let body = json!({"type": "scalar", "value": "forty-two"});
        assert!(matches!(
            classify_payload("up", &body),
            ScalarOutcome::QueryError(_)
        ));
    }

    #[test]
    fn missing_type_is_unsupported() {
        let body = json!({"value": "1"});
        assert!(matches!(
            classify_payload("up", &body),
            ScalarOutcome::UnsupportedType(_)
        ));
    }
}
