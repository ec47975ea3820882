use serde::{Deserialize, Serialize};

use crate::data_models::{CaseSummary, LegalCase, null_as_default};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchResponse {
    /// Whether the backend judged the query suitable for legal research. The view ignores it.
    #[serde(deserialize_with = "null_as_default")]
    pub is_valid: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub cases: Vec<LegalCase>,
    pub web_summary: Option<CaseSummary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthResponse {
    pub status: String,
}

/// FastAPI error body, e.g. `{"detail": "Rate limit exceeded"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: serde_json::Value,
}

#[test]
fn test_search_response_null_summary() {
    let raw = r#"{"is_valid": true, "cases": [], "web_summary": null}"#;
    let response: SearchResponse = serde_json::from_str(raw).unwrap();
    assert!(response.is_valid);
    assert!(response.cases.is_empty());
    assert_eq!(response.web_summary, None);
}

#[test]
fn test_search_response_preserves_case_order() {
    let raw = r#"{"is_valid": true, "cases": [
        {"case_name": "C"}, {"case_name": "A"}, {"case_name": "B"}
    ]}"#;
    let response: SearchResponse = serde_json::from_str(raw).unwrap();
    let names: Vec<&str> = response.cases.iter().map(|c| c.case_name.as_str()).collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[test]
fn test_search_request_body_shape() {
    let body = serde_json::to_value(SearchRequest {
        query: "  negligence ".to_string(),
    })
    .unwrap();
    assert_eq!(body, serde_json::json!({"query": "  negligence "}));
}

#[test]
fn test_search_response_null_fields_default() {
    let raw = r#"{"is_valid": null, "cases": null, "web_summary": null}"#;
    let response: SearchResponse = serde_json::from_str(raw).unwrap();
    assert!(!response.is_valid);
    assert!(response.cases.is_empty());
    assert_eq!(response.web_summary, None);
}
