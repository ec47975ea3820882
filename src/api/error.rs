//! Transport errors for calls against the search backend.

use thiserror::Error;

use super::models::ErrorBody;

/// The single failure family of the query transport.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Connection, timeout or body I/O failure
    #[error("Request to '{url}' failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// Body was not the expected JSON shape
    #[error("Malformed response from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client itself could not be built (TLS backend, resolver setup)
    #[error("Failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid backend URL '{0}'")]
    InvalidUrl(String),
}

impl QueryError {
    /// Builds a `Status` error, pulling the message out of a FastAPI `detail` field when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: serde_json::Value::String(s),
            }) => s,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) if body.trim().is_empty() => "no response body".to_string(),
            Err(_) => body.trim().to_string(),
        };
        QueryError::Status { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            QueryError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short message for display next to the search box.
    pub fn user_message(&self) -> String {
        match self {
            QueryError::Network { .. } => "Could not reach the search service.".to_string(),
            QueryError::Status { status: 429, .. } => {
                "Too many searches. Please try again later.".to_string()
            }
            QueryError::Status { detail, .. } => format!("Search failed: {detail}"),
            QueryError::Decode { .. } => "The search service sent an unreadable response.".to_string(),
            QueryError::ClientBuild { .. } => "The search client could not start.".to_string(),
            QueryError::InvalidUrl(url) => format!("Search service URL is invalid: {url}"),
        }
    }
}

#[test]
fn test_from_status_fastapi_detail() {
    let err = QueryError::from_status(
        500,
        r#"{"detail": "An error occurred while processing your search"}"#,
    );
    match err {
        QueryError::Status { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "An error occurred while processing your search");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_from_status_structured_detail() {
    // FastAPI validation errors carry a list in `detail`
    let err = QueryError::from_status(422, r#"{"detail": [{"loc": ["body", "query"]}]}"#);
    assert_eq!(err.status(), Some(422));
    assert!(err.to_string().contains("\"loc\""));
}

#[test]
fn test_from_status_plain_and_empty_bodies() {
    let err = QueryError::from_status(502, "Bad Gateway\n");
    assert_eq!(err.to_string(), "Backend returned 502: Bad Gateway");

    let err = QueryError::from_status(503, "");
    assert_eq!(err.to_string(), "Backend returned 503: no response body");
}

#[test]
fn test_user_message_rate_limited() {
    let err = QueryError::from_status(429, r#"{"detail": "5 per 1 hour"}"#);
    assert_eq!(err.user_message(), "Too many searches. Please try again later.");
}

#[test]
fn test_client_build_is_not_a_network_error() {
    let source = reqwest::Client::new().get("not a url").build().unwrap_err();
    let err = QueryError::ClientBuild { source };
    assert!(err.to_string().starts_with("Failed to build HTTP client"));
    assert_eq!(err.status(), None);
    assert_eq!(err.user_message(), "The search client could not start.");
}
