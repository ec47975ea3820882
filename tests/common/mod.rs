//! Shared test utilities and mock infrastructure.

#![allow(dead_code)]

pub mod mock_backend;

use std::net::TcpListener;

/// Find a port with nothing listening on it.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// JSON for a case with just a name and a confidence score.
pub fn case_json(name: &str, confidence: f64) -> serde_json::Value {
    serde_json::json!({
        "case_name": name,
        "summary": format!("Summary of {name}"),
        "url": format!("https://cases.example.org/{}", name.replace(' ', "-")),
        "confidence": confidence,
        "jurisdiction": "Ontario",
        "judges": [],
        "legal_topics": ["negligence"]
    })
}

pub fn search_body(names: &[&str]) -> String {
    let cases: Vec<serde_json::Value> = names.iter().map(|n| case_json(n, 0.5)).collect();
    serde_json::json!({
        "is_valid": true,
        "cases": cases,
        "web_summary": null
    })
    .to_string()
}
