use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single case returned by the backend. Nothing here is validated; the client
/// shows whatever the backend sends.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct LegalCase {
    #[serde(deserialize_with = "null_as_default")]
    pub case_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub jurisdiction: String,
    pub court: Option<String>,
    pub year: Option<i32>,
    #[serde(deserialize_with = "null_as_default")]
    pub judges: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub legal_topics: Vec<String>,
    pub docket_number: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CaseFinding {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source_url: String,
    pub court: Option<String>,
    // kept as the backend's string, not parsed
    pub decision_date: Option<String>,
}

/// Condensed summary of the key precedents behind a search.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CaseSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub findings: Vec<CaseFinding>,
    pub error: Option<String>,
}

#[test]
fn test_legal_case_full_document() {
    let raw = r#"{
        "case_name": "Donoghue v Stevenson",
        "summary": "Snail in a bottle.",
        "url": "https://example.org/donoghue",
        "confidence": 0.92,
        "jurisdiction": "UK",
        "court": "House of Lords",
        "year": 1932,
        "judges": ["Lord Atkin", "Lord Macmillan"],
        "legal_topics": ["negligence", "duty of care"],
        "docket_number": "1932 SC (HL) 31"
    }"#;
    let case: LegalCase = serde_json::from_str(raw).unwrap();
    assert_eq!(case.case_name, "Donoghue v Stevenson");
    assert_eq!(case.court.as_deref(), Some("House of Lords"));
    assert_eq!(case.year, Some(1932));
    assert_eq!(case.judges, vec!["Lord Atkin", "Lord Macmillan"]);
    assert_eq!(case.legal_topics, vec!["negligence", "duty of care"]);
    assert_eq!(case.docket_number.as_deref(), Some("1932 SC (HL) 31"));
}

#[test]
fn test_legal_case_missing_and_null_fields_default() {
    let raw = r#"{"case_name": "R v Smith", "judges": null, "court": null, "extra": 42}"#;
    let case: LegalCase = serde_json::from_str(raw).unwrap();
    assert_eq!(case.case_name, "R v Smith");
    assert_eq!(case.summary, "");
    assert_eq!(case.confidence, 0.0);
    assert!(case.judges.is_empty());
    assert!(case.legal_topics.is_empty());
    assert_eq!(case.court, None);
    assert_eq!(case.year, None);
}

#[test]
fn test_case_summary_with_findings() {
    let raw = r#"{
        "summary": "Courts consistently find a duty of care.",
        "findings": [
            {"title": "Duty of Care Established", "text": "Manufacturers owe consumers a duty.",
             "source_url": "https://example.org/a", "decision_date": "1932-05-26"}
        ]
    }"#;
    let summary: CaseSummary = serde_json::from_str(raw).unwrap();
    assert_eq!(summary.findings.len(), 1);
    assert_eq!(summary.findings[0].title, "Duty of Care Established");
    assert_eq!(summary.findings[0].court, None);
    assert_eq!(summary.findings[0].decision_date.as_deref(), Some("1932-05-26"));
    assert_eq!(summary.error, None);
}
