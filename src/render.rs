use std::fmt::{self, Display, Write};

use crate::data_models::{CaseFinding, CaseSummary, LegalCase};
use crate::view::SearchView;

impl Display for LegalCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.case_name)?;
        if let Some(year) = self.year {
            write!(f, " ({year})")?;
        }
        writeln!(f, "  [confidence {:.2}]", self.confidence)?;

        let mut origin = vec![self.jurisdiction.as_str()];
        if let Some(court) = &self.court {
            origin.push(court);
        }
        let origin: Vec<&str> = origin.into_iter().filter(|s| !s.is_empty()).collect();
        if !origin.is_empty() {
            writeln!(f, "    {}", origin.join(" / "))?;
        }
        if let Some(docket) = &self.docket_number {
            writeln!(f, "    Docket: {docket}")?;
        }
        if !self.judges.is_empty() {
            writeln!(f, "    Judges: {}", self.judges.join(", "))?;
        }
        if !self.legal_topics.is_empty() {
            writeln!(f, "    Topics: {}", self.legal_topics.join(", "))?;
        }
        if !self.summary.is_empty() {
            writeln!(f, "    {}", self.summary)?;
        }
        write!(f, "    {}", self.url)
    }
}

impl Display for CaseFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}", self.title)?;
        match (&self.court, &self.decision_date) {
            (Some(court), Some(date)) => write!(f, " ({court}, {date})")?,
            (Some(court), None) => write!(f, " ({court})")?,
            (None, Some(date)) => write!(f, " ({date})")?,
            (None, None) => {}
        }
        writeln!(f)?;
        if !self.text.is_empty() {
            writeln!(f, "  {}", self.text)?;
        }
        write!(f, "  {}", self.source_url)
    }
}

impl Display for CaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            writeln!(f, "Summary unavailable: {error}")?;
        }
        if !self.summary.is_empty() {
            writeln!(f, "{}", self.summary)?;
        }
        for finding in &self.findings {
            writeln!(f, "{finding}")?;
        }
        Ok(())
    }
}

/// Renders the whole view as terminal text.
pub fn render_view(view: &SearchView) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_view(&mut out, view);
    out
}

fn write_view(out: &mut String, view: &SearchView) -> fmt::Result {
    if view.is_loading() {
        writeln!(out, "Searching...")?;
    }
    if let Some(error) = view.error() {
        writeln!(out, "Error: {error}")?;
    }
    if let Some(summary) = view.case_summary() {
        writeln!(out, "== Summary ==")?;
        write!(out, "{summary}")?;
        writeln!(out)?;
    }
    if !view.cases().is_empty() {
        writeln!(out, "== Cases ({}) ==", view.cases().len())?;
        for (i, case) in view.cases().iter().enumerate() {
            writeln!(out, "{}. {case}", i + 1)?;
        }
    }
    Ok(())
}

#[test]
fn test_legal_case_display() {
    let case = LegalCase {
        case_name: "Donoghue v Stevenson".into(),
        summary: "Snail in a bottle.".into(),
        url: "https://example.org/donoghue".into(),
        confidence: 0.9234,
        jurisdiction: "UK".into(),
        court: Some("House of Lords".into()),
        year: Some(1932),
        judges: vec!["Lord Atkin".into()],
        legal_topics: vec![],
        docket_number: None,
    };
    let text = case.to_string();
    assert!(text.starts_with("Donoghue v Stevenson (1932)  [confidence 0.92]"));
    assert!(text.contains("UK / House of Lords"));
    assert!(text.contains("Judges: Lord Atkin"));
    assert!(!text.contains("Topics:"));
    assert!(!text.contains("Docket:"));
    assert!(text.ends_with("https://example.org/donoghue"));
}

#[test]
fn test_case_summary_display_with_error() {
    let summary = CaseSummary {
        summary: String::new(),
        findings: vec![],
        error: Some("web search unavailable".into()),
    };
    assert_eq!(summary.to_string(), "Summary unavailable: web search unavailable\n");
}

#[test]
fn test_render_empty_view() {
    let view = SearchView::default();
    assert_eq!(render_view(&view), "");
}
