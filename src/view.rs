//! Search view state and its two transitions: Idle → Searching on user action,
//! Searching → Idle when the transport resolves.

use crate::api::{QueryError, SearchResponse, SearchTransport};
use crate::config::CONFIG;
use crate::data_models::{CaseSummary, LegalCase};

/// What a failed search does to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and otherwise ignore it. The loading flag is never cleared.
    KeepLoading,
    /// Clear the loading flag and record an error message for display.
    #[default]
    Surface,
}

/// How responses to overlapping searches are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Every response is applied; whichever resolves last owns the view.
    LastArrivalWins,
    /// Responses older than the most recently issued search are dropped.
    #[default]
    LatestRequestWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewOptions {
    pub on_failure: FailurePolicy,
    pub ordering: ResponseOrdering,
}

impl ViewOptions {
    /// Parity mode: failures leave the loading flag set and every response is applied
    /// in arrival order.
    pub fn faithful() -> Self {
        Self {
            on_failure: FailurePolicy::KeepLoading,
            ordering: ResponseOrdering::LastArrivalWins,
        }
    }

    pub fn from_config() -> Self {
        if CONFIG.faithful {
            Self::faithful()
        } else {
            Self::default()
        }
    }
}

/// Issued by [`SearchView::begin_search`]; hand it back to [`SearchView::complete`]
/// together with the transport's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    /// The bound query text, untrimmed.
    pub query: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct SearchView {
    query: String,
    cases: Vec<LegalCase>,
    case_summary: Option<CaseSummary>,
    is_loading: bool,
    error: Option<String>,
    options: ViewOptions,
    last_issued: u64,
}

impl SearchView {
    pub fn new(options: ViewOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cases(&self) -> &[LegalCase] {
        &self.cases
    }

    pub fn case_summary(&self) -> Option<&CaseSummary> {
        self.case_summary.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn options(&self) -> ViewOptions {
        self.options
    }

    /// Starts a search for the bound query. Returns `None` and touches nothing when the
    /// query is blank. A search already in flight does not block a new one.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        if self.query.trim().is_empty() {
            return None;
        }
        self.last_issued += 1;
        self.is_loading = true;
        self.error = None;
        log::debug!("search #{} started", self.last_issued);
        Some(SearchTicket {
            seq: self.last_issued,
            query: self.query.clone(),
        })
    }

    /// Applies the result of a search started with `ticket`.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        result: Result<SearchResponse, QueryError>,
    ) -> Outcome {
        if self.options.ordering == ResponseOrdering::LatestRequestWins
            && ticket.seq < self.last_issued
        {
            log::debug!(
                "dropping stale response for search #{} (latest is #{})",
                ticket.seq,
                self.last_issued
            );
            return Outcome::Stale;
        }

        match result {
            Ok(response) => {
                self.cases = response.cases;
                self.case_summary = response.web_summary;
                self.is_loading = false;
                Outcome::Applied
            }
            Err(e) => {
                log::error!("search #{} for {:?} failed: {:#}", ticket.seq, ticket.query, e);
                if self.options.on_failure == FailurePolicy::Surface {
                    self.error = Some(e.user_message());
                    self.is_loading = false;
                }
                Outcome::Failed
            }
        }
    }

    /// Runs one full search round trip. Returns `None` when the query was blank and no
    /// request was made.
    pub async fn search<T: SearchTransport>(&mut self, transport: &T) -> Option<Outcome> {
        let ticket = self.begin_search()?;
        let result = transport.search(&ticket.query).await;
        Some(self.complete(&ticket, result))
    }
}

#[cfg(test)]
fn response_named(names: &[&str]) -> SearchResponse {
    SearchResponse {
        is_valid: true,
        cases: names
            .iter()
            .map(|n| LegalCase {
                case_name: n.to_string(),
                ..Default::default()
            })
            .collect(),
        web_summary: None,
    }
}

#[test]
fn test_blank_query_does_not_start() {
    let mut view = SearchView::new(ViewOptions::default());
    for blank in ["", "   ", "\t\n "] {
        view.set_query(blank);
        assert_eq!(view.begin_search(), None);
        assert!(!view.is_loading());
    }
}

#[test]
fn test_ticket_carries_untrimmed_query() {
    let mut view = SearchView::new(ViewOptions::default());
    view.set_query("  breach of contract  ");
    let ticket = view.begin_search().unwrap();
    assert_eq!(ticket.query, "  breach of contract  ");
    assert_eq!(ticket.seq, 1);
    assert!(view.is_loading());
}

#[test]
fn test_stale_response_dropped_by_default() {
    let mut view = SearchView::new(ViewOptions::default());
    view.set_query("first");
    let first = view.begin_search().unwrap();
    view.set_query("second");
    let second = view.begin_search().unwrap();

    assert_eq!(view.complete(&second, Ok(response_named(&["B"]))), Outcome::Applied);
    assert_eq!(view.complete(&first, Ok(response_named(&["A"]))), Outcome::Stale);
    assert_eq!(view.cases()[0].case_name, "B");
    assert!(!view.is_loading());
}

#[test]
fn test_stale_response_keeps_loading_until_latest() {
    let mut view = SearchView::new(ViewOptions::default());
    view.set_query("first");
    let first = view.begin_search().unwrap();
    let second = view.begin_search().unwrap();

    assert_eq!(view.complete(&first, Ok(response_named(&["A"]))), Outcome::Stale);
    assert!(view.is_loading());
    assert!(view.cases().is_empty());

    view.complete(&second, Ok(response_named(&["B"])));
    assert!(!view.is_loading());
}

#[test]
fn test_new_search_clears_previous_error() {
    let mut view = SearchView::new(ViewOptions::default());
    view.set_query("q");
    let ticket = view.begin_search().unwrap();
    view.complete(&ticket, Err(QueryError::from_status(500, "boom")));
    assert_eq!(view.error(), Some("Search failed: boom"));

    view.begin_search().unwrap();
    assert_eq!(view.error(), None);
}

#[test]
fn test_stale_failure_dropped_by_default() {
    let mut view = SearchView::new(ViewOptions::default());
    view.set_query("first");
    let first = view.begin_search().unwrap();
    view.set_query("second");
    let _second = view.begin_search().unwrap();

    let outcome = view.complete(&first, Err(QueryError::from_status(500, "boom")));
    assert_eq!(outcome, Outcome::Stale);
    assert!(view.is_loading());
    assert_eq!(view.error(), None);
}
