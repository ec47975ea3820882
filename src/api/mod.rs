use std::future::Future;

pub mod client;
pub mod error;
pub mod models;

pub use client::QueryClient;
pub use error::QueryError;
pub use models::{HealthResponse, SearchRequest, SearchResponse};

/// Something that can run a search query against the backend.
pub trait SearchTransport {
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<SearchResponse, QueryError>> + Send;
}
