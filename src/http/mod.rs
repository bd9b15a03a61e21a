pub mod error;
pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

pub use error::SearchError;
pub use gemini::GeminiClient;

/// Shown in place of an answer whenever a search fails for any reason.
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub text: String,
    pub sources: Vec<Source>,
}

impl SearchResult {
    pub fn failed() -> Self {
        Self {
            text: SEARCH_FAILED_MESSAGE.to_string(),
            sources: Vec::new(),
        }
    }
}

/// One request to a generative search provider.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn generate(&self, query: &str) -> Result<SearchResult, SearchError>;
}

/// Search entry point used by the UI. Never fails: provider errors are
/// logged and turned into [`SearchResult::failed`].
#[derive(Clone)]
pub struct SearchClient {
    backend: Arc<dyn SearchBackend>,
}

impl SearchClient {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    pub async fn search(&self, query: &str) -> SearchResult {
        match self.backend.generate(query).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "search_failed");
                if let SearchError::Status { body, .. } = &e {
                    error!(body = body.as_str(), "search_failed_body");
                }
                SearchResult::failed()
            }
        }
    }
}
