use thiserror::Error;

/// Everything that can go wrong between submitting a query and holding a
/// parsed answer. The search client folds all of these into the fallback
/// result, so they only ever reach the log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("search request failed: {0}")]
    Request(String),

    #[error("search provider returned status {status}")]
    Status { status: u16, body: String },

    #[error("search response parse failed: {0}")]
    Parse(String),
}
