use thiserror::Error;

/// Everything that can go wrong while serving a single quote request.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("quote request exceeded its deadline")]
    NetworkTimeout,
    #[error("malformed quote payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to store quote: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("no storage connection available: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("storing quote exceeded its deadline")]
    StorageTimeout,
    #[error("request cancelled by server shutdown")]
    Cancelled,
    #[error("storage task aborted: {0}")]
    StorageTask(#[from] tokio::task::JoinError),
}
