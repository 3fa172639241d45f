//! Fetch failure type.

use thiserror::Error;

/// Errors that can occur while fetching tickers.
///
/// All of them are handled the same way at the poll boundary: logged, with
/// the dashboard left as it was.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, timeout or non-success HTTP status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Body was not a valid tickers response.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
    /// The exchange answered with a non-zero code.
    #[error("Exchange error {code}: {msg}")]
    Api { code: String, msg: String },
}
