use common::models::InvalidQuote;
use thiserror::Error;

/// Why a single (instrument, timeframe) cell produced no quote.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request error: {0}")]
    Http(reqwest::Error),

    #[error("provider answered with HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("provider error {code}: {message}")]
    Provider { code: u16, message: String },

    #[error("provider returned an empty series")]
    EmptySeries,

    #[error("malformed quote: {0}")]
    MalformedQuote(String),

    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key in its query string.
        Self::Http(err.without_url())
    }
}

impl From<InvalidQuote> for FetchError {
    fn from(err: InvalidQuote) -> Self {
        Self::MalformedQuote(err.to_string())
    }
}
