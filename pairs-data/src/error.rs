use pairs_analytics::AnalysisError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors generated in `pairs-data`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize, Error)]
pub enum FetchError {
    #[error("No data found for ticker: {ticker}. Please try again.")]
    NotFound { ticker: String },

    #[error("invalid data source configuration: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("failed to parse price history: {0}")]
    Parse(String),

    #[error("price history API error for {ticker}: {message}")]
    Api { ticker: String, message: String },

    #[error("price history for {ticker} is malformed: {source}")]
    InvalidSeries {
        ticker: String,
        source: AnalysisError,
    },
}

impl FetchError {
    /// Determine if retrying the same request could succeed.
    #[allow(clippy::match_like_matches_macro)]
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(_) => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Parse(value.to_string())
        } else {
            Self::Http(value.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}
