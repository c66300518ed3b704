//! Failure taxonomy for the remote rate and conversion lookups.
//!
//! These never reach the widget: the fetchers turn every variant into
//! `RateOutcome::NoData` or `FormattedAmount::Blank` and only log the detail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No rate data for {base} to {target}")]
    NoData { base: String, target: String },

    #[error("Invalid amount: {0:?}")]
    Validation(String),

    #[error("Conversion rejected: {0}")]
    Rejected(String),
}

pub type FetchResult<T> = Result<T, FetchError>;
