//! Typed failure surface for archive fetches.

use thiserror::Error;

pub use reqwest::StatusCode;

/// Everything that can go wrong while walking a collection's page chain.
///
/// A failed run never yields a partial accumulation; callers retry by
/// starting a fresh run, so a retry cannot duplicate or drop records.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode page payload from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid page URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("fetch cancelled")]
    Cancelled,
    #[error("page chain exceeded {limit} pages without terminating")]
    PageLimit { limit: usize },
}
