//! HTTP glue for the archive browser: per-page fetches and the paginator
//! that walks a collection's `next` chain into one accumulated list.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use reqwest::Client;
use shared::{
    domain::{Record, ResourceKind},
    protocol::ResourcePage,
};
use tracing::{debug, info, warn};
use url::Url;

pub mod error;

pub use error::{FetchError, StatusCode};

/// Upper bound on pages followed in a single run. The real archive tops
/// out far below this; hitting the bound means the `next` chain never
/// terminates.
const MAX_PAGES: usize = 500;

/// Cooperative cancellation flag shared between a view and its fetch task.
///
/// Checked before each page request and once more before the accumulated
/// result is handed back.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Read-only client for the archive's collection endpoints.
pub struct ArchiveClient {
    http: Client,
    base_url: String,
}

impl ArchiveClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Collection endpoint for one resource kind.
    pub fn collection_url(&self, kind: ResourceKind) -> String {
        format!("{}/{}/", self.base_url, kind.route_segment())
    }

    /// Fetch one page. Transport failures, non-2xx statuses, and
    /// undecodable bodies are distinct errors, each naming the URL.
    pub async fn fetch_page(&self, url: &str) -> Result<ResourcePage, FetchError> {
        let response = self.http.get(url).send().await.map_err(|source| {
            FetchError::Transport {
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Walk a collection's page chain and return the concatenated records.
    ///
    /// Serial by construction: the next page is not requested until the
    /// current one resolves. Page order and in-page order are preserved;
    /// no reordering, filtering, or transformation. Any failure aborts the
    /// whole run and no partial accumulation escapes.
    pub async fn fetch_all(
        &self,
        kind: ResourceKind,
        cancel: &CancelToken,
    ) -> Result<Vec<Record>, FetchError> {
        let mut records = Vec::new();
        let mut next = Some(self.collection_url(kind));
        let mut pages = 0usize;

        while let Some(current) = next {
            if cancel.is_cancelled() {
                info!(kind = kind.route_segment(), pages, "fetch cancelled");
                return Err(FetchError::Cancelled);
            }
            if pages >= MAX_PAGES {
                warn!(
                    kind = kind.route_segment(),
                    limit = MAX_PAGES,
                    "page chain did not terminate"
                );
                return Err(FetchError::PageLimit { limit: MAX_PAGES });
            }

            let page = self.fetch_page(&current).await?;
            pages += 1;
            debug!(
                kind = kind.route_segment(),
                page = pages,
                records = page.results.len(),
                has_next = page.next.is_some(),
                "fetched collection page"
            );
            records.extend(page.results);
            next = match page.next {
                Some(pointer) => Some(resolve_next(&current, &pointer)?),
                None => None,
            };
        }

        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        info!(
            kind = kind.route_segment(),
            pages,
            records = records.len(),
            "collection fetch complete"
        );
        Ok(records)
    }
}

/// Resolve a `next` pointer against the page URL that produced it. The
/// archive serves absolute pointers; relative ones resolve too.
fn resolve_next(current: &str, pointer: &str) -> Result<String, FetchError> {
    let base = Url::parse(current).map_err(|source| FetchError::InvalidUrl {
        url: current.to_string(),
        source,
    })?;
    let resolved = base.join(pointer).map_err(|source| FetchError::InvalidUrl {
        url: pointer.to_string(),
        source,
    })?;
    Ok(resolved.into())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
