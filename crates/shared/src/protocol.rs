//! Wire payloads for the archive's collection endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::Record;

/// One page of a paginated collection response.
///
/// Fields beyond these are ignored. A missing `next` means the page chain
/// is exhausted; a missing `results` is a decode error surfaced to the
/// caller rather than an empty page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<Record>,
}
