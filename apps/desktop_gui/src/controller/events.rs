//! UI/backend events and error modeling for the desktop controller.

use client_core::FetchError;
use shared::domain::{Record, ResourceKind};

pub enum UiEvent {
    /// A paginator run finished; the full accumulation arrives at once.
    RecordsLoaded {
        kind: ResourceKind,
        generation: u64,
        records: Vec<Record>,
    },
    FetchFailed {
        kind: ResourceKind,
        generation: u64,
        error: UiError,
    },
    /// The worker thread itself could not start or died.
    WorkerFailed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Upstream,
    Payload,
    Unknown,
}

impl UiErrorCategory {
    pub fn headline(self) -> &'static str {
        match self {
            Self::Transport => "Network problem",
            Self::Upstream => "Archive error",
            Self::Payload => "Unexpected payload",
            Self::Unknown => "Unexpected failure",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    pub fn from_fetch(err: &FetchError) -> Self {
        let category = match err {
            FetchError::Transport { .. } => UiErrorCategory::Transport,
            FetchError::Status { .. } | FetchError::PageLimit { .. } => UiErrorCategory::Upstream,
            FetchError::Decode { .. } | FetchError::InvalidUrl { .. } => UiErrorCategory::Payload,
            FetchError::Cancelled => UiErrorCategory::Unknown,
        };
        Self {
            category,
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// One-line guidance for transport flavors users can act on.
    pub fn hint(&self) -> Option<&'static str> {
        if self.category != UiErrorCategory::Transport {
            return None;
        }
        classify_transport_failure(&self.message)
    }
}

pub fn classify_transport_failure(message: &str) -> Option<&'static str> {
    let lower = message.to_ascii_lowercase();
    if lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
        || lower.contains("failed to connect")
    {
        Some("Archive unreachable; check the API URL and your network, then retry.")
    } else {
        None
    }
}
