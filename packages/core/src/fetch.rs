//! Page fetching contract and fetch-level error taxonomy.
//!
//! A `PageFetcher` issues exactly one bounded request per call and never
//! retries internally; retry policy belongs to the pagination controller.
//! Transports implement this trait, tests substitute scripted fakes.

use async_trait::async_trait;

use crate::query::QuerySpec;
use crate::record::RawRecord;

/// One page of raw records plus an exhaustion hint.
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    /// Raw records in the order the remote source returned them.
    pub records: Vec<RawRecord>,
    /// Whether further pages might exist beyond this one. Set from the
    /// remote's explicit total when available, otherwise from the
    /// returned-count == requested-count heuristic.
    pub more: bool,
}

/// Failure modes of a single page fetch.
///
/// Payloads are plain strings so results stay cheap to clone and carry into
/// a `RunResult` for observability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure: connection refused, timeout, DNS.
    #[error("network error: {0}")]
    Network(String),
    /// The remote service answered with a non-success status.
    #[error("remote rejected request with status {status}: {body}")]
    RemoteRejected {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, useful for diagnostics.
        body: String,
    },
    /// The response body could not be parsed as the expected envelope.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Whether the pagination controller may retry this failure.
    ///
    /// Network faults, malformed bodies, and server-error statuses are
    /// transient. Client-error statuses mean the request itself is wrong and
    /// retrying cannot help.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Malformed(_) => true,
            Self::RemoteRejected { status, .. } => !(400..500).contains(status),
        }
    }
}

/// A source of result pages at increasing offsets.
///
/// Contract: one outbound request per call, no internal retries, no shared
/// state mutation. `page_size` arrives pre-clamped by `QuerySpec::new`;
/// implementations pass it through as-is.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page of `page_size` records starting at `offset`.
    async fn fetch(
        &self,
        query: &QuerySpec,
        offset: usize,
        page_size: usize,
    ) -> Result<PageResult, FetchError>;
}
