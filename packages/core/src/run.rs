//! Run-level result types.

use serde::{Deserialize, Serialize};

use crate::fetch::FetchError;
use crate::record::DatasetItem;

/// Terminal status of a crawl run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunStatus {
    /// The remote source was exhausted before any limit was reached.
    Complete,
    /// The configured item limit was reached.
    LimitReached,
    /// A retryable failure persisted past the retry budget.
    ExhaustedRetries,
    /// A non-retryable failure aborted the run.
    AbortedOnError,
    /// The run was cancelled externally.
    Cancelled,
}

impl RunStatus {
    /// Whether the run ended without aborting. Partial results are still
    /// returned for aborted runs; this only distinguishes the terminal cause.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Complete | Self::LimitReached)
    }
}

/// Final outcome of a crawl run.
///
/// Items are ordered by first insertion and deduplicated by identifier.
/// Aborted runs carry whatever accumulated before the abort; partial results
/// are valid output, not a total failure.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Deduplicated items in first-insertion order.
    pub items: Vec<DatasetItem>,
    /// Raw records rejected by normalization.
    pub rejected: u64,
    /// Duplicate records dropped by the sink.
    pub duplicates: u64,
    /// How the run ended.
    pub status: RunStatus,
    /// The fetch error that ended the run, when one did.
    pub error: Option<FetchError>,
}
