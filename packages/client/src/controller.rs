//! Pagination controller: drives the page fetcher across increasing offsets
//! until the limit is hit, the source is exhausted, the retry budget is
//! spent, or the run is cancelled.
//!
//! Phase machine: `Fetching -> Normalizing -> (Fetching | Finished)`, with a
//! `Backoff` phase between failed fetches. Fetches are strictly sequential;
//! pages are causally ordered offsets and the remote service is rate-limited.

use tracing::{debug, info, warn};

use skimmer_core::{
    normalize, DatasetSink, FetchError, PageFetcher, PageResult, QuerySpec, RunResult, RunStatus,
};

use crate::backoff::delay_for_attempt;
use crate::cancel::CancelToken;
use crate::config::RetryConfig;

/// Run loop phase. Terminal phases carry the status they resolve to.
#[derive(Debug)]
enum Phase {
    /// Run constructed, nothing fetched yet.
    Idle,
    /// About to issue the fetch for the current offset.
    Fetching,
    /// Feeding a fetched page through normalization into the sink.
    Normalizing(PageResult),
    /// Waiting out the backoff delay after a retryable failure.
    Backoff(FetchError),
    /// The run is over.
    Finished(RunStatus, Option<FetchError>),
}

/// Drives one crawl run over a `PageFetcher`.
///
/// All run state (current offset, retry counter, accumulated sink) is private
/// to a single `run` call; a controller can be reused across runs.
#[derive(Debug)]
pub struct PaginationController<F> {
    fetcher: F,
    retry: RetryConfig,
}

impl<F: PageFetcher> PaginationController<F> {
    /// Creates a controller with the given fetcher and retry policy.
    pub fn new(fetcher: F, retry: RetryConfig) -> Self {
        Self { fetcher, retry }
    }

    /// Executes the run to completion and returns the accumulated dataset.
    ///
    /// Never returns an error: fetch failures, cancellation, and exhausted
    /// retries all surface as the `status` and `error` fields of the result,
    /// alongside whatever items accumulated before the run ended.
    pub async fn run(&self, query: &QuerySpec, mut cancel: CancelToken) -> RunResult {
        let mut sink = DatasetSink::new();
        let mut rejected: u64 = 0;
        let mut offset: usize = 0;
        let mut attempt: u32 = 0;
        let mut pages: u64 = 0;

        let mut phase = Phase::Idle;
        let (status, error) = loop {
            phase = match phase {
                Phase::Idle => {
                    debug!(
                        query = query.query_text(),
                        filters = ?query.filter.build(),
                        limit = ?query.limit,
                        page_size = query.page_size,
                        "run starting"
                    );
                    Phase::Fetching
                }
                Phase::Fetching => {
                    if cancel.is_cancelled() {
                        Phase::Finished(RunStatus::Cancelled, None)
                    } else if limit_reached(query, &sink) {
                        Phase::Finished(RunStatus::LimitReached, None)
                    } else {
                        debug!(offset, attempt, "fetching page");
                        match self.fetcher.fetch(query, offset, query.page_size).await {
                            Ok(page) => Phase::Normalizing(page),
                            Err(err) if err.is_retryable() => Phase::Backoff(err),
                            Err(err) => {
                                warn!(offset, error = %err, "non-retryable failure, aborting");
                                Phase::Finished(RunStatus::AbortedOnError, Some(err))
                            }
                        }
                    }
                }
                Phase::Normalizing(page) => {
                    attempt = 0;
                    pages += 1;
                    for raw in &page.records {
                        if limit_reached(query, &sink) {
                            break;
                        }
                        match normalize(raw) {
                            Ok(item) => {
                                sink.append(item);
                            }
                            Err(reason) => {
                                rejected += 1;
                                warn!(offset, %reason, "rejected record");
                            }
                        }
                    }
                    debug!(offset, kept = sink.len(), rejected, "page normalized");

                    if limit_reached(query, &sink) {
                        Phase::Finished(RunStatus::LimitReached, None)
                    } else if page.more {
                        offset += query.page_size;
                        Phase::Fetching
                    } else {
                        Phase::Finished(RunStatus::Complete, None)
                    }
                }
                Phase::Backoff(err) => {
                    attempt += 1;
                    if attempt >= self.retry.max_attempts {
                        warn!(
                            offset,
                            attempts = attempt,
                            error = %err,
                            "retry budget exhausted"
                        );
                        Phase::Finished(RunStatus::ExhaustedRetries, Some(err))
                    } else {
                        let delay = delay_for_attempt(attempt - 1, &self.retry);
                        warn!(offset, attempt, ?delay, error = %err, "retrying after backoff");
                        tokio::select! {
                            () = cancel.cancelled() => {
                                Phase::Finished(RunStatus::Cancelled, None)
                            }
                            () = tokio::time::sleep(delay) => Phase::Fetching,
                        }
                    }
                }
                Phase::Finished(status, error) => break (status, error),
            };
        };

        info!(
            pages,
            items = sink.len(),
            duplicates = sink.duplicates(),
            rejected,
            ?status,
            "run finished"
        );

        RunResult {
            rejected,
            duplicates: sink.duplicates(),
            items: sink.into_items(),
            status,
            error,
        }
    }
}

/// Whether the sink's distinct-item count has reached the configured limit.
fn limit_reached(query: &QuerySpec, sink: &DatasetSink) -> bool {
    query.limit.is_some_and(|limit| sink.len() >= limit)
}
