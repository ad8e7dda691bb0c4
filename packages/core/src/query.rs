//! Query specification for a crawl run.

use serde::{Deserialize, Serialize};

use crate::filter::FilterSpec;

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Maximum page size accepted by the remote search index.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Immutable description of one crawl run: free-text query, equality
/// constraints, an optional cap on distinct results, and the per-request
/// page size.
///
/// Constructed once from external input; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Free-text query forwarded to the remote index. Empty means "match all".
    pub query: Option<String>,
    /// Equality constraints turned into a filter expression.
    pub filter: FilterSpec,
    /// Maximum number of distinct items to collect. `None` crawls to
    /// exhaustion.
    pub limit: Option<usize>,
    /// Records requested per page, already clamped to `1..=MAX_PAGE_SIZE`.
    pub page_size: usize,
}

impl QuerySpec {
    /// Creates a spec with the page size clamped into `1..=MAX_PAGE_SIZE`.
    ///
    /// Downstream code relies on this clamp: the page fetcher passes the size
    /// through to the wire without re-checking it.
    #[must_use]
    pub fn new(
        query: Option<String>,
        filter: FilterSpec,
        limit: Option<usize>,
        page_size: usize,
    ) -> Self {
        Self {
            query,
            filter,
            limit,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Free-text query, with absence normalized to the empty string.
    #[must_use]
    pub fn query_text(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_oversized_page() {
        let spec = QuerySpec::new(None, FilterSpec::default(), None, 50_000);
        assert_eq!(spec.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn new_clamps_zero_page_to_one() {
        let spec = QuerySpec::new(None, FilterSpec::default(), None, 0);
        assert_eq!(spec.page_size, 1);
    }

    #[test]
    fn new_keeps_in_range_page() {
        let spec = QuerySpec::new(None, FilterSpec::default(), None, DEFAULT_PAGE_SIZE);
        assert_eq!(spec.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn query_text_defaults_to_empty() {
        let spec = QuerySpec::default();
        assert_eq!(spec.query_text(), "");

        let spec = QuerySpec::new(
            Some("web scraper".to_string()),
            FilterSpec::default(),
            None,
            100,
        );
        assert_eq!(spec.query_text(), "web scraper");
    }
}
