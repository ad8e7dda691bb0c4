//! Reqwest-backed page fetcher for the remote search index.
//!
//! One POST per `fetch` call, no internal retries, no shared-state mutation.
//! Retry policy and offset sequencing live in the pagination controller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use skimmer_core::{FetchError, PageFetcher, PageResult, QuerySpec, RawRecord};

use crate::config::SearchEndpoint;

/// Wire request body for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SearchRequest {
    /// Free-text query; empty matches everything.
    pub query: String,
    /// Boolean filter expression; omitted entirely when no filter is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<String>,
    /// Requested page size.
    pub length: usize,
    /// Records to skip before this page.
    pub offset: usize,
}

/// Wire response envelope. Only the fields the pipeline reads; everything
/// else in the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    /// Raw records for this page.
    #[serde(default)]
    pub hits: Vec<RawRecord>,
    /// Total matching records, when the index reports it.
    #[serde(default, rename = "nbHits")]
    pub nb_hits: Option<u64>,
}

impl SearchResponse {
    /// Whether pages beyond `offset` might exist.
    ///
    /// A short page always signals exhaustion, whatever the reported total:
    /// indexes cap the retrievable offset below `nbHits`, and trusting the
    /// total alone would page through an unbounded tail of empty pages past
    /// that cap. An exact total only refines the full-page heuristic by
    /// saving the final wasted fetch.
    pub(crate) fn has_more(&self, offset: usize, requested: usize) -> bool {
        self.hits.len() == requested
            && self
                .nb_hits
                .is_none_or(|total| (offset as u64).saturating_add(self.hits.len() as u64) < total)
    }
}

/// `PageFetcher` over HTTP POST, speaking the Algolia-style query protocol.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    endpoint: SearchEndpoint,
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (TLS backend initialization failure).
    pub fn new(endpoint: SearchEndpoint) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(endpoint.timeout)
            .build()?;
        Ok(Self { endpoint, client })
    }

    fn request_body(query: &QuerySpec, offset: usize, page_size: usize) -> SearchRequest {
        SearchRequest {
            query: query.query_text().to_string(),
            filters: query.filter.build(),
            length: page_size,
            offset,
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(
        &self,
        query: &QuerySpec,
        offset: usize,
        page_size: usize,
    ) -> Result<PageResult, FetchError> {
        let body = Self::request_body(query, offset, page_size);
        debug!(offset, page_size, filters = ?body.filters, "issuing search request");

        let response = self
            .client
            .post(&self.endpoint.url)
            .header("X-Algolia-Application-Id", &self.endpoint.app_id)
            .header("X-Algolia-API-Key", &self.endpoint.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let envelope: SearchResponse =
            serde_json::from_str(&text).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let more = envelope.has_more(offset, page_size);
        debug!(hits = envelope.hits.len(), nb_hits = ?envelope.nb_hits, more, "page received");

        Ok(PageResult {
            records: envelope.hits,
            more,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use skimmer_core::FilterSpec;

    use super::*;

    #[test]
    fn request_body_omits_absent_filters() {
        let query = QuerySpec::new(Some("scraper".to_string()), FilterSpec::default(), None, 100);
        let body = HttpPageFetcher::request_body(&query, 0, 100);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({ "query": "scraper", "length": 100, "offset": 0 })
        );
    }

    #[test]
    fn request_body_carries_filter_expression() {
        let filter = FilterSpec {
            identifier: Some("abc".to_string()),
            username: None,
        };
        let query = QuerySpec::new(None, filter, None, 50);
        let body = HttpPageFetcher::request_body(&query, 150, 50);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({
                "query": "",
                "filters": "identifier:\"abc\"",
                "length": 50,
                "offset": 150,
            })
        );
    }

    #[test]
    fn response_tolerates_missing_nb_hits() {
        let envelope: SearchResponse = serde_json::from_value(json!({
            "hits": [{ "objectID": "a" }],
        }))
        .unwrap();
        assert_eq!(envelope.hits.len(), 1);
        assert_eq!(envelope.nb_hits, None);
    }

    #[test]
    fn has_more_refines_full_page_with_explicit_total() {
        let envelope: SearchResponse = serde_json::from_value(json!({
            "hits": [{}, {}],
            "nbHits": 2,
        }))
        .unwrap();
        // Full page, but the total says we have everything.
        assert!(!envelope.has_more(0, 2));

        let envelope: SearchResponse = serde_json::from_value(json!({
            "hits": [{}, {}],
            "nbHits": 10,
        }))
        .unwrap();
        assert!(envelope.has_more(0, 2));
    }

    #[test]
    fn short_page_signals_exhaustion_despite_larger_total() {
        // Indexes cap the retrievable offset below the reported total; a
        // short or empty page must stop the run even when nbHits says more
        // records exist somewhere past the cap.
        let empty: SearchResponse = serde_json::from_value(json!({
            "hits": [],
            "nbHits": 4000,
        }))
        .unwrap();
        assert!(
            !empty.has_more(1000, 100),
            "empty page must signal exhaustion"
        );

        let short: SearchResponse = serde_json::from_value(json!({
            "hits": [{}],
            "nbHits": 4000,
        }))
        .unwrap();
        assert!(!short.has_more(1000, 100));
    }

    #[test]
    fn has_more_falls_back_to_count_heuristic() {
        let full: SearchResponse = serde_json::from_value(json!({ "hits": [{}, {}] })).unwrap();
        assert!(full.has_more(0, 2));

        let short: SearchResponse = serde_json::from_value(json!({ "hits": [{}] })).unwrap();
        assert!(!short.has_more(0, 2));
    }

    #[test]
    fn response_tolerates_extra_envelope_fields() {
        let envelope: SearchResponse = serde_json::from_value(json!({
            "hits": [],
            "nbHits": 0,
            "page": 0,
            "processingTimeMS": 3,
        }))
        .unwrap();
        assert!(envelope.hits.is_empty());
    }
}
