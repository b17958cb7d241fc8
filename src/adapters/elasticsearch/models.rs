//! Elasticsearch search API request and response models

use crate::domain::{Page, RawRecord};
use serde::{Deserialize, Serialize};

/// Default `index.max_result_window`: `from + size` may not go past it
pub const MAX_RESULT_WINDOW: u64 = 10_000;

/// Documents a `from`/`size` walk can reach in an index of `total` documents
pub fn reachable_documents(total: u64) -> u64 {
    total.min(MAX_RESULT_WINDOW)
}

/// Paged match-all search request
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    /// Number of hits to return
    pub size: usize,

    /// Offset of the first hit
    pub from: usize,

    /// Ask for an exact total instead of the default 10k lower bound
    pub track_total_hits: bool,

    /// Fields to return from each document
    #[serde(rename = "_source")]
    pub source: Vec<&'a str>,

    /// Query clause
    pub query: MatchAllQuery,
}

impl<'a> SearchRequest<'a> {
    /// Build a match-all request for one page, restricted to `fields`
    pub fn match_all(from: usize, size: usize, fields: Vec<&'a str>) -> Self {
        Self {
            size,
            from,
            track_total_hits: true,
            source: fields,
            query: MatchAllQuery::default(),
        }
    }
}

/// `{"match_all": {}}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchAllQuery {
    pub match_all: EmptyObject,
}

/// Serializes as `{}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyObject {}

/// Search response, reduced to the parts the export reads
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub hits: HitsContainer,
}

/// `hits` object of a search response
#[derive(Debug, Clone, Deserialize)]
pub struct HitsContainer {
    #[serde(default)]
    pub total: Option<TotalHits>,

    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// Total hit count, either `{"value": n, "relation": "eq"}` or a bare integer
/// as returned by Elasticsearch 6.x
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Object { value: u64 },
    Count(u64),
}

impl TotalHits {
    pub fn value(&self) -> u64 {
        match self {
            TotalHits::Object { value } | TotalHits::Count(value) => *value,
        }
    }
}

/// A single search hit
#[derive(Debug, Clone, Deserialize)]
pub struct Hit {
    #[serde(rename = "_source", default)]
    pub source: Option<RawRecord>,
}

impl SearchResponse {
    /// Convert into a [`Page`], keeping hit order
    ///
    /// A hit without `_source` becomes an empty raw record so the decoder can
    /// still count it.
    pub fn into_page(self) -> Page {
        let total_count = self.hits.total.as_ref().map(TotalHits::value).unwrap_or(0);
        let records = self
            .hits
            .hits
            .into_iter()
            .map(|hit| hit.source.unwrap_or_default())
            .collect();
        Page::new(total_count, records)
    }
}
