//! Source and destination abstraction traits
//!
//! The export loop only talks to these traits, so the Elasticsearch and
//! Qdrant adapters can be swapped for in-memory implementations in tests.

use crate::domain::{FetchError, Page, Point, ProvisionError, WriteError};
use async_trait::async_trait;

/// Paginated reader over the source collection
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Fetch `page_size` records starting at `offset`, plus the
    /// source-reported total match count
    ///
    /// Implementations do not retry; the caller owns the retry policy.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport, authentication or decode failure.
    async fn fetch_page(&self, offset: usize, page_size: usize) -> Result<Page, FetchError>;
}

/// Writer for the destination collection
#[async_trait]
pub trait DestinationWriter: Send + Sync {
    /// Create the destination collection if it does not exist yet
    ///
    /// Idempotent: an existing collection is left untouched.
    ///
    /// # Errors
    ///
    /// Returns a [`ProvisionError`] if existence cannot be verified or the
    /// collection cannot be created.
    async fn ensure_collection(&self) -> Result<(), ProvisionError>;

    /// Insert or replace a single point by id
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError`] if the destination rejects the write.
    async fn upsert_point(&self, point: Point) -> Result<(), WriteError>;
}
