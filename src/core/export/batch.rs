//! Batch processing for page exports
//!
//! This module handles the decode, embed and upsert steps for the records of
//! one fetched page.

use crate::adapters::traits::DestinationWriter;
use crate::core::embedding::Embedder;
use crate::core::transform::RecordDecoder;
use crate::domain::{Point, RawRecord, WriteError};
use crate::log_record_progress;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Configuration for batch processing
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Dimensionality the destination collection expects
    pub vector_size: usize,
    /// Maximum number of upserts in flight within one page
    pub upsert_concurrency: usize,
    /// Emit a progress event every this many records (0 disables)
    pub progress_log_interval: usize,
}

impl BatchConfig {
    /// Create a new batch configuration
    pub fn new(vector_size: usize, upsert_concurrency: usize, progress_log_interval: usize) -> Self {
        Self {
            vector_size,
            upsert_concurrency: upsert_concurrency.max(1),
            progress_log_interval,
        }
    }
}

/// Result of processing a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Number of records successfully upserted
    pub successful: usize,
    /// Number of records whose write failed
    pub failed: usize,
    /// Errors encountered
    pub errors: Vec<String>,
}

impl BatchResult {
    /// Create a new empty batch result
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a successful write
    pub fn add_success(&mut self) {
        self.successful += 1;
    }

    /// Add a failed write
    pub fn add_failure(&mut self, error: String) {
        self.failed += 1;
        self.errors.push(error);
    }
}

/// Batch processor for fetched pages
pub struct BatchProcessor {
    destination: Arc<dyn DestinationWriter>,
    embedder: Arc<dyn Embedder>,
    decoder: RecordDecoder,
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a new batch processor
    pub fn new(
        destination: Arc<dyn DestinationWriter>,
        embedder: Arc<dyn Embedder>,
        decoder: RecordDecoder,
        config: BatchConfig,
    ) -> Self {
        Self {
            destination,
            embedder,
            decoder,
            config,
        }
    }

    /// Process every record of a page
    ///
    /// Write failures are counted and logged, never propagated: the page is
    /// always processed to the end. Results are tallied in source order even
    /// when several upserts run concurrently.
    pub async fn process_page(&self, records: Vec<RawRecord>) -> BatchResult {
        let mut result = BatchResult::new();

        if records.is_empty() {
            tracing::debug!("No records to process in page");
            return result;
        }

        let total = records.len();
        let outcomes: Vec<Result<u64, WriteError>> = stream::iter(records)
            .map(|raw| self.process_record(raw))
            .buffered(self.config.upsert_concurrency)
            .collect()
            .await;

        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(_) => result.add_success(),
                Err(e) => {
                    tracing::warn!(
                        point_id = ?e.point_id(),
                        error = %e,
                        "Failed to upsert point"
                    );
                    result.add_failure(e.to_string());
                }
            }

            let processed = index + 1;
            if self.config.progress_log_interval > 0
                && processed % self.config.progress_log_interval == 0
            {
                log_record_progress!(processed, total);
            }
        }

        result
    }

    /// Decode, embed and upsert one record, returning its id on success
    async fn process_record(&self, raw: RawRecord) -> Result<u64, WriteError> {
        let record = self.decoder.decode(&raw);
        let vector = self.embedder.embed(&record.text).await;

        if vector.len() != self.config.vector_size {
            return Err(WriteError::DimensionMismatch {
                id: record.id,
                expected: self.config.vector_size,
                actual: vector.len(),
            });
        }

        let payload = self.decoder.payload(&record);
        let id = record.id;
        self.destination
            .upsert_point(Point::new(id, vector, payload))
            .await?;

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::embedding::ZeroEmbedder;
    use crate::domain::ProvisionError;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingDestination {
        written: Mutex<Vec<Point>>,
        failing_ids: HashSet<u64>,
    }

    #[async_trait]
    impl DestinationWriter for RecordingDestination {
        async fn ensure_collection(&self) -> Result<(), ProvisionError> {
            Ok(())
        }

        async fn upsert_point(&self, point: Point) -> Result<(), WriteError> {
            if self.failing_ids.contains(&point.id) {
                return Err(WriteError::Upsert {
                    id: point.id,
                    message: "rejected".to_string(),
                });
            }
            self.written.lock().unwrap().push(point);
            Ok(())
        }
    }

    fn raw_records(ids: impl IntoIterator<Item = u64>) -> Vec<RawRecord> {
        ids.into_iter()
            .map(|id| {
                json!({"id": id, "text": format!("doc {id}")})
                    .as_object()
                    .cloned()
                    .unwrap()
            })
            .collect()
    }

    fn processor(destination: Arc<RecordingDestination>, embedder_dim: usize) -> BatchProcessor {
        BatchProcessor::new(
            destination,
            Arc::new(ZeroEmbedder::new(embedder_dim)),
            RecordDecoder::new("id", "text"),
            BatchConfig::new(4, 1, 0),
        )
    }

    #[test]
    fn test_batch_result_counts() {
        let mut result = BatchResult::new();
        result.add_success();
        result.add_failure("x".to_string());
        result.add_success();
        assert_eq!(result.successful, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.errors, vec!["x".to_string()]);
    }

    #[test]
    fn test_batch_config_clamps_concurrency() {
        assert_eq!(BatchConfig::new(4, 0, 0).upsert_concurrency, 1);
    }

    #[tokio::test]
    async fn test_process_page_writes_in_order() {
        let destination = Arc::new(RecordingDestination::default());
        let result = processor(destination.clone(), 4)
            .process_page(raw_records(1..=3))
            .await;

        assert_eq!(result.successful, 3);
        assert_eq!(result.failed, 0);
        let written = destination.written.lock().unwrap();
        let ids: Vec<u64> = written.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(written[0].payload["text"], json!("doc 1"));
        assert_eq!(written[0].vector.len(), 4);
    }

    #[tokio::test]
    async fn test_process_page_continues_after_failure() {
        let destination = Arc::new(RecordingDestination {
            failing_ids: HashSet::from([2]),
            ..Default::default()
        });
        let result = processor(destination.clone(), 4)
            .process_page(raw_records(1..=3))
            .await;

        assert_eq!(result.successful, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(destination.written.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_a_write_failure() {
        let destination = Arc::new(RecordingDestination::default());
        let result = processor(destination.clone(), 3)
            .process_page(raw_records([1]))
            .await;

        assert_eq!(result.failed, 1);
        assert!(result.errors[0].contains("expects 4"));
        assert!(destination.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_page() {
        let destination = Arc::new(RecordingDestination::default());
        let result = processor(destination, 4).process_page(Vec::new()).await;
        assert_eq!(result, BatchResult::new());
    }
}
