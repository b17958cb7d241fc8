//! Export coordinator - main orchestrator for the export process
//!
//! This module drives the page loop: provision the collection once, then
//! fetch, process and advance until the source returns an empty page, the
//! fetch-failure threshold is reached, or a shutdown is requested.

use crate::adapters::dry_run::DryRunDestination;
use crate::adapters::elasticsearch::ElasticsearchSource;
use crate::adapters::qdrant::QdrantDestination;
use crate::adapters::traits::{DestinationWriter, SourceReader};
use crate::config::EmbarkConfig;
use crate::core::embedding::{Embedder, ZeroEmbedder};
use crate::core::export::batch::{BatchConfig, BatchProcessor};
use crate::core::export::summary::{AbortReason, ExportOutcome, ExportSummary};
use crate::core::transform::RecordDecoder;
use crate::domain::Result;
use crate::{log_fetch_retry, log_page_complete};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Immutable settings for one export run
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub page_size: usize,
    pub max_consecutive_fetch_errors: usize,
    pub batch_pause: Duration,
    pub batch: BatchConfig,
    pub id_field: String,
    pub text_field: String,
    pub collection_name: String,
    pub dry_run: bool,
}

impl ExportSettings {
    /// Derive run settings from a loaded configuration
    pub fn from_config(config: &EmbarkConfig) -> Self {
        Self {
            page_size: config.export.page_size,
            max_consecutive_fetch_errors: config.export.max_consecutive_fetch_errors.max(1),
            batch_pause: Duration::from_millis(config.export.batch_pause_ms),
            batch: BatchConfig::new(
                config.qdrant.vector_size as usize,
                config.export.upsert_concurrency,
                config.export.progress_log_interval,
            ),
            id_field: config.elasticsearch.id_field.clone(),
            text_field: config.elasticsearch.text_field.clone(),
            collection_name: config.qdrant.collection_name.clone(),
            dry_run: config.export.dry_run,
        }
    }
}

/// Mutable loop state, local to one run
#[derive(Debug, Default)]
struct RunCounters {
    offset: usize,
    consecutive_fetch_errors: usize,
}

/// Export coordinator
pub struct ExportCoordinator {
    settings: ExportSettings,
    source: Arc<dyn SourceReader>,
    destination: Arc<dyn DestinationWriter>,
    batch_processor: BatchProcessor,
    embedder_dimension: usize,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator from explicit collaborators
    pub fn new(
        settings: ExportSettings,
        source: Arc<dyn SourceReader>,
        destination: Arc<dyn DestinationWriter>,
        embedder: Arc<dyn Embedder>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Self {
        let embedder_dimension = embedder.dimension();
        let decoder = RecordDecoder::new(settings.id_field.clone(), settings.text_field.clone());
        let batch_processor = BatchProcessor::new(
            destination.clone(),
            embedder,
            decoder,
            settings.batch.clone(),
        );

        Self {
            settings,
            source,
            destination,
            batch_processor,
            embedder_dimension,
            shutdown_signal,
        }
    }

    /// Create a coordinator wired to Elasticsearch and Qdrant
    ///
    /// With `export.dry_run` set, Qdrant is never contacted.
    ///
    /// # Errors
    ///
    /// Returns an error if either client cannot be constructed.
    pub fn from_config(
        config: &EmbarkConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let settings = ExportSettings::from_config(config);

        let source: Arc<dyn SourceReader> =
            Arc::new(ElasticsearchSource::new(&config.elasticsearch)?);

        let destination: Arc<dyn DestinationWriter> = if settings.dry_run {
            Arc::new(DryRunDestination::new(settings.collection_name.clone()))
        } else {
            Arc::new(QdrantDestination::new(&config.qdrant)?)
        };

        let embedder: Arc<dyn Embedder> = Arc::new(ZeroEmbedder::new(settings.batch.vector_size));

        Ok(Self::new(
            settings,
            source,
            destination,
            embedder,
            shutdown_signal,
        ))
    }

    /// Execute the export
    ///
    /// Fatal conditions are reported through [`ExportSummary::outcome`]
    /// rather than as an error, so counters are always available to the
    /// caller. Points written before an abort stay in the destination.
    pub async fn execute_export(&self) -> ExportSummary {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new(self.settings.dry_run);

        tracing::info!(
            collection = %self.settings.collection_name,
            page_size = self.settings.page_size,
            vector_size = self.settings.batch.vector_size,
            upsert_concurrency = self.settings.batch.upsert_concurrency,
            max_consecutive_fetch_errors = self.settings.max_consecutive_fetch_errors,
            dry_run = self.settings.dry_run,
            "Starting export process"
        );

        if self.embedder_dimension != self.settings.batch.vector_size {
            tracing::error!(
                embedder_dimension = self.embedder_dimension,
                vector_size = self.settings.batch.vector_size,
                "Embedder dimension does not match the collection vector size"
            );
            summary.outcome = ExportOutcome::Aborted(AbortReason::DimensionMismatch {
                expected: self.settings.batch.vector_size,
                actual: self.embedder_dimension,
            });
            return self.finish(summary, start_time);
        }

        if let Err(e) = self.destination.ensure_collection().await {
            tracing::error!(error = %e, "Failed to provision destination collection");
            summary.outcome = ExportOutcome::Aborted(AbortReason::Provision(e.to_string()));
            return self.finish(summary, start_time);
        }

        let mut counters = RunCounters::default();

        loop {
            if *self.shutdown_signal.borrow() {
                tracing::warn!(offset = counters.offset, "Shutdown requested, stopping export");
                summary.outcome = ExportOutcome::Interrupted;
                break;
            }

            let page = match self
                .source
                .fetch_page(counters.offset, self.settings.page_size)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    counters.consecutive_fetch_errors += 1;
                    summary.fetch_failures += 1;

                    let threshold = self.settings.max_consecutive_fetch_errors;
                    if counters.consecutive_fetch_errors >= threshold {
                        tracing::error!(
                            offset = counters.offset,
                            consecutive_failures = counters.consecutive_fetch_errors,
                            status = ?e.status_code(),
                            error = %e,
                            "Fetch failure threshold reached, aborting export"
                        );
                        summary.outcome = ExportOutcome::Aborted(AbortReason::FetchThreshold {
                            consecutive_failures: counters.consecutive_fetch_errors,
                            last_error: e.to_string(),
                        });
                        break;
                    }

                    log_fetch_retry!(
                        counters.offset,
                        counters.consecutive_fetch_errors,
                        self.settings.max_consecutive_fetch_errors,
                        e
                    );
                    self.pause().await;
                    continue;
                }
            };

            // Total is advisory; only an empty page ends the run.
            if page.is_empty() {
                tracing::info!(
                    offset = counters.offset,
                    total_count = page.total_count,
                    "Source returned an empty page"
                );
                summary.last_total_count = Some(page.total_count);
                summary.outcome = ExportOutcome::Completed;
                break;
            }

            counters.consecutive_fetch_errors = 0;
            summary.pages_fetched += 1;
            summary.last_total_count = Some(page.total_count);

            tracing::info!(
                offset = counters.offset,
                page_size = self.settings.page_size,
                records = page.len(),
                total_count = page.total_count,
                "Fetched page"
            );

            let result = self.batch_processor.process_page(page.records).await;

            summary.total_processed += result.successful as u64;
            summary.total_errors += result.failed as u64;
            summary.record_errors(result.errors);

            log_page_complete!(
                counters.offset,
                result.successful,
                result.failed,
                summary.total_processed,
                summary.total_errors
            );

            counters.offset += self.settings.page_size;
            self.pause().await;
        }

        self.finish(summary, start_time)
    }

    async fn pause(&self) {
        if !self.settings.batch_pause.is_zero() {
            tokio::time::sleep(self.settings.batch_pause).await;
        }
    }

    fn finish(&self, summary: ExportSummary, start_time: Instant) -> ExportSummary {
        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        summary
    }
}
