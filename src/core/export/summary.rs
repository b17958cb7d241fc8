//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Maximum number of write error messages kept on the summary
pub const MAX_RECORDED_ERRORS: usize = 100;

/// How an export run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The source returned an empty page
    Completed,
    /// The run stopped on a fatal condition
    Aborted(AbortReason),
    /// A shutdown signal was received between pages
    Interrupted,
}

/// Fatal condition that stopped an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The destination collection could not be verified or created
    Provision(String),
    /// Too many page fetches failed in a row
    FetchThreshold {
        consecutive_failures: usize,
        last_error: String,
    },
    /// The embedder produces vectors the collection cannot store
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::Provision(message) => write!(f, "provisioning failed: {message}"),
            AbortReason::FetchThreshold {
                consecutive_failures,
                last_error,
            } => write!(
                f,
                "{consecutive_failures} consecutive fetch failures, last: {last_error}"
            ),
            AbortReason::DimensionMismatch { expected, actual } => write!(
                f,
                "embedder produces {actual} dimensions, collection expects {expected}"
            ),
        }
    }
}

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// How the run ended
    pub outcome: ExportOutcome,

    /// Number of records successfully upserted
    pub total_processed: u64,

    /// Number of records whose write failed
    pub total_errors: u64,

    /// Number of non-empty pages fetched
    pub pages_fetched: u64,

    /// Number of failed fetch attempts over the whole run
    pub fetch_failures: u64,

    /// Total count reported by the most recent successful fetch
    pub last_total_count: Option<u64>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Duration of the export
    pub duration: Duration,

    /// First write errors encountered, capped at [`MAX_RECORDED_ERRORS`]
    pub errors: Vec<String>,

    /// Whether writes were skipped
    pub dry_run: bool,
}

impl ExportSummary {
    /// Create a new summary for a run starting now
    pub fn new(dry_run: bool) -> Self {
        Self {
            outcome: ExportOutcome::Completed,
            total_processed: 0,
            total_errors: 0,
            pages_fetched: 0,
            fetch_failures: 0,
            last_total_count: None,
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            errors: Vec::new(),
            dry_run,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the outcome
    pub fn with_outcome(mut self, outcome: ExportOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    /// Record write error messages, keeping at most [`MAX_RECORDED_ERRORS`]
    pub fn record_errors(&mut self, errors: impl IntoIterator<Item = String>) {
        let room = MAX_RECORDED_ERRORS.saturating_sub(self.errors.len());
        self.errors.extend(errors.into_iter().take(room));
    }

    /// Process exit code for this outcome
    ///
    /// Write errors alone do not fail a completed run.
    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            ExportOutcome::Completed => 0,
            ExportOutcome::Aborted(AbortReason::FetchThreshold { .. }) => 1,
            ExportOutcome::Aborted(AbortReason::DimensionMismatch { .. }) => 2,
            ExportOutcome::Aborted(AbortReason::Provision(_)) => 4,
            ExportOutcome::Interrupted => 130,
        }
    }

    /// Get success rate as a percentage of attempted writes
    pub fn success_rate(&self) -> f64 {
        let attempted = self.total_processed + self.total_errors;
        if attempted == 0 {
            return 100.0;
        }
        (self.total_processed as f64 / attempted as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        match &self.outcome {
            ExportOutcome::Completed => tracing::info!(
                total_processed = self.total_processed,
                total_errors = self.total_errors,
                pages_fetched = self.pages_fetched,
                fetch_failures = self.fetch_failures,
                duration_secs = self.duration.as_secs(),
                success_rate = format!("{:.2}%", self.success_rate()),
                dry_run = self.dry_run,
                "Export completed"
            ),
            ExportOutcome::Aborted(reason) => tracing::error!(
                total_processed = self.total_processed,
                total_errors = self.total_errors,
                pages_fetched = self.pages_fetched,
                fetch_failures = self.fetch_failures,
                duration_secs = self.duration.as_secs(),
                reason = %reason,
                "Export aborted"
            ),
            ExportOutcome::Interrupted => tracing::warn!(
                total_processed = self.total_processed,
                total_errors = self.total_errors,
                pages_fetched = self.pages_fetched,
                duration_secs = self.duration.as_secs(),
                "Export interrupted"
            ),
        }

        if self.total_errors > 0 {
            tracing::warn!(
                error_count = self.total_errors,
                recorded = self.errors.len(),
                "Export finished with write errors"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_summary() {
        let summary = ExportSummary::new(false);
        assert_eq!(summary.outcome, ExportOutcome::Completed);
        assert_eq!(summary.total_processed, 0);
        assert_eq!(summary.success_rate(), 100.0);
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_exit_codes() {
        let threshold = ExportSummary::new(false).with_outcome(ExportOutcome::Aborted(
            AbortReason::FetchThreshold {
                consecutive_failures: 5,
                last_error: "refused".to_string(),
            },
        ));
        let provision = ExportSummary::new(false).with_outcome(ExportOutcome::Aborted(
            AbortReason::Provision("denied".to_string()),
        ));
        let interrupted = ExportSummary::new(false).with_outcome(ExportOutcome::Interrupted);
        let mismatch = ExportSummary::new(false).with_outcome(ExportOutcome::Aborted(
            AbortReason::DimensionMismatch {
                expected: 1536,
                actual: 384,
            },
        ));

        assert_eq!(threshold.exit_code(), 1);
        assert_eq!(mismatch.exit_code(), 2);
        assert_eq!(provision.exit_code(), 4);
        assert_eq!(interrupted.exit_code(), 130);
    }

    #[test]
    fn test_write_errors_do_not_fail_run() {
        let mut summary = ExportSummary::new(false);
        summary.total_processed = 9;
        summary.total_errors = 1;
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(summary.success_rate(), 90.0);
    }

    #[test]
    fn test_record_errors_is_capped() {
        let mut summary = ExportSummary::new(false);
        summary.record_errors((0..70).map(|i| format!("e{i}")));
        summary.record_errors((70..150).map(|i| format!("e{i}")));
        assert_eq!(summary.errors.len(), MAX_RECORDED_ERRORS);
        assert_eq!(summary.errors[99], "e99");
    }

    #[test]
    fn test_abort_reason_display() {
        let reason = AbortReason::FetchThreshold {
            consecutive_failures: 5,
            last_error: "HTTP 503".to_string(),
        };
        assert_eq!(
            reason.to_string(),
            "5 consecutive fetch failures, last: HTTP 503"
        );
    }
}
