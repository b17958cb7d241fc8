//! Logging and observability
//!
//! This module provides structured logging with:
//! - Human-readable console output
//! - Optional JSON file logging with rotation
//! - `RUST_LOG` overrides of the configured level
//!
//! # Example
//!
//! ```no_run
//! use embark::logging::init_logging;
//! use embark::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(index = "documents", "Export started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the completion of one page
///
/// # Example
///
/// ```no_run
/// use embark::log_page_complete;
///
/// log_page_complete!(1000, 998, 2, 5000, 3);
/// ```
#[macro_export]
macro_rules! log_page_complete {
    ($offset:expr, $successful:expr, $failed:expr, $total_processed:expr, $total_errors:expr) => {
        tracing::info!(
            offset = $offset,
            successful = $successful,
            failed = $failed,
            total_processed = $total_processed,
            total_errors = $total_errors,
            "Page completed"
        );
    };
}

/// Log a retry of a failed page fetch
///
/// # Example
///
/// ```no_run
/// use embark::log_fetch_retry;
///
/// log_fetch_retry!(0, 2, 5, "connection refused");
/// ```
#[macro_export]
macro_rules! log_fetch_retry {
    ($offset:expr, $attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            offset = $offset,
            consecutive_failures = $attempt,
            max_consecutive_failures = $max_attempts,
            reason = %$reason,
            "Failed to fetch page, retrying"
        );
    };
}

/// Log in-page progress
///
/// # Example
///
/// ```no_run
/// use embark::log_record_progress;
///
/// log_record_progress!(100, 1000);
/// ```
#[macro_export]
macro_rules! log_record_progress {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing page"
        );
    };
}
