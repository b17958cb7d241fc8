//! Export orchestration and batch processing
//!
//! This module provides the core export logic for Embark, including:
//! - Per-page decode, embed and upsert processing
//! - The page loop with its fetch-failure threshold
//! - Summary and reporting

pub mod batch;
pub mod coordinator;
pub mod summary;

pub use batch::{BatchConfig, BatchProcessor, BatchResult};
pub use coordinator::{ExportCoordinator, ExportSettings};
pub use summary::{AbortReason, ExportOutcome, ExportSummary};
