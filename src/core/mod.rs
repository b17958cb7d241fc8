//! Core business logic for Embark.
//!
//! This module contains the core business logic and orchestration for exports.
//!
//! # Modules
//!
//! - [`export`] - Export orchestration, batch processing, and coordination
//! - [`transform`] - Decoding raw source documents into records
//! - [`embedding`] - Text to vector conversion
//!
//! # Export Workflow
//!
//! 1. **Provision**: Create the Qdrant collection if it is missing
//! 2. **Fetch**: Read one page from Elasticsearch at the current offset
//! 3. **Process**: Decode, embed and upsert each record of the page
//! 4. **Advance**: Move the offset by one page and pause briefly
//! 5. **Report**: Stop on an empty page and log the export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use embark::config::load_config;
//! use embark::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("embark.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = ExportCoordinator::from_config(&config, shutdown_rx)?;
//!
//! let summary = coordinator.execute_export().await;
//!
//! println!("Processed: {}", summary.total_processed);
//! println!("Errors: {}", summary.total_errors);
//! # Ok(())
//! # }
//! ```

pub mod embedding;
pub mod export;
pub mod transform;
