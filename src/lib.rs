// Embark - Elasticsearch to Qdrant export tool
// Copyright (c) 2025 Embark Contributors
// Licensed under the MIT License

//! # Embark - Elasticsearch to Qdrant export
//!
//! Embark is a batch ETL tool built in Rust that pages through an
//! Elasticsearch index, embeds each document's text and upserts the result
//! as points into a Qdrant collection.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Extracting** documents with paged `from`/`size` match-all searches
//! - **Decoding** heterogeneous `_source` maps into id/text records
//! - **Embedding** text into fixed-length vectors
//! - **Loading** points into Qdrant, creating the collection on first run
//!
//! ## Architecture
//!
//! Embark follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export loop, decoding, embedding)
//! - [`adapters`] - External integrations (Elasticsearch, Qdrant)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use embark::config::load_config;
//! use embark::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("embark.toml")?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = ExportCoordinator::from_config(&config, shutdown_rx)?;
//!
//!     let summary = coordinator.execute_export().await;
//!
//!     println!("Exported {} documents", summary.total_processed);
//!     std::process::exit(summary.exit_code());
//! }
//! ```
//!
//! ## Failure Handling
//!
//! The export loop has two independent error budgets. A page fetch that
//! fails is retried at the same offset; after
//! `export.max_consecutive_fetch_errors` failures in a row the run aborts.
//! A point that fails to upsert is logged and counted in
//! [`ExportSummary::total_errors`](core::export::ExportSummary::total_errors)
//! and the page carries on. Points already written are never rolled back,
//! and since upserts replace by id, re-running an export converges.
//!
//! ## Custom Collaborators
//!
//! The source, destination and embedder are traits, so any of them can be
//! replaced without touching the loop:
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use embark::core::embedding::Embedder;
//! use embark::domain::EmbeddingVector;
//!
//! struct ConstantEmbedder;
//!
//! #[async_trait]
//! impl Embedder for ConstantEmbedder {
//!     fn dimension(&self) -> usize {
//!         3
//!     }
//!
//!     async fn embed(&self, _text: &str) -> EmbeddingVector {
//!         EmbeddingVector::from(vec![0.5, 0.5, 0.5])
//!     }
//! }
//! ```
//!
//! ## Error Handling
//!
//! Embark uses the [`domain::EmbarkError`] type for all errors:
//!
//! ```rust,no_run
//! use embark::domain::EmbarkError;
//!
//! fn example() -> Result<(), EmbarkError> {
//!     let config = embark::config::load_config("embark.toml")?;
//!     println!("Exporting index {}", config.elasticsearch.index);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
