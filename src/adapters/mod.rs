//! External system integrations for Embark.
//!
//! This module provides adapters for the two ends of the export:
//!
//! - [`elasticsearch`] - Paginated reads from an Elasticsearch index over HTTP
//! - [`qdrant`] - Collection provisioning and point upserts over gRPC
//! - [`dry_run`] - A destination that accepts every write without sending it
//!
//! # Design Pattern
//!
//! Adapters implement the traits in [`traits`] so the export loop never sees
//! a third-party client type and can be exercised with in-memory fakes.
//!
//! ```rust,no_run
//! use embark::adapters::elasticsearch::ElasticsearchSource;
//! use embark::adapters::traits::SourceReader;
//! use embark::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("embark.toml")?;
//! let source = ElasticsearchSource::new(&config.elasticsearch)?;
//!
//! let page = source.fetch_page(0, 100).await?;
//! println!("{} of {} documents", page.len(), page.total_count);
//! # Ok(())
//! # }
//! ```

pub mod dry_run;
pub mod elasticsearch;
pub mod qdrant;
pub mod traits;
