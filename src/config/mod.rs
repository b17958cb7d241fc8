//! Configuration management for Embark.
//!
//! Embark reads a single TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `EMBARK_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation before anything connects
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "development"
//!
//! [application]
//! log_level = "info"
//!
//! [elasticsearch]
//! base_url = "https://elastic:9200"
//! index = "documents"
//! username = "elastic"
//! password = "${EMBARK_ES_PASSWORD}"
//! text_field = "texto"
//!
//! [qdrant]
//! url = "http://localhost:6334"
//! collection_name = "documents"
//! vector_size = 1536
//!
//! [export]
//! page_size = 1000
//! max_consecutive_fetch_errors = 5
//! batch_pause_ms = 10
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use embark::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("embark.toml")?;
//! println!("Exporting index {}", config.elasticsearch.index);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ElasticsearchConfig, EmbarkConfig, Environment, ExportConfig,
    LoggingConfig, QdrantConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
