//! Configuration schema types
//!
//! This module defines the configuration structure that maps onto `embark.toml`.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Embark configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbarkConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Source index configuration
    pub elasticsearch: ElasticsearchConfig,

    /// Destination collection configuration
    pub qdrant: QdrantConfig,

    /// Export loop settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EmbarkConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value found
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.elasticsearch.validate(&self.environment)?;
        self.qdrant.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Elasticsearch source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticsearchConfig {
    /// Base URL of the cluster, e.g. `https://elastic:9200`
    pub base_url: String,

    /// Index to export
    pub index: String,

    /// Username for basic authentication
    pub username: String,

    /// Password for basic authentication
    pub password: SecretString,

    /// Source field holding the numeric document id
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Source field holding the text to embed
    #[serde(default = "default_text_field")]
    pub text_field: String,

    /// TLS certificate verification enabled
    ///
    /// Only for development clusters with self-signed certificates. Rejected
    /// by validation when `environment = "production"`.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_es_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl ElasticsearchConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        use secrecy::ExposeSecret;

        validate_http_url("elasticsearch.base_url", &self.base_url)?;

        if self.index.trim().is_empty() {
            return Err("elasticsearch.index cannot be empty".to_string());
        }
        if self.username.trim().is_empty() {
            return Err("elasticsearch.username cannot be empty".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("elasticsearch.password cannot be empty".to_string());
        }
        if self.id_field.trim().is_empty() || self.text_field.trim().is_empty() {
            return Err("elasticsearch.id_field and text_field cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("elasticsearch.timeout_seconds must be greater than 0".to_string());
        }

        if *environment == Environment::Production && !self.tls_verify {
            return Err(
                "TLS certificate verification cannot be disabled in production environments. \
                Set 'elasticsearch.tls_verify = true' or use environment = \"development\"."
                    .to_string(),
            );
        }

        Ok(())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Qdrant destination configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    /// gRPC URL, e.g. `http://localhost:6334`
    #[serde(default = "default_qdrant_url")]
    pub url: String,

    /// Optional API key
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Destination collection name
    pub collection_name: String,

    /// Vector dimensionality of the collection
    #[serde(default = "default_vector_size")]
    pub vector_size: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_qdrant_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl QdrantConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url("qdrant.url", &self.url)?;

        if self.collection_name.trim().is_empty() {
            return Err("qdrant.collection_name cannot be empty".to_string());
        }
        if !(1..=65536).contains(&self.vector_size) {
            return Err(format!(
                "qdrant.vector_size must be between 1 and 65536, got {}",
                self.vector_size
            ));
        }
        if self.timeout_seconds == 0 {
            return Err("qdrant.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Export loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Number of documents requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Consecutive fetch failures tolerated before the run aborts
    #[serde(default = "default_max_consecutive_fetch_errors")]
    pub max_consecutive_fetch_errors: usize,

    /// Pause between loop iterations in milliseconds
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,

    /// Maximum in-flight upserts within a page
    #[serde(default = "default_upsert_concurrency")]
    pub upsert_concurrency: usize,

    /// Log progress every N records within a page
    #[serde(default = "default_progress_log_interval")]
    pub progress_log_interval: usize,

    /// Dry run mode - fetch, decode and embed without writing to Qdrant
    #[serde(default)]
    pub dry_run: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if !(1..=10_000).contains(&self.page_size) {
            return Err(format!(
                "export.page_size must be between 1 and 10000, got {}",
                self.page_size
            ));
        }
        if self.max_consecutive_fetch_errors == 0 {
            return Err("export.max_consecutive_fetch_errors must be at least 1".to_string());
        }
        if !(1..=64).contains(&self.upsert_concurrency) {
            return Err(format!(
                "export.upsert_concurrency must be between 1 and 64, got {}",
                self.upsert_concurrency
            ));
        }
        if self.progress_log_interval == 0 {
            return Err("export.progress_log_interval must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_consecutive_fetch_errors: default_max_consecutive_fetch_errors(),
            batch_pause_ms: default_batch_pause_ms(),
            upsert_concurrency: default_upsert_concurrency(),
            progress_log_interval: default_progress_log_interval(),
            dry_run: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rotating local files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }
    let parsed = url::Url::parse(value).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(format!("{field} must start with http:// or https://"));
    }
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_id_field() -> String {
    "id".to_string()
}

fn default_text_field() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

fn default_es_timeout_seconds() -> u64 {
    10
}

fn default_qdrant_url() -> String {
    "http://localhost:6334".to_string()
}

fn default_vector_size() -> u64 {
    1536
}

fn default_qdrant_timeout_seconds() -> u64 {
    30
}

fn default_page_size() -> usize {
    1000
}

fn default_max_consecutive_fetch_errors() -> usize {
    5
}

fn default_batch_pause_ms() -> u64 {
    10
}

fn default_upsert_concurrency() -> usize {
    1
}

fn default_progress_log_interval() -> usize {
    100
}

fn default_local_path() -> String {
    "/var/log/embark".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
