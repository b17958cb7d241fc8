//! Domain error types
//!
//! This module defines the error hierarchy for Embark. Errors are grouped by
//! the pipeline stage that raises them so the export loop can apply a
//! different policy to each: fetch failures are retried up to a threshold,
//! provisioning failures are fatal, and write failures are counted and skipped.
//! None of the variants expose third-party client types.

use thiserror::Error;

/// Main Embark error type
#[derive(Debug, Error)]
pub enum EmbarkError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Source (Elasticsearch) fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Destination (Qdrant) provisioning errors
    #[error("Provision error: {0}")]
    Provision(#[from] ProvisionError),

    /// Destination (Qdrant) write errors
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Failure to retrieve a page from the source collection
///
/// Recoverable up to the configured consecutive-failure threshold.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source answered with a non-success HTTP status
    #[error("Source returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request could not be sent or the connection failed
    #[error("Source request failed: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("Failed to decode source response: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status code reported by the source, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure to verify or create the destination collection
///
/// Always fatal for the run.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The destination client could not be constructed
    #[error("Failed to connect to destination: {0}")]
    Connection(String),

    /// The existence check itself failed
    #[error("Failed to check whether collection '{collection}' exists: {message}")]
    ExistenceCheck { collection: String, message: String },

    /// The collection was absent and could not be created
    #[error("Failed to create collection '{collection}': {message}")]
    Creation { collection: String, message: String },
}

/// Failure to write a single point
///
/// Always recoverable: counted, logged and skipped.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The destination rejected or failed the upsert
    #[error("Failed to upsert point {id}: {message}")]
    Upsert { id: u64, message: String },

    /// A multi-point upsert failed as a whole
    #[error("Failed to upsert batch of {count} points: {message}")]
    Batch { count: usize, message: String },

    /// The embedding had the wrong number of dimensions and was not sent
    #[error("Point {id} has {actual} dimensions, collection expects {expected}")]
    DimensionMismatch {
        id: u64,
        expected: usize,
        actual: usize,
    },
}

impl WriteError {
    /// Identifier of the point that failed, when a single point was involved
    pub fn point_id(&self) -> Option<u64> {
        match self {
            WriteError::Upsert { id, .. } | WriteError::DimensionMismatch { id, .. } => Some(*id),
            WriteError::Batch { .. } => None,
        }
    }
}

impl From<std::io::Error> for EmbarkError {
    fn from(err: std::io::Error) -> Self {
        EmbarkError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EmbarkError {
    fn from(err: serde_json::Error) -> Self {
        EmbarkError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for EmbarkError {
    fn from(err: toml::de::Error) -> Self {
        EmbarkError::Configuration(format!("TOML parse error: {err}"))
    }
}
