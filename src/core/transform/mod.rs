//! Data transformation logic
//!
//! Turns raw Elasticsearch `_source` maps into [`Record`](crate::domain::Record)s
//! and records into Qdrant payloads.

pub mod decode;

pub use decode::RecordDecoder;
