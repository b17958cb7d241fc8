//! Elasticsearch source adapter

pub mod client;
pub mod models;

pub use client::ElasticsearchSource;
