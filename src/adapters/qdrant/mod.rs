//! Qdrant destination adapter

pub mod client;

pub use client::QdrantDestination;
