//! Destination-side domain types

use serde_json::{Map, Value};

/// Fixed-length numeric representation of a text
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    /// All-zero vector of the given dimension
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    /// Number of dimensions
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the vector has no dimensions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw values
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Consume into the raw values
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Payload attached to a point
pub type Payload = Map<String, Value>;

/// Unit of storage in the destination collection
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Point identifier; upserting the same id replaces vector and payload
    pub id: u64,

    /// Embedding of the record text
    pub vector: EmbeddingVector,

    /// Payload, at minimum the original text
    pub payload: Payload,
}

impl Point {
    /// Create a new point
    pub fn new(id: u64, vector: EmbeddingVector, payload: Payload) -> Self {
        Self {
            id,
            vector,
            payload,
        }
    }
}
