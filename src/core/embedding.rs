//! Text embedding
//!
//! [`Embedder`] is the seam where a real embedding model plugs in. The only
//! implementation shipped here is [`ZeroEmbedder`], which returns the zero
//! vector so the rest of the pipeline can run end to end.

use crate::domain::EmbeddingVector;
use async_trait::async_trait;

/// Converts text into a fixed-length vector
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Number of dimensions every returned vector has
    fn dimension(&self) -> usize;

    /// Embed `text`
    ///
    /// Must return a vector of exactly [`Embedder::dimension`] elements for
    /// any input, including the empty string.
    async fn embed(&self, text: &str) -> EmbeddingVector;
}

/// Placeholder embedder that ignores its input
#[derive(Debug, Clone, Copy)]
pub struct ZeroEmbedder {
    dimension: usize,
}

impl ZeroEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

#[async_trait]
impl Embedder for ZeroEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, _text: &str) -> EmbeddingVector {
        EmbeddingVector::zeros(self.dimension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_embedder_length_matches_dimension() {
        let embedder = ZeroEmbedder::new(1536);
        let long_text = "x".repeat(100_000);

        for text in ["", "hello world", "日本語のテキスト", long_text.as_str()] {
            let vector = embedder.embed(text).await;
            assert_eq!(vector.len(), 1536);
            assert!(vector.as_slice().iter().all(|v| *v == 0.0));
        }
    }

    #[tokio::test]
    async fn test_zero_embedder_small_dimension() {
        let embedder = ZeroEmbedder::new(4);
        assert_eq!(embedder.dimension(), 4);
        assert_eq!(embedder.embed("abc").await.into_inner(), vec![0.0; 4]);
    }
}
