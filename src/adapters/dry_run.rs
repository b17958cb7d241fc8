//! Destination that performs no writes
//!
//! Used by `export --dry-run`: records are still fetched, decoded and
//! embedded, but nothing is sent to Qdrant.

use crate::adapters::traits::DestinationWriter;
use crate::domain::{Point, ProvisionError, WriteError};
use async_trait::async_trait;

/// No-op [`DestinationWriter`] that only logs what it would have done
#[derive(Debug, Clone)]
pub struct DryRunDestination {
    collection_name: String,
}

impl DryRunDestination {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
        }
    }
}

#[async_trait]
impl DestinationWriter for DryRunDestination {
    async fn ensure_collection(&self) -> Result<(), ProvisionError> {
        tracing::info!(
            collection = %self.collection_name,
            "Dry run: skipping collection provisioning"
        );
        Ok(())
    }

    async fn upsert_point(&self, point: Point) -> Result<(), WriteError> {
        tracing::trace!(
            collection = %self.collection_name,
            point_id = point.id,
            dimensions = point.vector.len(),
            "Dry run: would upsert point"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmbeddingVector;

    #[tokio::test]
    async fn test_dry_run_accepts_everything() {
        let destination = DryRunDestination::new("documents");
        assert!(destination.ensure_collection().await.is_ok());
        assert!(destination
            .upsert_point(Point::new(1, EmbeddingVector::zeros(3), Default::default()))
            .await
            .is_ok());
    }
}
