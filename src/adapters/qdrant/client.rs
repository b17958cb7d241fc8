//! Qdrant gRPC client wrapper

use crate::adapters::traits::DestinationWriter;
use crate::config::QdrantConfig;
use crate::domain::{Point, ProvisionError, WriteError};
use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Collection calls the destination makes against the server
#[async_trait]
trait CollectionApi: Send + Sync {
    async fn exists(&self, collection: &str) -> Result<bool, String>;

    async fn create(
        &self,
        collection: &str,
        vector_size: u64,
        distance: Distance,
    ) -> Result<(), String>;

    async fn upsert(&self, collection: &str, points: Vec<PointStruct>) -> Result<(), String>;
}

#[async_trait]
impl CollectionApi for Qdrant {
    async fn exists(&self, collection: &str) -> Result<bool, String> {
        self.collection_exists(collection)
            .await
            .map_err(|e| e.to_string())
    }

    async fn create(
        &self,
        collection: &str,
        vector_size: u64,
        distance: Distance,
    ) -> Result<(), String> {
        let create = CreateCollectionBuilder::new(collection)
            .vectors_config(VectorParamsBuilder::new(vector_size, distance));

        self.create_collection(create)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn upsert(&self, collection: &str, points: Vec<PointStruct>) -> Result<(), String> {
        let upsert = UpsertPointsBuilder::new(collection, points).wait(true);

        self.upsert_points(upsert)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Qdrant implementation of [`DestinationWriter`]
pub struct QdrantDestination {
    api: Arc<dyn CollectionApi>,
    collection_name: String,
    vector_size: u64,
}

impl QdrantDestination {
    /// Create a new destination from configuration
    ///
    /// The gRPC channel is opened lazily, so an unreachable server surfaces
    /// on the first call rather than here.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::Connection`] if the client cannot be built.
    pub fn new(config: &QdrantConfig) -> Result<Self, ProvisionError> {
        let mut builder = Qdrant::from_url(&config.url).timeout(config.timeout());

        if let Some(ref api_key) = config.api_key {
            let api_key: &str = api_key.expose_secret().as_ref();
            builder = builder.api_key(api_key.to_string());
        }

        let client = builder
            .build()
            .map_err(|e| ProvisionError::Connection(e.to_string()))?;

        Ok(Self::with_api(
            Arc::new(client),
            config.collection_name.clone(),
            config.vector_size,
        ))
    }

    fn with_api(api: Arc<dyn CollectionApi>, collection_name: String, vector_size: u64) -> Self {
        Self {
            api,
            collection_name,
            vector_size,
        }
    }

    /// Name of the destination collection
    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Check whether the destination collection exists
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::ExistenceCheck`] if the server cannot answer.
    pub async fn collection_exists(&self) -> Result<bool, ProvisionError> {
        self.api
            .exists(&self.collection_name)
            .await
            .map_err(|message| ProvisionError::ExistenceCheck {
                collection: self.collection_name.clone(),
                message,
            })
    }

    /// Upsert several points in one request, waiting for the write to apply
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Upsert`] for a single point, or
    /// [`WriteError::Batch`] when several points were sent together.
    pub async fn upsert_points(&self, points: Vec<Point>) -> Result<(), WriteError> {
        if points.is_empty() {
            return Ok(());
        }

        let single_id = match points.as_slice() {
            [only] => Some(only.id),
            _ => None,
        };
        let count = points.len();

        let structs: Vec<PointStruct> = points.into_iter().map(to_point_struct).collect();

        self.api
            .upsert(&self.collection_name, structs)
            .await
            .map_err(|message| match single_id {
                Some(id) => WriteError::Upsert { id, message },
                None => WriteError::Batch { count, message },
            })
    }
}

fn to_point_struct(point: Point) -> PointStruct {
    let mut payload = Payload::new();
    for (key, value) in point.payload {
        payload.insert(key, value);
    }
    PointStruct::new(point.id, point.vector.into_inner(), payload)
}

#[async_trait]
impl DestinationWriter for QdrantDestination {
    async fn ensure_collection(&self) -> Result<(), ProvisionError> {
        if self.collection_exists().await? {
            tracing::info!(collection = %self.collection_name, "Collection already exists");
            return Ok(());
        }

        tracing::info!(
            collection = %self.collection_name,
            vector_size = self.vector_size,
            distance = "cosine",
            "Creating collection"
        );

        self.api
            .create(&self.collection_name, self.vector_size, Distance::Cosine)
            .await
            .map_err(|message| ProvisionError::Creation {
                collection: self.collection_name.clone(),
                message,
            })?;

        tracing::info!(collection = %self.collection_name, "Collection created");
        Ok(())
    }

    async fn upsert_point(&self, point: Point) -> Result<(), WriteError> {
        self.upsert_points(vec![point]).await
    }
}
