use async_trait::async_trait;
use mongodb::bson::Document;
use serde_json::Value;

use crate::db::codec;
use crate::error::DbError;

/// Append-only sink for arbitrary structured events. No key contract, no
/// reads.
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    async fn insert(&self, event: Value) -> Result<(), DbError>;
}

/// MongoDB implementation of the [`MetricsRepository`].
pub struct MongoMetricsRepository {
    collection: mongodb::Collection<Document>,
}

impl MongoMetricsRepository {
    pub(crate) fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("metrics"),
        }
    }
}

#[async_trait]
impl MetricsRepository for MongoMetricsRepository {
    async fn insert(&self, event: Value) -> Result<(), DbError> {
        let document = codec::encode(&event)?;
        self.collection.insert_one(document).await?;
        Ok(())
    }
}
