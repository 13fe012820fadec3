use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;

use crate::db::codec;
use crate::error::DbError;
use crate::models::{EntityKind, UpdateRequest};

/// Pending refresh requests, drained producer/consumer style: list a batch,
/// process it, then purge by the entity id the requests refer to.
#[async_trait]
pub trait UpdateRequestRepository: Send + Sync {
    /// List up to `limit` pending requests. The `requested` bookkeeping
    /// stamp is excluded by projection.
    async fn list(&self, limit: u32) -> Result<Vec<UpdateRequest>, DbError>;

    /// Remove every pending request referring to `requested_id`, returning
    /// how many were purged.
    ///
    /// At-least-once semantics, purged by referenced-entity id: requests for
    /// the same id filed between listing and this call are purged too, even
    /// though they were never processed. Callers needing exactly-once must
    /// re-check after the drain.
    async fn delete_all_matching(&self, requested_id: i64) -> Result<u64, DbError>;
}

/// MongoDB implementation of the [`UpdateRequestRepository`].
pub struct MongoUpdateRequestRepository {
    collection: mongodb::Collection<Document>,
}

impl MongoUpdateRequestRepository {
    pub(crate) fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(EntityKind::UpdateRequest.collection()),
        }
    }
}

#[async_trait]
impl UpdateRequestRepository for MongoUpdateRequestRepository {
    async fn list(&self, limit: u32) -> Result<Vec<UpdateRequest>, DbError> {
        let options = FindOptions::builder()
            .projection(doc! { "requested": 0 })
            .limit(i64::from(limit))
            .build();

        let mut cursor = self.collection.find(doc! {}).with_options(options).await?;
        let mut requests = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            let value = codec::decode(document);
            match serde_json::from_value::<UpdateRequest>(value.clone()) {
                Ok(request) => requests.push(request),
                Err(e) => {
                    tracing::warn!(
                        collection = EntityKind::UpdateRequest.collection(),
                        document = %value,
                        error = %e,
                        "stored update request does not match entity shape"
                    );
                    return Err(DbError::Malformed {
                        collection: EntityKind::UpdateRequest.collection(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(requests)
    }

    async fn delete_all_matching(&self, requested_id: i64) -> Result<u64, DbError> {
        let result = self
            .collection
            .delete_many(doc! { "requested_id": requested_id })
            .await?;
        Ok(result.deleted_count)
    }
}
