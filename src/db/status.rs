use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::UpdateOptions;
use serde_json::Value;

use crate::db::codec;
use crate::error::DbError;

/// Generic key-to-value table for operational bookkeeping (counters,
/// cursors). Independent of entity serialization.
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Look up a status value. A missing key is an absence, not an error.
    async fn get(&self, key: &str) -> Result<Option<Value>, DbError>;

    /// Set a status value, creating the entry if absent.
    async fn set(&self, key: &str, value: Value) -> Result<(), DbError>;

    /// Rename a key in place. Best effort: when `from` does not exist this
    /// is a silent no-op, not an error — callers migrating cursors should
    /// verify the new key afterwards if they need certainty.
    async fn rename(&self, from: &str, to: &str) -> Result<(), DbError>;
}

/// MongoDB implementation of the [`StatusRepository`].
pub struct MongoStatusRepository {
    collection: mongodb::Collection<Document>,
}

impl MongoStatusRepository {
    pub(crate) fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("status"),
        }
    }
}

#[async_trait]
impl StatusRepository for MongoStatusRepository {
    async fn get(&self, key: &str) -> Result<Option<Value>, DbError> {
        let Some(mut document) = self.collection.find_one(doc! { "key": key }).await? else {
            return Ok(None);
        };
        Ok(document.remove("value").map(codec::decode_value))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), DbError> {
        let encoded = codec::encode(&serde_json::json!({ "key": key, "value": value }))?;
        let options = UpdateOptions::builder().upsert(true).build();

        self.collection
            .update_one(doc! { "key": key }, doc! { "$set": encoded })
            .with_options(options)
            .await?;
        Ok(())
    }

    async fn rename(&self, from: &str, to: &str) -> Result<(), DbError> {
        self.collection
            .update_one(doc! { "key": from }, doc! { "$set": { "key": to } })
            .await?;
        Ok(())
    }
}
