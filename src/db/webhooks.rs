use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};

use crate::db::codec;
use crate::error::DbError;
use crate::models::{EntityKind, Webhook};

/// Webhook registrations and their delivery state.
#[async_trait]
pub trait WebhookRepository: Send + Sync {
    /// List webhooks, optionally restricted to those subscribed to
    /// `event_type`.
    async fn list(&self, event_type: Option<&str>) -> Result<Vec<Webhook>, DbError>;

    /// Persist the delivery state of a webhook after an attempt. Only the
    /// failure counter and flag are written; registration fields stay as
    /// they were.
    async fn update_delivery_state(&self, webhook: &Webhook) -> Result<(), DbError>;

    /// Remove a webhook. Idempotent.
    async fn delete(&self, id: i64) -> Result<(), DbError>;
}

/// MongoDB implementation of the [`WebhookRepository`].
pub struct MongoWebhookRepository {
    collection: mongodb::Collection<Document>,
}

impl MongoWebhookRepository {
    pub(crate) fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection(EntityKind::Webhook.collection()),
        }
    }
}

#[async_trait]
impl WebhookRepository for MongoWebhookRepository {
    async fn list(&self, event_type: Option<&str>) -> Result<Vec<Webhook>, DbError> {
        let filter = match event_type {
            // Matching a scalar against the array means "subscribed to".
            Some(event) => doc! { "events": event },
            None => doc! {},
        };

        let mut cursor = self.collection.find(filter).await?;
        let mut webhooks = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            let value = codec::decode(document);
            match serde_json::from_value::<Webhook>(value.clone()) {
                Ok(webhook) => webhooks.push(webhook),
                Err(e) => {
                    tracing::warn!(
                        collection = EntityKind::Webhook.collection(),
                        document = %value,
                        error = %e,
                        "stored webhook does not match entity shape"
                    );
                    return Err(DbError::Malformed {
                        collection: EntityKind::Webhook.collection(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(webhooks)
    }

    async fn update_delivery_state(&self, webhook: &Webhook) -> Result<(), DbError> {
        self.collection
            .update_one(
                doc! { "_id": webhook.id },
                doc! { "$set": {
                    "failed_connections": webhook.failed_connections as i64,
                    "fail_status": webhook.fail_status,
                }},
            )
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }
}
