use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use mongodb::bson::{doc, Document};
use mongodb::options::UpdateOptions;

use crate::db::codec;
use crate::db::WriteOutcome;
use crate::error::DbError;
use crate::models::CatalogEntity;
use crate::serial::Profile;

/// Per-entity-type persistence operations.
///
/// Composes the document codec with the storage profile and owns the
/// bookkeeping fields (`fetch.first` / `fetch.latest`): they are merged into
/// the document at write time and stripped again on read, so they never
/// appear on the domain structs callers pass in or get back.
pub struct EntityRepository<T: CatalogEntity> {
    collection: mongodb::Collection<Document>,
    storage_profile: Arc<Profile>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: CatalogEntity> EntityRepository<T> {
    pub(crate) fn new(db: &mongodb::Database, storage_profile: Arc<Profile>) -> Self {
        Self {
            collection: db.collection(T::KIND.collection()),
            storage_profile,
            _entity: PhantomData,
        }
    }

    /// Serialize the entity and project it into its at-rest shape.
    fn to_storage_document(&self, entity: &T) -> Result<Document, DbError> {
        let tree = serde_json::to_value(entity).map_err(|e| DbError::Codec(e.to_string()))?;
        let projected = self.storage_profile.project(T::KIND, tree);
        codec::encode(&projected)
    }

    /// Fetch an entity by id. A miss is an absence, never an error.
    pub async fn get(&self, id: i64) -> Result<Option<T>, DbError> {
        let Some(document) = self.collection.find_one(doc! { "_id": id }).await? else {
            return Ok(None);
        };

        let mut value = codec::decode(document);
        if let Some(object) = value.as_object_mut() {
            // Bookkeeping is repository-internal.
            object.remove("fetch");
        }

        match serde_json::from_value::<T>(value.clone()) {
            Ok(entity) => Ok(Some(entity)),
            Err(e) => {
                tracing::warn!(
                    collection = T::KIND.collection(),
                    id,
                    document = %value,
                    error = %e,
                    "stored document does not match entity shape"
                );
                Err(DbError::Malformed {
                    collection: T::KIND.collection(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Write a new document, stamping `fetch.first == fetch.latest`.
    /// An existing id surfaces as [`DbError::DuplicateKey`], unmodified.
    pub async fn insert(&self, entity: &T) -> Result<(), DbError> {
        let unix = Utc::now().timestamp();
        let mut document = self.to_storage_document(entity)?;
        document.insert("fetch", doc! { "first": unix, "latest": unix });

        self.collection
            .insert_one(document)
            .await
            .map_err(|e| DbError::from_insert(e, T::KIND.collection(), entity.id()))?;
        Ok(())
    }

    /// Field-level merge onto the existing document, stamping
    /// `fetch.latest`. Fields absent from the payload persist untouched. A
    /// missing id is a no-op reported through the outcome, not an error.
    pub async fn update(&self, entity: &T) -> Result<WriteOutcome, DbError> {
        let update = self.storage_update(entity)?;
        let result = self
            .collection
            .update_one(doc! { "_id": entity.id() }, update)
            .await?;
        Ok(WriteOutcome::from(result))
    }

    /// [`EntityRepository::update`], creating the document when absent.
    ///
    /// Used where independent producers race to first-write the same
    /// sub-entity: first-writer-wins on create, last-writer-wins per field.
    pub async fn upsert(&self, entity: &T) -> Result<WriteOutcome, DbError> {
        let update = self.storage_update(entity)?;
        let options = UpdateOptions::builder().upsert(true).build();
        let result = self
            .collection
            .update_one(doc! { "_id": entity.id() }, update)
            .with_options(options)
            .await?;
        Ok(WriteOutcome::from(result))
    }

    /// Remove a document. Deleting an absent id is not an error.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }

    fn storage_update(&self, entity: &T) -> Result<Document, DbError> {
        let unix = Utc::now().timestamp();
        let mut fields = self.to_storage_document(entity)?;
        // The primary key is immutable; it travels in the filter instead.
        fields.remove("_id");
        // Dotted path: merges into the fetch subdocument without clobbering
        // fetch.first.
        fields.insert("fetch.latest", unix);
        Ok(doc! {
            "$set": fields,
            "$setOnInsert": { "fetch.first": unix },
        })
    }
}
