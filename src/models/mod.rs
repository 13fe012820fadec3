pub mod author;
pub mod category;
pub mod reference;
pub mod resource;
pub mod update_request;
pub mod webhook;

pub use author::Author;
pub use category::Category;
pub use reference::EntityRef;
pub use resource::{Resource, ResourceReview, ResourceUpdate, ResourceVersion};
pub use update_request::UpdateRequest;
pub use webhook::Webhook;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// The catalog entity types handled by the persistence layer.
///
/// Each kind knows its storage collection and whether the entity carries a
/// secondary (UUID) key. Strategies branch on that capability flag rather
/// than on type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Resource,
    Author,
    Category,
    ResourceVersion,
    ResourceUpdate,
    ResourceReview,
    Webhook,
    UpdateRequest,
}

impl EntityKind {
    /// Name of the collection this entity kind is partitioned into.
    pub fn collection(self) -> &'static str {
        match self {
            EntityKind::Resource => "resources",
            EntityKind::Author => "authors",
            EntityKind::Category => "categories",
            EntityKind::ResourceVersion => "resource_versions",
            EntityKind::ResourceUpdate => "resource_updates",
            EntityKind::ResourceReview => "resource_reviews",
            EntityKind::Webhook => "webhooks",
            EntityKind::UpdateRequest => "update_requests",
        }
    }

    /// Whether this entity carries a secondary UUID key that stub
    /// serializations may expose alongside the id.
    pub fn has_secondary_key(self) -> bool {
        matches!(self, EntityKind::Author)
    }
}

/// A persistable catalog entity: serde-serializable, with a stable integer
/// identity doubling as the store's primary key.
pub trait CatalogEntity: Serialize + DeserializeOwned + Send + Sync {
    const KIND: EntityKind;

    fn id(&self) -> i64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_names_are_stable() {
        assert_eq!(EntityKind::Resource.collection(), "resources");
        assert_eq!(EntityKind::ResourceVersion.collection(), "resource_versions");
        assert_eq!(EntityKind::UpdateRequest.collection(), "update_requests");
    }

    #[test]
    fn only_authors_carry_a_secondary_key() {
        assert!(EntityKind::Author.has_secondary_key());
        assert!(!EntityKind::Resource.has_secondary_key());
        assert!(!EntityKind::Category.has_secondary_key());
    }
}
