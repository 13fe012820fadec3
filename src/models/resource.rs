use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Author, CatalogEntity, Category, EntityKind, EntityRef};

/// A community-published resource.
///
/// References are weak: once persisted, `author` and `category` are never
/// null, while the version/update/review lists may be empty. Everything the
/// catalog tracks beyond the modeled fields (download counts, external links,
/// rating summaries, ...) rides along in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub tag: String,
    pub author: EntityRef<Author>,
    pub category: EntityRef<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<EntityRef<ResourceVersion>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub updates: Vec<EntityRef<ResourceUpdate>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<EntityRef<ResourceReview>>,
    /// Free-form attributes carried verbatim.
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, Value>,
}

impl Resource {
    pub fn new(id: i64, name: impl Into<String>, author: Author, category: Category) -> Self {
        Self {
            id,
            name: name.into(),
            tag: String::new(),
            author: EntityRef::full(author),
            category: EntityRef::full(category),
            version: None,
            updates: Vec::new(),
            reviews: Vec::new(),
            attributes: serde_json::Map::new(),
        }
    }
}

impl CatalogEntity for Resource {
    const KIND: EntityKind = EntityKind::Resource;

    fn id(&self) -> i64 {
        self.id
    }
}

/// A published version of a resource. The owning resource id is implicit
/// via collection partitioning and carried as a plain field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceVersion {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub resource: i64,
    /// Unix seconds of the release.
    #[serde(default)]
    pub release_date: i64,
}

impl CatalogEntity for ResourceVersion {
    const KIND: EntityKind = EntityKind::ResourceVersion;

    fn id(&self) -> i64 {
        self.id
    }
}

/// An update note published alongside a resource version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUpdate {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default)]
    pub resource: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Unix seconds of publication.
    #[serde(default)]
    pub date: i64,
}

impl CatalogEntity for ResourceUpdate {
    const KIND: EntityKind = EntityKind::ResourceUpdate;

    fn id(&self) -> i64 {
        self.id
    }
}

/// A user review of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceReview {
    #[serde(rename = "_id")]
    pub id: i64,
    #[serde(default)]
    pub resource: i64,
    pub author: EntityRef<Author>,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub message: String,
    /// Unix seconds of submission.
    #[serde(default)]
    pub date: i64,
}

impl CatalogEntity for ResourceReview {
    const KIND: EntityKind = EntityKind::ResourceReview;

    fn id(&self) -> i64 {
        self.id
    }
}
