use serde::{Deserialize, Serialize};

use crate::models::{CatalogEntity, EntityKind};

/// A resource category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl CatalogEntity for Category {
    const KIND: EntityKind = EntityKind::Category;

    fn id(&self) -> i64 {
        self.id
    }
}
