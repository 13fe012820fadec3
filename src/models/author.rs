use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CatalogEntity, EntityKind};

/// A resource author.
///
/// The optional `uuid` is a secondary key some consumers use to correlate
/// the author with an external identity system; whether it appears in stub
/// serializations is profile configuration, not a domain invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
}

impl Author {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            icon: None,
            uuid: None,
        }
    }
}

impl CatalogEntity for Author {
    const KIND: EntityKind = EntityKind::Author;

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_serializes_id_as_primary_key() {
        let author = Author::new(6643, "inventivetalent");
        let value = serde_json::to_value(&author).unwrap();
        assert_eq!(value["_id"], 6643);
        assert_eq!(value["name"], "inventivetalent");
        assert!(value.get("icon").is_none());
        assert!(value.get("uuid").is_none());
    }

    #[test]
    fn author_round_trips_with_uuid() {
        let author = Author {
            uuid: Some(Uuid::new_v4()),
            icon: Some("data:image/png;base64,...".to_string()),
            ..Author::new(1, "someone")
        };
        let value = serde_json::to_value(&author).unwrap();
        let back: Author = serde_json::from_value(value).unwrap();
        assert_eq!(back, author);
    }
}
