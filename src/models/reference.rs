use serde::de::{self, DeserializeOwned};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::models::CatalogEntity;

/// A weak reference to another catalog entity.
///
/// References are weak by design: the holder keeps the target's id (and,
/// depending on where the document came from, a uuid or a denormalized copy
/// of the whole entity), but deleting the holder never cascades.
///
/// Deserialization accepts every shape a serialization profile can write:
///
/// - a fully nested entity (`entity` is populated),
/// - an `{ "id": ... }` stub,
/// - an `{ "id": ..., "uuid": ... }` stub,
/// - a storage pointer `{ "$ref": ..., "$id": ... }`.
///
/// Documents read back from storage therefore come up as bare-id references;
/// resolving them to full entities is the caller's responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRef<T> {
    pub id: i64,
    pub uuid: Option<Uuid>,
    pub entity: Option<T>,
}

impl<T> EntityRef<T> {
    /// A bare-id reference, the shape reads reconstruct.
    pub fn id_only(id: i64) -> Self {
        Self {
            id,
            uuid: None,
            entity: None,
        }
    }
}

impl<T: CatalogEntity> EntityRef<T> {
    /// Wrap a full entity; the id is taken from the entity itself.
    pub fn full(entity: T) -> Self {
        Self {
            id: entity.id(),
            uuid: None,
            entity: Some(entity),
        }
    }
}

impl<T: Serialize> Serialize for EntityRef<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // With the full entity at hand, emit it whole; the profile walking
        // the resulting tree decides how much of it survives. Otherwise emit
        // the richest stub we can.
        match &self.entity {
            Some(entity) => entity.serialize(serializer),
            None => {
                let len = if self.uuid.is_some() { 2 } else { 1 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("id", &self.id)?;
                if let Some(uuid) = &self.uuid {
                    map.serialize_entry("uuid", uuid)?;
                }
                map.end()
            }
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for EntityRef<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let object = value
            .as_object()
            .ok_or_else(|| de::Error::custom("entity reference must be a document"))?;

        let id = object
            .get("$id")
            .or_else(|| object.get("_id"))
            .or_else(|| object.get("id"))
            .and_then(Value::as_i64)
            .ok_or_else(|| de::Error::custom("entity reference carries no id"))?;

        let uuid = object
            .get("uuid")
            .and_then(Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok());

        // A stub fails the full decode (missing fields) and that is fine.
        let entity = serde_json::from_value::<T>(value.clone()).ok();

        Ok(EntityRef { id, uuid, entity })
    }
}
