use serde_json::{json, Value};

use crate::models::EntityKind;
use crate::serial::Profile;

/// How a reference field is rendered during serialization.
///
/// Strategies are pure: they map the already-serialized referenced value to
/// its contextual shape and never consult the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefStrategy {
    /// The complete referenced entity, nested inline. The referenced
    /// entity's own reference fields are projected through the same profile
    /// (one level of recursion; the reference graph is acyclic by
    /// construction, so this terminates).
    Full,
    /// A compact `{ "id": ... }` stub.
    IdOnly,
    /// `{ "id": ... }` plus the target's secondary `uuid` when the target
    /// kind carries one and the value is present; otherwise identical to
    /// [`RefStrategy::IdOnly`].
    IdAndSecondaryKey,
    /// A storage-native cross-collection pointer
    /// `{ "$ref": <collection>, "$id": ... }`. Storage profiles only.
    ForeignKeyRef,
}

impl RefStrategy {
    /// Render `value` (the serialized referenced entity or stub) for a
    /// reference targeting `target`.
    ///
    /// A value carrying no recognizable id is passed through unchanged; the
    /// storage decode path will reject it loudly later.
    pub fn encode(self, target: EntityKind, value: &Value, profile: &Profile) -> Value {
        let Some(id) = reference_id(value) else {
            return value.clone();
        };

        match self {
            RefStrategy::Full => profile.project(target, value.clone()),
            RefStrategy::IdOnly => json!({ "id": id }),
            RefStrategy::IdAndSecondaryKey => {
                let mut stub = json!({ "id": id });
                if target.has_secondary_key() {
                    if let Some(uuid) = value.get("uuid").and_then(Value::as_str) {
                        stub["uuid"] = Value::String(uuid.to_string());
                    }
                }
                stub
            }
            RefStrategy::ForeignKeyRef => json!({ "$ref": target.collection(), "$id": id }),
        }
    }
}

/// Pull the referenced id out of any of the shapes a reference value can
/// take: a full entity (`_id`), a stub (`id`) or a storage pointer (`$id`).
fn reference_id(value: &Value) -> Option<i64> {
    let object = value.as_object()?;
    object
        .get("_id")
        .or_else(|| object.get("id"))
        .or_else(|| object.get("$id"))
        .and_then(Value::as_i64)
}
