use bson::{Bson, Document};
use serde_json::{Number, Value};

use crate::error::DbError;

/// Bridge a structured-value tree to a store document.
///
/// All JSON integers encode as BSON `Int64` so numeric timestamps land as
/// store-native 64-bit integers regardless of magnitude; there is no
/// Int32/Int64 split to round-trip through.
pub fn encode(value: &Value) -> Result<Document, DbError> {
    match value_to_bson(value)? {
        Bson::Document(document) => Ok(document),
        other => Err(DbError::Codec(format!(
            "top-level value must be a document, got {other:?}"
        ))),
    }
}

/// Bridge a store document back to a structured-value tree.
///
/// Absence of a record is handled by the repositories (an `Option`), never
/// here; a present document always decodes.
pub fn decode(document: Document) -> Value {
    let entries = document
        .into_iter()
        .map(|(key, value)| (key, bson_to_value(value)))
        .collect();
    Value::Object(entries)
}

/// Bridge a single store value; used where a collection holds scalar
/// payloads (the status table) rather than whole entities.
pub(crate) fn decode_value(bson: Bson) -> Value {
    bson_to_value(bson)
}

fn value_to_bson(value: &Value) -> Result<Bson, DbError> {
    Ok(match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                Bson::Int64(i)
            } else if number.is_u64() {
                // u64 above i64::MAX; the store has no unsigned type and a
                // silent Double would lose precision.
                return Err(DbError::Codec(format!("integer out of range: {number}")));
            } else if let Some(f) = number.as_f64() {
                Bson::Double(f)
            } else {
                return Err(DbError::Codec(format!("unrepresentable number: {number}")));
            }
        }
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(elements) => Bson::Array(
            elements
                .iter()
                .map(value_to_bson)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(entries) => {
            let mut document = Document::new();
            for (key, entry) in entries {
                document.insert(key.clone(), value_to_bson(entry)?);
            }
            Bson::Document(document)
        }
    })
}

fn bson_to_value(bson: Bson) -> Value {
    match bson {
        Bson::Null => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::Number(Number::from(i64::from(i))),
        Bson::Int64(i) => Value::Number(Number::from(i)),
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::Array(elements) => Value::Array(elements.into_iter().map(bson_to_value).collect()),
        Bson::Document(document) => decode(document),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::Number(Number::from(dt.timestamp_millis())),
        // Exotic BSON types never written by this layer; surfaced in their
        // relaxed extended-JSON form rather than dropped.
        other => other.into_relaxed_extjson(),
    }
}
