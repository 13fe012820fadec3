use serde::{Deserialize, Serialize};

/// An ephemeral work item asking the pipeline to refresh an entity.
///
/// Requests are drained in batches and purged in bulk by `requested_id`, not
/// by their own document id; several pending requests for the same entity are
/// all cleared together (at-least-once semantics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// Id of the entity to refresh.
    pub requested_id: i64,
    /// Unix seconds the request was filed. Excluded from normal reads by
    /// projection, so it is `None` on listed items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested: Option<i64>,
}

impl UpdateRequest {
    pub fn new(requested_id: i64) -> Self {
        Self {
            requested_id,
            requested: None,
        }
    }
}
