use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{CatalogEntity, EntityKind};

/// A registered webhook and its delivery state.
///
/// `failed_connections` and `fail_status` are mutated by delivery attempts;
/// the repository persists only those two fields when recording an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(rename = "_id")]
    pub id: i64,
    pub url: String,
    /// Event types this webhook subscribes to.
    #[serde(default)]
    pub events: HashSet<String>,
    #[serde(default)]
    pub failed_connections: u32,
    #[serde(default)]
    pub fail_status: bool,
}

impl CatalogEntity for Webhook {
    const KIND: EntityKind = EntityKind::Webhook;

    fn id(&self) -> i64 {
        self.id
    }
}
