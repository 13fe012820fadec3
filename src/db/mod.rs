pub mod client;
pub mod codec;
pub mod entities;
pub mod metrics;
pub mod status;
pub mod update_requests;
pub mod webhooks;

pub use client::DbClient;
pub use entities::EntityRepository;
pub use metrics::{MetricsRepository, MongoMetricsRepository};
pub use status::{MongoStatusRepository, StatusRepository};
pub use update_requests::{MongoUpdateRequestRepository, UpdateRequestRepository};
pub use webhooks::{MongoWebhookRepository, WebhookRepository};

use mongodb::results::UpdateResult;

/// Outcome of an update/upsert, letting callers distinguish a no-op from an
/// applied write without an exception path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Documents matched by the filter (0 means the update was a no-op).
    pub matched: u64,
    /// Documents actually modified.
    pub modified: u64,
    /// Whether an upsert created the document.
    pub created: bool,
}

impl From<UpdateResult> for WriteOutcome {
    fn from(result: UpdateResult) -> Self {
        Self {
            matched: result.matched_count,
            modified: result.modified_count,
            created: result.upserted_id.is_some(),
        }
    }
}

impl WriteOutcome {
    /// True when the write touched or created a document.
    pub fn applied(&self) -> bool {
        self.matched > 0 || self.created
    }
}
