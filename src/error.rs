use thiserror::Error;

/// Errors surfaced by the persistence layer.
///
/// Read misses are not errors: every `get`-shaped operation returns
/// `Option::None` when no document matches.
#[derive(Debug, Error)]
pub enum DbError {
    /// The initial connection (or the reachability ping) failed.
    /// No retry is attempted; retry policy belongs to the caller.
    #[error("connection failed: {0}")]
    Connection(String),

    /// An insert collided with an existing primary key.
    #[error("duplicate key in '{collection}': id {id} already exists")]
    DuplicateKey { collection: &'static str, id: i64 },

    /// A stored document could not be reconstructed into its entity shape.
    /// The offending raw document is logged before this is returned.
    #[error("malformed document in '{collection}': {reason}")]
    Malformed {
        collection: &'static str,
        reason: String,
    },

    /// Value-tree to store-document bridging failed.
    #[error("codec error: {0}")]
    Codec(String),

    /// Any other driver-level failure.
    #[error("database error: {0}")]
    Database(String),
}

impl From<mongodb::error::Error> for DbError {
    fn from(err: mongodb::error::Error) -> Self {
        DbError::Database(err.to_string())
    }
}

impl DbError {
    /// Classify a driver error raised by an insert: key collisions become
    /// [`DbError::DuplicateKey`], everything else stays a database error.
    pub(crate) fn from_insert(
        err: mongodb::error::Error,
        collection: &'static str,
        id: i64,
    ) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        // 11000 is the server's duplicate-key write error code.
        if let ErrorKind::Write(WriteFailure::WriteError(write_error)) = &*err.kind {
            if write_error.code == 11000 {
                return DbError::DuplicateKey { collection, id };
            }
        }
        DbError::Database(err.to_string())
    }
}
