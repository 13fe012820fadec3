//! Persistence and projection layer for a catalog of community-published
//! resources.
//!
//! The same entity graph is serialized three structurally different ways
//! depending on context — at rest, for external output, and fully nested in
//! legacy output generations. The [`serial`] module holds that policy; the
//! [`db`] module composes it with a document codec into per-entity
//! repositories over MongoDB.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod serial;

pub use config::{DbConfig, DbCredential};
pub use db::{DbClient, WriteOutcome};
pub use error::DbError;
