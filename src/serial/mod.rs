//! Reference-serialization policy.
//!
//! The same entity graph is rendered three structurally different ways: the
//! shape persisted at rest, the shape handed to external consumers, and the
//! fully nested shape of early output generations. A [`Profile`] binds each
//! reference field of an entity kind to a [`RefStrategy`]; projecting an
//! already-serialized value tree through a profile produces the context's
//! wire shape without touching the domain model.

pub mod profile;
pub mod strategy;

pub use profile::{OutputGeneration, Profile};
pub use strategy::RefStrategy;
