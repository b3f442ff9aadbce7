//! Read-only traversals over the model used by downstream consumers.
pub mod topology;
