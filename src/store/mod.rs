//! Persistence for models.
pub mod snapshot;

pub use snapshot::{from_json, load, save, to_json, ModelSnapshot, NodeRecord};
