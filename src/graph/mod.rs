//! Defines the core data structures for the model graph.
pub mod dag;
pub mod label;
pub mod node;
pub mod rules;
pub mod storage;

// Re-export key types for convenient access
pub use dag::BayesianModel;
pub use label::AsLabel;
pub use node::{NodeData, NodeId, RuleGroups, State};
