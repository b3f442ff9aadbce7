//! Defines the error types for the validation module.
use thiserror::Error;

/// Every way a mutation of the model can be refused.
///
/// All variants are raised before the substrate is touched, so a caller that
/// receives one can fix its input and retry against an unchanged model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DagError {
    /// A node label or edge endpoint was not a string.
    #[error("Node labels must be strings, got {found}")]
    InvalidLabelType { found: &'static str },
    /// An edge whose parent and child are the same node.
    #[error("Self loops are not allowed: '{node}' -> '{node}'")]
    SelfLoop { node: String },
    /// Committing the edge would close a directed cycle.
    #[error("Edge '{parent}' -> '{child}' would create a cycle")]
    Cycle { parent: String, child: String },
    #[error("Node '{0}' not found")]
    NodeNotFound(String),
    #[error("Edge '{parent}' -> '{child}' not found")]
    EdgeNotFound { parent: String, child: String },
    #[error("Node '{node}' has no state '{state}'")]
    StateNotFound { node: String, state: String },
    /// Reading or writing a model snapshot failed.
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl DagError {
    pub(crate) fn cycle(parent: &str, child: &str) -> Self {
        Self::Cycle { parent: parent.to_string(), child: child.to_string() }
    }

    pub(crate) fn self_loop(node: &str) -> Self {
        Self::SelfLoop { node: node.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, DagError>;
