//! Model-wide behaviour switches.

use serde::{Deserialize, Serialize};

/// Configuration for a [`BayesianModel`](crate::graph::BayesianModel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DagConfig {
    /// When `true`, `add_edge` creates missing endpoints. When `false`, an
    /// unknown endpoint fails with `NodeNotFound`.
    pub auto_create_endpoints: bool,
    /// Initial observed flag for states attached with `add_states`.
    pub default_observed: bool,
}

impl Default for DagConfig {
    fn default() -> Self {
        Self { auto_create_endpoints: true, default_observed: false }
    }
}

impl DagConfig {
    pub fn strict() -> Self {
        Self { auto_create_endpoints: false, ..Self::default() }
    }
}
