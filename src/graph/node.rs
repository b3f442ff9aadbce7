//! Defines the per-node record carried by the model: the parent-rule
//! bookkeeping and the discrete states attached for inference.

use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A stable identifier for a node within the substrate.
///
/// This is a type alias for `petgraph`'s index type to abstract the
/// underlying graph implementation.
pub type NodeId = NodeIndex;

/// Rule-slot sequences are short in practice; keep them inline.
pub type RuleGroups = SmallVec<[usize; 4]>;

/// A named discrete value a node may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    /// Reserved for inference: whether this state has been observed as evidence.
    pub observed_status: bool,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), observed_status: false }
    }
}

/// Contains the metadata for a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeData {
    /// The node's label, unique within a model.
    pub label: String,
    /// One slot per committed outgoing dependency edge: `0, 1, 2, ...`.
    ///
    /// A probability-table builder assigns a combination rule to each slot.
    pub parent_rule_groups: RuleGroups,
    /// One entry per call that gave this node new parents: `0, 1, 2, ...`.
    pub parent_batches: RuleGroups,
    pub states: Vec<State>,
}

impl NodeData {
    /// A fresh node: empty rule bookkeeping and no states.
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Default::default() }
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(|s| s.name.as_str())
    }
}
