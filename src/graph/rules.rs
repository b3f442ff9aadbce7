//! Incremental maintenance of parent-rule bookkeeping.
//!
//! Two sequences are kept per node, both of the form `0, 1, 2, ...`:
//!
//! - `parent_rule_groups` grows by one slot each time the node gains a child,
//!   so its length always equals the node's out-degree.
//! - `parent_batches` grows by one entry each time a single call gives the
//!   node new parents. Several parents added in one call share one entry.

use super::node::NodeId;
use super::storage::GraphRegistry;
use std::collections::HashSet;

/// Call-scoped updater. Create one per mutating call and feed it every edge the
/// call commits, in commit order.
#[derive(Debug, Default)]
pub struct ParentRuleUpdater {
    batched: HashSet<NodeId>,
}

impl ParentRuleUpdater {
    pub fn new() -> Self { Self::default() }

    /// Records a freshly committed `parent -> child`.
    ///
    /// `child_had_parents` is whether `child` had any parent before this edge.
    pub fn on_edge_added(
        &mut self,
        registry: &mut GraphRegistry,
        parent: NodeId,
        child: NodeId,
        child_had_parents: bool,
    ) {
        let groups = &mut registry.node_mut(parent).parent_rule_groups;
        let next = groups.len();
        groups.push(next);

        let batches = &mut registry.node_mut(child).parent_batches;
        if !child_had_parents {
            batches.clear();
            batches.push(0);
            self.batched.insert(child);
        } else if self.batched.insert(child) {
            let next = batches.len();
            batches.push(next);
        }
    }

    /// Shrinks `parent`'s slots after one of its outgoing edges went away.
    pub fn on_edge_removed(registry: &mut GraphRegistry, parent: NodeId) {
        let degree = registry.out_degree(parent);
        registry.node_mut(parent).parent_rule_groups.truncate(degree);
    }
}
