//! Structural rules: no self-loops, no cycles.

use super::error::{DagError, Result};
use crate::graph::storage::GraphRegistry;
use std::collections::{HashMap, HashSet};

pub fn validate_no_self_loop(parent: &str, child: &str) -> Result<()> {
    if parent == child {
        return Err(DagError::self_loop(parent));
    }
    Ok(())
}

/// Fails if `parent -> child` would close a cycle in the registry as it
/// stands, i.e. if `child` already reaches `parent`.
pub fn validate_acyclic(registry: &GraphRegistry, parent: &str, child: &str) -> Result<()> {
    validate_acyclic_staged(registry, &HashMap::new(), parent, child)
}

/// Same check, but edges in `pending` (parent label -> child labels) count as
/// already present. Endpoints may be absent from the registry.
pub(crate) fn validate_acyclic_staged(
    registry: &GraphRegistry,
    pending: &HashMap<&str, Vec<&str>>,
    parent: &str,
    child: &str,
) -> Result<()> {
    let closes_loop = if pending.is_empty() {
        match (registry.id(child), registry.id(parent)) {
            (Some(from), Some(to)) => registry.has_path(from, to),
            _ => false,
        }
    } else {
        reaches(registry, pending, child, parent)
    };

    if closes_loop {
        return Err(DagError::cycle(parent, child));
    }
    Ok(())
}

/// Depth-first search over registry edges plus staged edges.
fn reaches(
    registry: &GraphRegistry,
    pending: &HashMap<&str, Vec<&str>>,
    from: &str,
    to: &str,
) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack = vec![from];

    while let Some(node) = stack.pop() {
        if node == to {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        tracing::trace!(node, "reachability step");
        if let Some(id) = registry.id(node) {
            stack.extend(registry.child_ids(id).map(|c| registry.label(c)));
        }
        if let Some(children) = pending.get(node) {
            stack.extend(children.iter().copied());
        }
    }
    false
}
