use crate::graph::storage::GraphRegistry;
use crate::graph::NodeId;
use crate::validation::{DagError, Result};
use std::collections::{HashMap, HashSet, VecDeque};

/// Performs a Topological Sort using Depth-First Search (DFS).
///
/// Returns node ids where every parent appears before its children. Ties are
/// broken by label so the order is reproducible.
pub fn sort(registry: &GraphRegistry) -> Result<Vec<NodeId>> {
    let mut ids: Vec<NodeId> = registry.node_ids().collect();
    ids.sort_unstable_by(|a, b| registry.label(*a).cmp(registry.label(*b)));

    let mut order = Vec::with_capacity(ids.len());
    let mut state = HashMap::with_capacity(ids.len());

    for id in ids {
        visit(id, registry, &mut state, &mut order)?;
    }

    Ok(order)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Visiting, // Used for cycle detection
    Visited,
}

fn visit(
    node: NodeId,
    registry: &GraphRegistry,
    state: &mut HashMap<NodeId, VisitState>,
    order: &mut Vec<NodeId>,
) -> Result<()> {
    match state.get(&node) {
        Some(VisitState::Visited) => return Ok(()),
        Some(VisitState::Visiting) => {
            let label = registry.label(node);
            return Err(DagError::cycle(label, label));
        }
        None => {
            state.insert(node, VisitState::Visiting);
        }
    }

    // Parents first; a DFS post-order over parents gives [Parent, ..., Child].
    let mut parents: Vec<NodeId> = registry.parent_ids(node).collect();
    parents.sort_unstable_by(|a, b| registry.label(*a).cmp(registry.label(*b)));
    for parent in parents {
        visit(parent, registry, state, order)?;
    }

    state.insert(node, VisitState::Visited);
    order.push(node);
    Ok(())
}

/// Every node reachable from `start` by following child edges, excluding `start`.
pub fn downstream_from(registry: &GraphRegistry, start: NodeId) -> HashSet<NodeId> {
    walk(start, |id| registry.child_ids(id).collect())
}

/// Every node from which `start` is reachable, excluding `start`.
pub fn upstream_from(registry: &GraphRegistry, start: NodeId) -> HashSet<NodeId> {
    walk(start, |id| registry.parent_ids(id).collect())
}

fn walk(start: NodeId, next: impl Fn(NodeId) -> Vec<NodeId>) -> HashSet<NodeId> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from(next(start));

    while let Some(node) = queue.pop_front() {
        if visited.insert(node) {
            queue.extend(next(node));
        }
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(edges: &[(&str, &str)]) -> GraphRegistry {
        let mut reg = GraphRegistry::new();
        for (p, c) in edges {
            let (p, _) = reg.add_node(p);
            let (c, _) = reg.add_node(c);
            reg.add_edge(p, c);
        }
        reg
    }

    #[test]
    fn test_sort_diamond_dependency() {
        // Shape: A -> B, A -> C, B+C -> D
        let reg = build(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        let res = sort(&reg).expect("Sort failed");
        let labels: Vec<&str> = res.iter().map(|id| reg.label(*id)).collect();

        let pos = |l: &str| labels.iter().position(|x| *x == l).unwrap();
        assert!(pos("A") < pos("B"));
        assert!(pos("A") < pos("C"));
        assert!(pos("B") < pos("D"));
        assert!(pos("C") < pos("D"));
    }

    #[test]
    fn test_sort_includes_isolated_nodes() {
        let mut reg = build(&[("a", "b")]);
        reg.add_node("z");
        assert_eq!(sort(&reg).unwrap().len(), 3);
    }

    #[test]
    fn test_upstream_and_downstream() {
        let reg = build(&[("a", "b"), ("b", "c"), ("x", "c")]);
        let c = reg.id("c").unwrap();
        let a = reg.id("a").unwrap();

        let up: HashSet<&str> = upstream_from(&reg, c).into_iter().map(|id| reg.label(id)).collect();
        assert_eq!(up, HashSet::from(["a", "b", "x"]));

        let down: HashSet<&str> = downstream_from(&reg, a).into_iter().map(|id| reg.label(id)).collect();
        assert_eq!(down, HashSet::from(["b", "c"]));
    }
}
