//! storage.rs
//! The graph substrate: a petgraph `StableDiGraph` plus a label index.
//!
//! `StableDiGraph` hands vacated slots to the next insert, so listing order is
//! tracked separately: nodes and edges are always reported in insertion order.
//!
//! This layer stores whatever it is told to. It knows nothing about labels
//! being well-typed or the graph staying acyclic; the engine in `dag.rs`
//! guarantees both before anything reaches here.

use super::node::{NodeData, NodeId};
use petgraph::stable_graph::StableDiGraph;
use petgraph::visit::Dfs;
use petgraph::Direction;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct GraphRegistry {
    graph: StableDiGraph<NodeData, ()>,
    index: HashMap<String, NodeId>,
    node_order: Vec<NodeId>,
    edge_order: Vec<(NodeId, NodeId)>,
}

impl GraphRegistry {
    pub fn new() -> Self { Self::default() }
    pub fn node_count(&self) -> usize { self.graph.node_count() }
    pub fn edge_count(&self) -> usize { self.graph.edge_count() }

    pub fn id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Inserts a node unless one with this label exists.
    /// Returns the node's id and whether it was newly created.
    pub fn add_node(&mut self, label: &str) -> (NodeId, bool) {
        if let Some(id) = self.id(label) {
            return (id, false);
        }
        let id = self.graph.add_node(NodeData::new(label));
        self.index.insert(label.to_string(), id);
        self.node_order.push(id);
        (id, true)
    }

    /// Removes a node with all its incident edges.
    pub fn remove_node(&mut self, label: &str) -> Option<NodeData> {
        let id = self.index.remove(label)?;
        self.node_order.retain(|&n| n != id);
        self.edge_order.retain(|&(p, c)| p != id && c != id);
        self.graph.remove_node(id)
    }

    /// Inserts `parent -> child`. Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.graph.find_edge(parent, child).is_some() {
            return false;
        }
        self.graph.add_edge(parent, child, ());
        self.edge_order.push((parent, child));
        true
    }

    pub fn remove_edge(&mut self, parent: NodeId, child: NodeId) -> bool {
        match self.graph.find_edge(parent, child) {
            Some(edge) => {
                self.edge_order.retain(|&e| e != (parent, child));
                self.graph.remove_edge(edge).is_some()
            }
            None => false,
        }
    }

    pub fn has_edge(&self, parent: NodeId, child: NodeId) -> bool {
        self.graph.find_edge(parent, child).is_some()
    }

    #[inline(always)]
    pub fn node(&self, id: NodeId) -> &NodeData { &self.graph[id] }

    #[inline(always)]
    pub fn node_mut(&mut self, id: NodeId) -> &mut NodeData { &mut self.graph[id] }

    pub fn label(&self, id: NodeId) -> &str { &self.graph[id].label }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_order.iter().copied()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.node_ids().map(move |id| self.label(id))
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edge_order
            .iter()
            .map(move |&(p, c)| (self.label(p), self.label(c)))
    }

    pub fn parent_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors_directed(id, Direction::Incoming)
    }

    pub fn child_ids(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors_directed(id, Direction::Outgoing)
    }

    /// Parent labels, sorted so callers see a deterministic sequence.
    pub fn predecessors(&self, id: NodeId) -> Vec<&str> {
        let mut labels: Vec<&str> = self.parent_ids(id).map(|p| self.label(p)).collect();
        labels.sort_unstable();
        labels
    }

    /// Child labels, sorted.
    pub fn successors(&self, id: NodeId) -> Vec<&str> {
        let mut labels: Vec<&str> = self.child_ids(id).map(|c| self.label(c)).collect();
        labels.sort_unstable();
        labels
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.parent_ids(id).count()
    }

    pub fn out_degree(&self, id: NodeId) -> usize {
        self.child_ids(id).count()
    }

    /// DFS reachability: is there a directed path `from -> ... -> to`?
    pub fn has_path(&self, from: NodeId, to: NodeId) -> bool {
        let mut dfs = Dfs::new(&self.graph, from);
        while let Some(node) = dfs.next(&self.graph) {
            if node == to {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_node_is_idempotent() {
        let mut reg = GraphRegistry::new();
        let (a, created) = reg.add_node("a");
        assert!(created);
        let (again, created) = reg.add_node("a");
        assert!(!created);
        assert_eq!(a, again);
        assert_eq!(reg.node_count(), 1);
    }

    #[test]
    fn test_duplicate_edge_is_not_stored_twice() {
        let mut reg = GraphRegistry::new();
        let (a, _) = reg.add_node("a");
        let (b, _) = reg.add_node("b");
        assert!(reg.add_edge(a, b));
        assert!(!reg.add_edge(a, b));
        assert_eq!(reg.edge_count(), 1);
    }

    #[test]
    fn test_has_path_follows_direction() {
        let mut reg = GraphRegistry::new();
        let (a, _) = reg.add_node("a");
        let (b, _) = reg.add_node("b");
        let (c, _) = reg.add_node("c");
        reg.add_edge(a, b);
        reg.add_edge(b, c);
        assert!(reg.has_path(a, c));
        assert!(!reg.has_path(c, a));
    }

    #[test]
    fn test_remove_node_drops_incident_edges_and_index() {
        let mut reg = GraphRegistry::new();
        let (a, _) = reg.add_node("a");
        let (b, _) = reg.add_node("b");
        reg.add_edge(a, b);
        let removed = reg.remove_node("a").expect("node exists");
        assert_eq!(removed.label, "a");
        assert!(!reg.contains("a"));
        assert_eq!(reg.edge_count(), 0);
        assert!(reg.predecessors(b).is_empty());
    }

    #[test]
    fn test_listing_keeps_insertion_order_after_removal() {
        let mut reg = GraphRegistry::new();
        let (a, _) = reg.add_node("a");
        let (b, _) = reg.add_node("b");
        let (c, _) = reg.add_node("c");
        reg.add_edge(a, b);
        reg.add_edge(a, c);
        reg.add_edge(b, c);

        reg.remove_edge(a, b);
        let (x, _) = reg.add_node("x");
        reg.add_edge(c, x);
        assert_eq!(reg.edges().collect::<Vec<_>>(), vec![("a", "c"), ("b", "c"), ("c", "x")]);

        reg.remove_node("a");
        reg.add_node("z");
        assert_eq!(reg.labels().collect::<Vec<_>>(), vec!["b", "c", "x", "z"]);
        assert_eq!(reg.edges().collect::<Vec<_>>(), vec![("b", "c"), ("c", "x")]);
    }
}
