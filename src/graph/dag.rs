//! dag.rs
//! The constrained DAG engine: wraps the `GraphRegistry`, validates every
//! mutation, and keeps per-node rule bookkeeping current.

use super::label::AsLabel;
use super::node::{NodeData, State};
use super::rules::ParentRuleUpdater;
use super::storage::GraphRegistry;
use crate::analysis::topology;
use crate::config::DagConfig;
use crate::validation::{validate_label, validate_labels, DagError, EdgeBatchValidator, Result};
use tracing::debug;

/// A Bayesian network structure: named nodes joined by dependency edges.
///
/// The edge set never contains a self-loop or a directed cycle. Every
/// mutation is validated in full before the registry is touched, so a failed
/// call leaves the model exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct BayesianModel {
    pub(crate) store: GraphRegistry,
    config: DagConfig,
}

impl BayesianModel {
    pub fn new() -> Self { Self::default() }

    pub fn with_config(config: DagConfig) -> Self {
        Self { store: GraphRegistry::new(), config }
    }

    /// Builds a model from an initial edge list, validated as one batch.
    pub fn from_edges<I, P, C>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsLabel,
        C: AsLabel,
    {
        Self::from_edges_with_config(DagConfig::default(), pairs)
    }

    /// As [`from_edges`](Self::from_edges), with the edge list validated under `config`.
    pub fn from_edges_with_config<I, P, C>(config: DagConfig, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsLabel,
        C: AsLabel,
    {
        let mut model = Self::with_config(config);
        model.add_edges_from(pairs)?;
        Ok(model)
    }

    pub fn config(&self) -> &DagConfig { &self.config }

    // --- Mutation ---

    /// Adds a node. Adding a node that already exists changes nothing.
    pub fn add_node<L: AsLabel + ?Sized>(&mut self, label: &L) -> Result<()> {
        let label = validate_label(label)?;
        if self.store.add_node(&label).1 {
            debug!(node = %label, "added node");
        }
        Ok(())
    }

    /// Adds several nodes. Every label is checked before any node is added.
    pub fn add_nodes_from<I>(&mut self, labels: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsLabel,
    {
        let labels = validate_labels(labels)?;
        let created = labels.iter().filter(|label| self.store.add_node(label).1).count();
        debug!(created, total = self.store.node_count(), "added nodes");
        Ok(())
    }

    /// Adds `parent -> child`, creating either endpoint if it is missing.
    pub fn add_edge<P, C>(&mut self, parent: &P, child: &C) -> Result<()>
    where
        P: AsLabel + ?Sized,
        C: AsLabel + ?Sized,
    {
        self.add_edges_from(std::iter::once((parent, child)))
    }

    /// Adds several edges as one call.
    ///
    /// The batch is validated as if its edges were inserted one by one in
    /// input order; if any edge is rejected, none are committed. Parents
    /// gained by one child within this call count as a single batch.
    pub fn add_edges_from<I, P, C>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsLabel,
        C: AsLabel,
    {
        let edges = EdgeBatchValidator::new(&self.store, &self.config).validate(pairs)?;

        let mut updater = ParentRuleUpdater::new();
        for (parent, child) in &edges {
            let (p, _) = self.store.add_node(parent);
            let (c, _) = self.store.add_node(child);
            let had_parents = self.store.in_degree(c) > 0;
            if self.store.add_edge(p, c) {
                updater.on_edge_added(&mut self.store, p, c, had_parents);
            }
        }

        debug!(
            committed = edges.len(),
            nodes = self.store.node_count(),
            edges = self.store.edge_count(),
            "added edges"
        );
        Ok(())
    }

    /// Appends one unobserved state per name to `node`, keeping earlier states.
    pub fn add_states<I>(&mut self, node: &str, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let observed = self.config.default_observed;
        let data = self.node_mut(node)?;
        let before = data.states.len();
        data.states.extend(names.into_iter().map(|name| State {
            name: name.as_ref().to_string(),
            observed_status: observed,
        }));
        debug!(node, added = data.states.len() - before, "added states");
        Ok(())
    }

    /// Marks the named states of `node` as observed.
    ///
    /// Every name must exist on the node; otherwise nothing is changed.
    pub fn set_observations<I>(&mut self, node: &str, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let data = self.node_mut(node)?;
        let mut positions = Vec::new();
        for name in names {
            let name = name.as_ref();
            let pos = data.states.iter().position(|s| s.name == name).ok_or_else(|| {
                DagError::StateNotFound { node: node.to_string(), state: name.to_string() }
            })?;
            positions.push(pos);
        }
        for pos in positions {
            data.states[pos].observed_status = true;
        }
        Ok(())
    }

    /// Clears every observed flag on `node`.
    pub fn reset_observations(&mut self, node: &str) -> Result<()> {
        for state in &mut self.node_mut(node)?.states {
            state.observed_status = false;
        }
        Ok(())
    }

    pub fn remove_edge(&mut self, parent: &str, child: &str) -> Result<()> {
        let p = self.id(parent)?;
        let c = self.id(child)?;
        if !self.store.remove_edge(p, c) {
            return Err(DagError::EdgeNotFound {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }
        ParentRuleUpdater::on_edge_removed(&mut self.store, p);
        debug!(parent, child, "removed edge");
        Ok(())
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(&mut self, label: &str) -> Result<()> {
        let id = self.id(label)?;
        let parents: Vec<_> = self.store.parent_ids(id).collect();
        self.store.remove_node(label);
        for parent in parents {
            ParentRuleUpdater::on_edge_removed(&mut self.store, parent);
        }
        debug!(node = label, "removed node");
        Ok(())
    }

    // --- Queries ---

    pub fn node_count(&self) -> usize { self.store.node_count() }
    pub fn edge_count(&self) -> usize { self.store.edge_count() }
    pub fn has_node(&self, label: &str) -> bool { self.store.contains(label) }

    pub fn has_edge(&self, parent: &str, child: &str) -> bool {
        match (self.store.id(parent), self.store.id(child)) {
            (Some(p), Some(c)) => self.store.has_edge(p, c),
            _ => false,
        }
    }

    pub fn nodes(&self) -> Vec<&str> { self.store.labels().collect() }

    pub fn edges(&self) -> Vec<(&str, &str)> { self.store.edges().collect() }

    pub fn predecessors(&self, node: &str) -> Result<Vec<&str>> {
        Ok(self.store.predecessors(self.id(node)?))
    }

    pub fn successors(&self, node: &str) -> Result<Vec<&str>> {
        Ok(self.store.successors(self.id(node)?))
    }

    /// Same as [`predecessors`](Self::predecessors); named for the
    /// probability-table builder.
    pub fn parents(&self, node: &str) -> Result<Vec<&str>> {
        self.predecessors(node)
    }

    pub fn node_data(&self, node: &str) -> Result<&NodeData> {
        Ok(self.store.node(self.id(node)?))
    }

    pub fn rule_groups(&self, node: &str) -> Result<&[usize]> {
        Ok(self.node_data(node)?.parent_rule_groups.as_slice())
    }

    pub fn parent_batches(&self, node: &str) -> Result<&[usize]> {
        Ok(self.node_data(node)?.parent_batches.as_slice())
    }

    pub fn states(&self, node: &str) -> Result<&[State]> {
        Ok(self.node_data(node)?.states.as_slice())
    }

    pub fn state_names(&self, node: &str) -> Result<Vec<&str>> {
        Ok(self.node_data(node)?.state_names().collect())
    }

    pub fn number_of_states(&self, node: &str) -> Result<usize> {
        Ok(self.node_data(node)?.states.len())
    }

    pub fn observed_states(&self, node: &str) -> Result<Vec<&str>> {
        Ok(self
            .node_data(node)?
            .states
            .iter()
            .filter(|s| s.observed_status)
            .map(|s| s.name.as_str())
            .collect())
    }

    // --- Graph Algorithms ---

    /// Node labels with every parent before its children.
    pub fn topological_order(&self) -> Result<Vec<&str>> {
        let order = topology::sort(&self.store)?;
        Ok(order.into_iter().map(|id| self.store.label(id)).collect())
    }

    /// Every node with a directed path to `node`, sorted.
    pub fn ancestors(&self, node: &str) -> Result<Vec<&str>> {
        let found = topology::upstream_from(&self.store, self.id(node)?);
        Ok(self.sorted_labels(found))
    }

    /// Every node reachable from `node`, sorted.
    pub fn descendants(&self, node: &str) -> Result<Vec<&str>> {
        let found = topology::downstream_from(&self.store, self.id(node)?);
        Ok(self.sorted_labels(found))
    }

    // --- Helpers ---

    fn id(&self, label: &str) -> Result<super::NodeId> {
        self.store.id(label).ok_or_else(|| DagError::NodeNotFound(label.to_string()))
    }

    fn node_mut(&mut self, label: &str) -> Result<&mut NodeData> {
        let id = self.id(label)?;
        Ok(self.store.node_mut(id))
    }

    fn sorted_labels(&self, ids: impl IntoIterator<Item = super::NodeId>) -> Vec<&str> {
        let mut labels: Vec<&str> = ids.into_iter().map(|id| self.store.label(id)).collect();
        labels.sort_unstable();
        labels
    }
}
