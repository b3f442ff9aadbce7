//! JSON snapshots of a model.
//!
//! Loading never trusts the document: every node and edge is replayed through
//! the validated mutation paths, so a snapshot carrying non-string labels,
//! self-loops or cycles is refused with the usual typed errors.

use crate::config::DagConfig;
use crate::graph::{AsLabel, BayesianModel, State};
use crate::validation::{DagError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub label: Value,
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub parent_batches: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    #[serde(default)]
    pub config: DagConfig,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<(Value, Value)>,
}

impl ModelSnapshot {
    pub fn capture(model: &BayesianModel) -> Self {
        let nodes = model
            .store
            .node_ids()
            .map(|id| {
                let data = model.store.node(id);
                NodeRecord {
                    label: Value::String(data.label.clone()),
                    states: data.states.clone(),
                    parent_batches: data.parent_batches.to_vec(),
                }
            })
            .collect();
        let edges = model
            .edges()
            .into_iter()
            .map(|(p, c)| (Value::from(p), Value::from(c)))
            .collect();
        Self { config: model.config().clone(), nodes, edges }
    }

    /// Rebuilds a model. Batch history recorded in the snapshot replaces the
    /// history implied by replaying all edges as one call.
    pub fn restore(&self) -> Result<BayesianModel> {
        let mut model = BayesianModel::with_config(self.config.clone());
        model.add_nodes_from(self.nodes.iter().map(|n| &n.label))?;
        model.add_edges_from(self.edges.iter().map(|(p, c)| (p, c)))?;

        for record in &self.nodes {
            let label = record.label.as_label()?;
            let id = model
                .store
                .id(label)
                .ok_or_else(|| DagError::Snapshot("node vanished during restore".to_string()))?;
            if record.parent_batches.iter().enumerate().any(|(i, &b)| i != b) {
                return Err(DagError::Snapshot(format!(
                    "parent batches of '{}' must count up from 0, got {:?}",
                    label, record.parent_batches
                )));
            }
            let data = model.store.node_mut(id);
            data.states = record.states.clone();
            if !record.parent_batches.is_empty() {
                data.parent_batches = record.parent_batches.iter().copied().collect();
            }
        }
        Ok(model)
    }
}

pub fn to_json(model: &BayesianModel) -> Result<String> {
    serde_json::to_string_pretty(&ModelSnapshot::capture(model))
        .map_err(|e| DagError::Snapshot(e.to_string()))
}

pub fn from_json(json: &str) -> Result<BayesianModel> {
    let snapshot: ModelSnapshot =
        serde_json::from_str(json).map_err(|e| DagError::Snapshot(e.to_string()))?;
    snapshot.restore()
}

pub fn save(model: &BayesianModel, path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(model)?;
    fs::write(path, json).map_err(|e| DagError::Snapshot(e.to_string()))
}

pub fn load(path: impl AsRef<Path>) -> Result<BayesianModel> {
    let json = fs::read_to_string(path).map_err(|e| DagError::Snapshot(e.to_string()))?;
    from_json(&json)
}
