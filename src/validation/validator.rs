//! The batch validator that gates every mutation before it reaches the substrate.
use super::error::{DagError, Result};
use super::structural::{validate_acyclic_staged, validate_no_self_loop};
use crate::config::DagConfig;
use crate::graph::label::AsLabel;
use crate::graph::storage::GraphRegistry;
use std::collections::{HashMap, HashSet};

/// Validates a batch of candidate edges against the registry without touching it.
///
/// Items are checked one at a time in input order, and each accepted edge is
/// staged so later items see it as present. The first failing item aborts the
/// whole batch; nothing is committed for that call.
pub struct EdgeBatchValidator<'a> {
    registry: &'a GraphRegistry,
    config: &'a DagConfig,
}

impl<'a> EdgeBatchValidator<'a> {
    /// Creates a new validator for the given registry.
    pub fn new(registry: &'a GraphRegistry, config: &'a DagConfig) -> Self {
        Self { registry, config }
    }

    /// Runs every rule over `pairs`.
    ///
    /// # Returns
    /// - `Ok(edges)`: the edges to commit, in input order, with duplicates
    ///   (already in the registry or repeated in the batch) dropped.
    /// - `Err(DagError)`: the first violation found.
    pub fn validate<I, P, C>(&self, pairs: I) -> Result<Vec<(String, String)>>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsLabel,
        C: AsLabel,
    {
        let labelled = pairs
            .into_iter()
            .map(|(p, c)| -> Result<(String, String)> {
                Ok((p.as_label()?.to_string(), c.as_label()?.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut pending: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut staged: HashSet<(&str, &str)> = HashSet::new();
        let mut accepted = Vec::with_capacity(labelled.len());

        for (parent, child) in &labelled {
            let (parent, child) = (parent.as_str(), child.as_str());
            validate_no_self_loop(parent, child)?;
            self.validate_endpoints(parent, child)?;

            if self.already_present(parent, child) || staged.contains(&(parent, child)) {
                continue;
            }
            validate_acyclic_staged(self.registry, &pending, parent, child)?;

            pending.entry(parent).or_default().push(child);
            staged.insert((parent, child));
            accepted.push((parent.to_string(), child.to_string()));
        }

        Ok(accepted)
    }

    /// In strict mode, both endpoints must already be nodes.
    fn validate_endpoints(&self, parent: &str, child: &str) -> Result<()> {
        if self.config.auto_create_endpoints {
            return Ok(());
        }
        for label in [parent, child] {
            if !self.registry.contains(label) {
                return Err(DagError::NodeNotFound(label.to_string()));
            }
        }
        Ok(())
    }

    fn already_present(&self, parent: &str, child: &str) -> bool {
        match (self.registry.id(parent), self.registry.id(child)) {
            (Some(p), Some(c)) => self.registry.has_edge(p, c),
            _ => false,
        }
    }
}

/// Validates every node label before any is added.
pub fn validate_labels<I>(labels: I) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsLabel,
{
    labels
        .into_iter()
        .map(|label| label.as_label().map(str::to_string))
        .collect()
}
