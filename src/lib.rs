//! A directed-acyclic-graph engine for Bayesian network structure.
//!
//! [`BayesianModel`] stores named nodes and parent -> child dependency edges
//! on top of a petgraph substrate. Every mutation is validated before it is
//! committed: labels must be strings, edges may not be self-loops, and no edge
//! may close a directed cycle. Batch calls are all-or-nothing.
//!
//! Each node also carries parent-rule bookkeeping (see [`graph::rules`]) and a
//! list of discrete states for later inference.
//!
//! ```
//! use bayes_dag_core::{BayesianModel, DagError};
//!
//! let mut model = BayesianModel::from_edges([("rain", "wet"), ("sprinkler", "wet")])?;
//! model.add_states("rain", ["yes", "no"])?;
//! assert_eq!(model.predecessors("wet")?, vec!["rain", "sprinkler"]);
//! assert!(matches!(model.add_edge("wet", "rain"), Err(DagError::Cycle { .. })));
//! # Ok::<(), DagError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod graph;
pub mod store;
pub mod validation;

#[cfg(feature = "python")]
mod bindings;

pub use config::DagConfig;
pub use graph::{AsLabel, BayesianModel, NodeData, State};
pub use validation::{DagError, Result};

#[cfg(feature = "python")]
use pyo3::prelude::*;

// --- Module Definition ---
/// This function defines the `_core` Python module.
#[cfg(feature = "python")]
#[pymodule]
fn _core(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<bindings::python::PyBayesianModel>()?;
    m.add("SelfLoopError", m.py().get_type::<bindings::python::SelfLoopError>())?;
    m.add("CycleError", m.py().get_type::<bindings::python::CycleError>())?;
    Ok(())
}
