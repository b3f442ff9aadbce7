//! FFI bindings exposing the model to Python.
//!
//! Python hands us arbitrary objects, so labels are type-checked here and a
//! non-`str` label raises `TypeError` before the model is touched. State
//! names are looser: any object is accepted and stored as its `str()`, so
//! `add_states("x", [1, 2, 3])` yields states `"1"`, `"2"`, `"3"`.

use crate::graph::BayesianModel;
use crate::store;
use crate::validation::DagError;
use pyo3::exceptions::{PyKeyError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyString;

pyo3::create_exception!(_core, SelfLoopError, PyValueError);
pyo3::create_exception!(_core, CycleError, PyValueError);

fn to_py_err(e: DagError) -> PyErr {
    match e {
        DagError::InvalidLabelType { .. } => PyTypeError::new_err(e.to_string()),
        DagError::SelfLoop { .. } => SelfLoopError::new_err(e.to_string()),
        DagError::Cycle { .. } => CycleError::new_err(e.to_string()),
        DagError::NodeNotFound(_) | DagError::EdgeNotFound { .. } | DagError::StateNotFound { .. } => {
            PyKeyError::new_err(e.to_string())
        }
        DagError::Snapshot(_) => PyValueError::new_err(e.to_string()),
    }
}

fn extract_label(obj: &Bound<'_, PyAny>) -> PyResult<String> {
    if obj.is_instance_of::<PyString>() {
        obj.extract()
    } else {
        let kind = obj.get_type().name()?;
        Err(PyTypeError::new_err(format!("Node labels must be strings, got {}", kind)))
    }
}

fn extract_labels(items: &Bound<'_, PyAny>) -> PyResult<Vec<String>> {
    let mut labels = Vec::new();
    for item in items.try_iter()? {
        labels.push(extract_label(&item?)?);
    }
    Ok(labels)
}

fn extract_edges(ebunch: &Bound<'_, PyAny>) -> PyResult<Vec<(String, String)>> {
    let mut edges = Vec::new();
    for item in ebunch.try_iter()? {
        let (parent, child): (Bound<'_, PyAny>, Bound<'_, PyAny>) = item?.extract()?;
        edges.push((extract_label(&parent)?, extract_label(&child)?));
    }
    Ok(edges)
}

fn extract_state_names(states: &Bound<'_, PyAny>) -> PyResult<Vec<String>> {
    let mut names = Vec::new();
    for item in states.try_iter()? {
        names.push(item?.str()?.extract()?);
    }
    Ok(names)
}

fn owned(labels: Vec<&str>) -> Vec<String> {
    labels.into_iter().map(str::to_string).collect()
}

#[pyclass(name = "_BayesianModel")]
#[derive(Debug, Clone, Default)]
pub struct PyBayesianModel {
    model: BayesianModel,
}

#[pymethods]
impl PyBayesianModel {
    #[new]
    #[pyo3(signature = (ebunch=None))]
    pub fn new(ebunch: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let mut model = BayesianModel::new();
        if let Some(ebunch) = ebunch {
            model.add_edges_from(extract_edges(ebunch)?).map_err(to_py_err)?;
        }
        Ok(Self { model })
    }

    pub fn add_node(&mut self, node: &Bound<'_, PyAny>) -> PyResult<()> {
        let label = extract_label(node)?;
        self.model.add_node(&label).map_err(to_py_err)
    }

    pub fn add_nodes_from(&mut self, nodes: &Bound<'_, PyAny>) -> PyResult<()> {
        let labels = extract_labels(nodes)?;
        self.model.add_nodes_from(&labels).map_err(to_py_err)
    }

    pub fn add_edge(&mut self, u: &Bound<'_, PyAny>, v: &Bound<'_, PyAny>) -> PyResult<()> {
        let (u, v) = (extract_label(u)?, extract_label(v)?);
        self.model.add_edge(&u, &v).map_err(to_py_err)
    }

    pub fn add_edges_from(&mut self, ebunch: &Bound<'_, PyAny>) -> PyResult<()> {
        let edges = extract_edges(ebunch)?;
        self.model.add_edges_from(edges).map_err(to_py_err)
    }

    pub fn add_states(&mut self, node: &str, states: &Bound<'_, PyAny>) -> PyResult<()> {
        let names = extract_state_names(states)?;
        self.model.add_states(node, names).map_err(to_py_err)
    }

    pub fn set_observations(&mut self, node: &str, states: &Bound<'_, PyAny>) -> PyResult<()> {
        let names = extract_state_names(states)?;
        self.model.set_observations(node, names).map_err(to_py_err)
    }

    pub fn reset_observations(&mut self, node: &str) -> PyResult<()> {
        self.model.reset_observations(node).map_err(to_py_err)
    }

    pub fn remove_edge(&mut self, u: &str, v: &str) -> PyResult<()> {
        self.model.remove_edge(u, v).map_err(to_py_err)
    }

    pub fn remove_node(&mut self, node: &str) -> PyResult<()> {
        self.model.remove_node(node).map_err(to_py_err)
    }

    pub fn nodes(&self) -> Vec<String> { owned(self.model.nodes()) }

    pub fn edges(&self) -> Vec<(String, String)> {
        self.model.edges().into_iter().map(|(p, c)| (p.to_string(), c.to_string())).collect()
    }

    pub fn predecessors(&self, node: &str) -> PyResult<Vec<String>> {
        self.model.predecessors(node).map(owned).map_err(to_py_err)
    }

    pub fn successors(&self, node: &str) -> PyResult<Vec<String>> {
        self.model.successors(node).map(owned).map_err(to_py_err)
    }

    pub fn rule_groups(&self, node: &str) -> PyResult<Vec<usize>> {
        self.model.rule_groups(node).map(<[usize]>::to_vec).map_err(to_py_err)
    }

    pub fn parent_batches(&self, node: &str) -> PyResult<Vec<usize>> {
        self.model.parent_batches(node).map(<[usize]>::to_vec).map_err(to_py_err)
    }

    /// States as `(name, observed_status)` pairs.
    pub fn get_states(&self, node: &str) -> PyResult<Vec<(String, bool)>> {
        self.model
            .states(node)
            .map(|states| states.iter().map(|s| (s.name.clone(), s.observed_status)).collect())
            .map_err(to_py_err)
    }

    pub fn topological_order(&self) -> PyResult<Vec<String>> {
        self.model.topological_order().map(owned).map_err(to_py_err)
    }

    pub fn to_json(&self) -> PyResult<String> {
        store::to_json(&self.model).map_err(to_py_err)
    }

    #[staticmethod]
    pub fn from_json(json: &str) -> PyResult<Self> {
        Ok(Self { model: store::from_json(json).map_err(to_py_err)? })
    }

    pub fn node_count(&self) -> usize { self.model.node_count() }
}
