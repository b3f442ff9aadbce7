//! Gatekeeping for every mutation: label typing, self-loops, cycles.
//!
//! Nothing in this module mutates the model. The engine runs the checks for a
//! whole call first and only then commits, so a failure leaves no trace.

pub mod error;
pub mod structural;
pub mod validator;

pub use error::{DagError, Result};
pub use structural::{validate_acyclic, validate_no_self_loop};
pub use validator::{validate_labels, EdgeBatchValidator};
pub use crate::graph::label::validate_label;
