//! Label typing for nodes and edge endpoints.
//!
//! Labels are always strings. Inputs that arrive dynamically typed (JSON
//! documents, Python objects) go through [`AsLabel`] so a non-string value is
//! rejected before the model is touched.

use crate::validation::{DagError, Result};
use serde_json::Value;

/// Anything that can be offered as a node label.
///
/// `as_label` is the type gate: it either yields the string label or fails with
/// [`DagError::InvalidLabelType`].
pub trait AsLabel {
    fn as_label(&self) -> Result<&str>;
}

impl AsLabel for str {
    fn as_label(&self) -> Result<&str> {
        Ok(self)
    }
}

impl AsLabel for String {
    fn as_label(&self) -> Result<&str> {
        Ok(self.as_str())
    }
}

impl AsLabel for Value {
    fn as_label(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s.as_str()),
            other => Err(DagError::InvalidLabelType { found: json_kind(other) }),
        }
    }
}

impl<T: AsLabel + ?Sized> AsLabel for &T {
    fn as_label(&self) -> Result<&str> {
        (**self).as_label()
    }
}

/// Validates a single label, returning it as an owned string.
pub fn validate_label<L: AsLabel + ?Sized>(label: &L) -> Result<String> {
    label.as_label().map(str::to_string)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
