use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Field-level validation failures, keyed by field name.
///
/// Serializes as `{"name": ["..."], "description": ["..."]}` so handlers can
/// return it directly as a 400 body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("validation failed for {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the fields that failed, in sorted order.
    pub fn fields(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Messages recorded for a single field.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Errors raised while applying a patch document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("The target location specified by path '{0}' was not found.")]
    UnknownPath(String),
    #[error("The '{0}' operation requires a 'value'.")]
    MissingValue(&'static str),
    #[error("The '{0}' operation requires a 'from' path.")]
    MissingFrom(&'static str),
    #[error("The current value at '{0}' is not equal to the test value.")]
    TestFailed(String),
    #[error("The patched document is invalid: {0}")]
    InvalidDocument(String),
}
