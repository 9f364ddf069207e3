//! Patch documents for partial updates.
//!
//! A patch document is an ordered list of `{op, path, value, from}`
//! operations. Operations are applied to a serialized copy of the target; the
//! caller receives a new value and validates it before anything is stored.
//!
//! Only top-level members of the target can be addressed, matching the flat
//! update payloads this is used with. `remove` resets a member to `null`
//! instead of deleting it, since the target is a fixed-shape struct.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::PatchError;

/// The operation kind of a single patch step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl PatchOp {
    fn as_str(self) -> &'static str {
        match self {
            PatchOp::Add => "add",
            PatchOp::Remove => "remove",
            PatchOp::Replace => "replace",
            PatchOp::Move => "move",
            PatchOp::Copy => "copy",
            PatchOp::Test => "test",
        }
    }
}

/// One step of a patch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl PatchOperation {
    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op: PatchOp::Replace,
            path: path.into(),
            value: Some(value.into()),
            from: None,
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Remove,
            path: path.into(),
            value: None,
            from: None,
        }
    }

    fn required_value(&self) -> Result<Value, PatchError> {
        self.value
            .clone()
            .ok_or(PatchError::MissingValue(self.op.as_str()))
    }

    fn required_from(&self) -> Result<&str, PatchError> {
        self.from
            .as_deref()
            .ok_or(PatchError::MissingFrom(self.op.as_str()))
    }
}

/// An ordered list of patch operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

impl PatchDocument {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self(operations)
    }

    /// Applies every operation, in order, to a copy of `target`.
    ///
    /// The original is never modified. Any failing operation aborts the whole
    /// document.
    pub fn apply_to<T>(&self, target: &T) -> Result<T, PatchError>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut members = match serde_json::to_value(target) {
            Ok(Value::Object(members)) => members,
            Ok(_) => {
                return Err(PatchError::InvalidDocument(
                    "patch target is not an object".to_string(),
                ))
            }
            Err(e) => return Err(PatchError::InvalidDocument(e.to_string())),
        };

        for operation in &self.0 {
            apply_operation(&mut members, operation)?;
        }

        serde_json::from_value(Value::Object(members))
            .map_err(|e| PatchError::InvalidDocument(e.to_string()))
    }
}

fn apply_operation(
    members: &mut Map<String, Value>,
    operation: &PatchOperation,
) -> Result<(), PatchError> {
    let target = resolve_member(members, &operation.path)?;

    match operation.op {
        PatchOp::Add | PatchOp::Replace => {
            let value = operation.required_value()?;
            members.insert(target, value);
        }
        PatchOp::Remove => {
            members.insert(target, Value::Null);
        }
        PatchOp::Move => {
            let source = resolve_member(members, operation.required_from()?)?;
            let value = members.insert(source, Value::Null).unwrap_or(Value::Null);
            members.insert(target, value);
        }
        PatchOp::Copy => {
            let source = resolve_member(members, operation.required_from()?)?;
            let value = members.get(&source).cloned().unwrap_or(Value::Null);
            members.insert(target, value);
        }
        PatchOp::Test => {
            let expected = operation.required_value()?;
            if members.get(&target) != Some(&expected) {
                return Err(PatchError::TestFailed(operation.path.clone()));
            }
        }
    }

    Ok(())
}

/// Resolves a JSON Pointer to an existing top-level member name.
///
/// Matching is case-insensitive so `/Name` and `/name` address the same
/// member.
fn resolve_member(members: &Map<String, Value>, path: &str) -> Result<String, PatchError> {
    let unknown = || PatchError::UnknownPath(path.to_string());

    let segment = path.strip_prefix('/').ok_or_else(unknown)?;
    if segment.is_empty() || segment.contains('/') {
        return Err(unknown());
    }
    let segment = segment.replace("~1", "/").replace("~0", "~");

    members
        .keys()
        .find(|key| key.eq_ignore_ascii_case(&segment))
        .cloned()
        .ok_or_else(unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::PointOfInterestForUpdate;

    fn tower() -> PointOfInterestForUpdate {
        PointOfInterestForUpdate::new("Eiffel Tower").with_description("Famous tower")
    }

    #[test]
    fn test_replace_name() {
        let patch = PatchDocument::new(vec![PatchOperation::replace("/name", "La Tour Eiffel")]);

        let patched = patch.apply_to(&tower()).unwrap();

        assert_eq!(patched.name.as_deref(), Some("La Tour Eiffel"));
        assert_eq!(patched.description.as_deref(), Some("Famous tower"));
    }

    #[test]
    fn test_original_is_untouched() {
        let original = tower();
        let patch = PatchDocument::new(vec![PatchOperation::remove("/name")]);

        let patched = patch.apply_to(&original).unwrap();

        assert_eq!(patched.name, None);
        assert_eq!(original.name.as_deref(), Some("Eiffel Tower"));
    }

    #[test]
    fn test_deserializes_standard_document() {
        let json = r#"[
            {"op": "replace", "path": "/description", "value": "Iron lattice tower"},
            {"op": "test", "path": "/name", "value": "Eiffel Tower"}
        ]"#;
        let patch: PatchDocument = serde_json::from_str(json).unwrap();

        let patched = patch.apply_to(&tower()).unwrap();

        assert_eq!(patched.description.as_deref(), Some("Iron lattice tower"));
    }

    #[test]
    fn test_path_is_case_insensitive() {
        let patch = PatchDocument::new(vec![PatchOperation::replace("/Name", "Tour")]);
        let patched = patch.apply_to(&tower()).unwrap();
        assert_eq!(patched.name.as_deref(), Some("Tour"));
    }

    #[test]
    fn test_unknown_path_fails() {
        let patch = PatchDocument::new(vec![PatchOperation::replace("/height", 330)]);
        assert_eq!(
            patch.apply_to(&tower()).unwrap_err(),
            PatchError::UnknownPath("/height".to_string())
        );
    }

    #[test]
    fn test_nested_path_fails() {
        let patch = PatchDocument::new(vec![PatchOperation::replace("/name/first", "x")]);
        assert!(matches!(
            patch.apply_to(&tower()),
            Err(PatchError::UnknownPath(_))
        ));
    }

    #[test]
    fn test_replace_without_value_fails() {
        let patch = PatchDocument::new(vec![PatchOperation {
            op: PatchOp::Replace,
            path: "/name".to_string(),
            value: None,
            from: None,
        }]);
        assert_eq!(
            patch.apply_to(&tower()).unwrap_err(),
            PatchError::MissingValue("replace")
        );
    }

    #[test]
    fn test_wrong_value_type_fails() {
        let patch = PatchDocument::new(vec![PatchOperation::replace("/name", 42)]);
        assert!(matches!(
            patch.apply_to(&tower()),
            Err(PatchError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_move_and_copy() {
        let moved = PatchDocument::new(vec![PatchOperation {
            op: PatchOp::Move,
            path: "/name".to_string(),
            value: None,
            from: Some("/description".to_string()),
        }])
        .apply_to(&tower())
        .unwrap();
        assert_eq!(moved.name.as_deref(), Some("Famous tower"));
        assert_eq!(moved.description, None);

        let copied = PatchDocument::new(vec![PatchOperation {
            op: PatchOp::Copy,
            path: "/description".to_string(),
            value: None,
            from: Some("/name".to_string()),
        }])
        .apply_to(&tower())
        .unwrap();
        assert_eq!(copied.description.as_deref(), Some("Eiffel Tower"));
    }

    #[test]
    fn test_failed_test_operation_aborts() {
        let patch = PatchDocument::new(vec![
            PatchOperation::replace("/description", "changed"),
            PatchOperation {
                op: PatchOp::Test,
                path: "/name".to_string(),
                value: Some(Value::from("Louvre")),
                from: None,
            },
        ]);
        assert_eq!(
            patch.apply_to(&tower()).unwrap_err(),
            PatchError::TestFailed("/name".to_string())
        );
    }
}
