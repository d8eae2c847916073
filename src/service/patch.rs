//! Patch application over the JSON form of one domain value
//!
//! Paths are resolved against a closed per-domain field table before any
//! change is made; anything outside that table is rejected. The applier works
//! on a copy and never touches storage.

use crate::domain::{PatchOp, PatchOperation};
use crate::error::{AppError, Result};
use serde_json::Value;

/// Declared type of an addressable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Integer,
    Text,
    /// Set-like list of strings; add/remove work element-wise
    Collection,
    /// Set-like list of objects, compared structurally
    ObjectCollection,
    /// Derived or identity field, never writable
    ReadOnly,
}

impl FieldKind {
    pub fn is_collection(self) -> bool {
        matches!(self, FieldKind::Collection | FieldKind::ObjectCollection)
    }
}

/// A resolved patch target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    /// JSON pointer into the current value
    pub pointer: String,
    /// JSON pointer into the default value; `None` when the field has no default
    pub default_pointer: Option<String>,
    pub kind: FieldKind,
}

impl FieldRef {
    /// A top-level field whose default lives at the same pointer
    pub fn at(pointer: &str, kind: FieldKind) -> Self {
        Self {
            pointer: pointer.to_string(),
            default_pointer: Some(pointer.to_string()),
            kind,
        }
    }
}

/// Applies ordered add/replace/remove operations to a domain value
pub struct PatchApplier;

impl PatchApplier {
    /// Apply `ops` in order to a copy of `current`.
    ///
    /// `resolve` maps a request path to its field, given the working copy.
    /// The first failing operation rejects the whole sequence.
    pub fn apply<F>(
        current: &Value,
        default: &Value,
        ops: &[PatchOperation],
        resolve: F,
    ) -> Result<Value>
    where
        F: Fn(&str, &Value) -> Option<FieldRef>,
    {
        let mut candidate = current.clone();

        for operation in ops {
            if !operation.path.starts_with('/') {
                return Err(AppError::InvalidPatchOperation(format!(
                    "Path '{}' must start with '/'",
                    operation.path
                )));
            }

            let field = resolve(&operation.path, &candidate).ok_or_else(|| {
                AppError::InvalidPatchOperation(format!("Unknown path '{}'", operation.path))
            })?;

            if field.kind == FieldKind::ReadOnly {
                return Err(AppError::InvalidPatchOperation(format!(
                    "Path '{}' is read-only",
                    operation.path
                )));
            }

            match operation.op {
                PatchOp::Add => Self::add(&mut candidate, &field, operation)?,
                PatchOp::Replace => Self::replace(&mut candidate, &field, operation)?,
                PatchOp::Remove => Self::remove(&mut candidate, default, &field, operation)?,
            }
        }

        Ok(candidate)
    }

    fn add(candidate: &mut Value, field: &FieldRef, operation: &PatchOperation) -> Result<()> {
        let value = required_value(operation)?;

        if field.kind.is_collection() {
            let additions = elements(field.kind, value, &operation.path)?;
            let items = collection_mut(candidate, field, &operation.path)?;
            for item in additions {
                if !items.contains(&item) {
                    items.push(item);
                }
            }
            return Ok(());
        }

        check_type(field.kind, value, &operation.path)?;
        set(candidate, &field.pointer, value.clone(), &operation.path)
    }

    fn replace(candidate: &mut Value, field: &FieldRef, operation: &PatchOperation) -> Result<()> {
        let value = required_value(operation)?;

        if candidate.pointer(&field.pointer).is_none() {
            return Err(AppError::InvalidPatchOperation(format!(
                "Cannot replace missing path '{}'",
                operation.path
            )));
        }

        if field.kind.is_collection() {
            if !value.is_array() {
                return Err(type_mismatch(&operation.path, "an array"));
            }
            let items = elements(field.kind, value, &operation.path)?;
            return set(candidate, &field.pointer, Value::Array(items), &operation.path);
        }

        check_type(field.kind, value, &operation.path)?;
        set(candidate, &field.pointer, value.clone(), &operation.path)
    }

    fn remove(
        candidate: &mut Value,
        default: &Value,
        field: &FieldRef,
        operation: &PatchOperation,
    ) -> Result<()> {
        if field.kind.is_collection() {
            if let Some(value) = &operation.value {
                let removals = elements(field.kind, value, &operation.path)?;
                let items = collection_mut(candidate, field, &operation.path)?;
                items.retain(|item| !removals.contains(item));
                return Ok(());
            }
        }

        let reset = field
            .default_pointer
            .as_deref()
            .and_then(|pointer| default.pointer(pointer))
            .cloned()
            .ok_or_else(|| {
                AppError::InvalidPatchOperation(format!(
                    "Path '{}' has no default to reset to",
                    operation.path
                ))
            })?;

        set(candidate, &field.pointer, reset, &operation.path)
    }
}

fn required_value(operation: &PatchOperation) -> Result<&Value> {
    operation.value.as_ref().ok_or_else(|| {
        AppError::InvalidPatchOperation(format!(
            "Operation '{}' on '{}' requires a value",
            operation.op, operation.path
        ))
    })
}

fn type_mismatch(path: &str, expected: &str) -> AppError {
    AppError::InvalidPatchOperation(format!("Value for '{}' must be {}", path, expected))
}

fn check_type(kind: FieldKind, value: &Value, path: &str) -> Result<()> {
    match kind {
        FieldKind::Bool if !value.is_boolean() => Err(type_mismatch(path, "a boolean")),
        FieldKind::Integer if !(value.is_i64() || value.is_u64()) => {
            Err(type_mismatch(path, "an integer"))
        }
        FieldKind::Text if !value.is_string() => Err(type_mismatch(path, "a string")),
        _ => Ok(()),
    }
}

/// A single element or an array of elements, as a list
fn elements(kind: FieldKind, value: &Value, path: &str) -> Result<Vec<Value>> {
    let (accepts, expected): (fn(&Value) -> bool, _) = match kind {
        FieldKind::ObjectCollection => (Value::is_object, "an object or an array of objects"),
        _ => (Value::is_string, "a string or an array of strings"),
    };

    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                if accepts(item) {
                    Ok(item.clone())
                } else {
                    Err(type_mismatch(path, expected))
                }
            })
            .collect(),
        single if accepts(single) => Ok(vec![single.clone()]),
        _ => Err(type_mismatch(path, expected)),
    }
}

fn collection_mut<'a>(
    candidate: &'a mut Value,
    field: &FieldRef,
    path: &str,
) -> Result<&'a mut Vec<Value>> {
    candidate
        .pointer_mut(&field.pointer)
        .and_then(Value::as_array_mut)
        .ok_or_else(|| AppError::InvalidPatchOperation(format!("Path '{}' is not a list", path)))
}

fn set(candidate: &mut Value, pointer: &str, value: Value, path: &str) -> Result<()> {
    if let Some(slot) = candidate.pointer_mut(pointer) {
        *slot = value;
        return Ok(());
    }

    // Field absent: create it if the parent is an object
    let (parent, key) = pointer
        .rsplit_once('/')
        .ok_or_else(|| AppError::InvalidPatchOperation(format!("Invalid path '{}'", path)))?;
    let container = if parent.is_empty() {
        Some(candidate)
    } else {
        candidate.pointer_mut(parent)
    };

    match container.and_then(Value::as_object_mut) {
        Some(object) => {
            object.insert(key.to_string(), value);
            Ok(())
        }
        None => Err(AppError::InvalidPatchOperation(format!(
            "Cannot create '{}'",
            path
        ))),
    }
}
