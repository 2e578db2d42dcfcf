use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::SchemaError;

/// The underlying (nullability-stripped) type of a declared field.
///
/// An optional field and a required field of the same kind are the
/// same `FieldKind`; "unset" is expressed by [`Schema::get`] returning
/// `None`, never by a separate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Str,
    Int,
    Bool,
    StrList,
    Duration,
}

/// A field value in transit from a source schema to the target schema.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Bool(bool),
    StrList(Vec<String>),
    Duration(Duration),
}

impl FieldValue {
    /// The kind of this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Str(_) => FieldKind::Str,
            FieldValue::Int(_) => FieldKind::Int,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::StrList(_) => FieldKind::StrList,
            FieldValue::Duration(_) => FieldKind::Duration,
        }
    }
}

/// Name and underlying kind of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    /// Two fields correspond when both the name and the underlying
    /// kind are equal.
    pub fn matches(&self, other: &FieldDescriptor) -> bool {
        self.name == other.name && self.kind == other.kind
    }
}

/// A source-side schema: a type whose fields can be enumerated and
/// read generically.
///
/// `fields` must return the declared fields in declaration order; the
/// order fixes the merge-table order and therefore test fixtures.
/// `get` returns `None` when the field is unset (or unknown), which is
/// what lets group-level defaults and target defaults take over.
pub trait Schema {
    /// Declared fields, in declaration order.
    fn fields() -> &'static [FieldDescriptor];

    /// Read one field by name. `None` means unset.
    fn get(&self, field: &str) -> Option<FieldValue>;
}

/// The target schema: a type with defaults that can be assigned
/// generically.
pub trait TargetSchema: Default {
    /// Declared fields, in declaration order.
    fn fields() -> &'static [FieldDescriptor];

    /// Assign one field by name. Unknown names and mismatched kinds
    /// are ignored.
    fn set(&mut self, field: &str, value: FieldValue);
}

/// Find the target field corresponding to `source`: equal name and
/// equal underlying kind. Returns `None` when the target schema has no
/// counterpart, in which case the source field is simply not copied.
///
/// Field names are unique within a type, so at most one target field
/// can match.
pub fn match_field(
    targets: &[FieldDescriptor],
    source: &FieldDescriptor,
) -> Option<FieldDescriptor> {
    targets.iter().copied().find(|t| t.matches(source))
}

/// Validate a declarative field table: field names must be unique
/// within the type. Meant to run once at startup for caller-authored
/// schemas; the shipped types are valid by construction.
pub fn validate_schema<S: Schema>() -> Result<(), SchemaError> {
    let fields = S::fields();
    for (i, field) in fields.iter().enumerate() {
        if fields[..i].iter().any(|prev| prev.name == field.name) {
            return Err(SchemaError::DuplicateField {
                schema: std::any::type_name::<S>(),
                field: field.name,
            });
        }
    }
    Ok(())
}
