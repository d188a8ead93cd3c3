// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Model descriptors for runtime schema information.

use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Primitive field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Text,
    Int,
    Float,
    Bool,
}

impl PrimitiveKind {
    /// Schema document type tag for this kind.
    pub fn json_name(&self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Int => "integer",
            Self::Float => "number",
            Self::Bool => "boolean",
        }
    }
}

/// Field kind enumeration.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Primitive value.
    Primitive(PrimitiveKind),
    /// Nested model with its own descriptor.
    Object(Arc<ModelDescriptor>),
    /// Open string-keyed mapping with unconstrained values.
    Map,
    /// Sequence with a uniform element kind.
    Sequence(Box<FieldKind>),
    /// Unconstrained value.
    Any,
}

impl FieldKind {
    /// Human-readable kind name for diagnostics.
    pub fn type_name(&self) -> String {
        match self {
            Self::Primitive(p) => p.json_name().to_string(),
            Self::Object(desc) => desc.name.clone(),
            Self::Map => "map".to_string(),
            Self::Sequence(inner) => format!("sequence of {}", inner.type_name()),
            Self::Any => "any".to_string(),
        }
    }
}

/// Field descriptor for model members.
///
/// A field with no default is required: construction must supply a value.
/// Attaching a default (including [`Value::Null`]) makes the field optional.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Field kind.
    pub kind: FieldKind,
    /// Default value. `None` marks the field required.
    pub default: Option<Value>,
    /// Description carried over from the schema document.
    pub description: Option<String>,
}

impl FieldSpec {
    /// Create a required field.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            description: None,
        }
    }

    /// Attach a default value, making the field optional.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether a value must be supplied at construction time.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A complete model descriptor: a named record type with ordered fields.
///
/// Descriptors are immutable once synthesized and shared via [`Arc`]
/// between registry entries, nested fields, and live records.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    /// Model name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl ModelDescriptor {
    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Iterate required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.is_required())
    }
}

/// The models produced by one schema load, keyed by model name.
#[derive(Debug, Clone, Default)]
pub struct ModelSet {
    models: HashMap<String, Arc<ModelDescriptor>>,
}

impl ModelSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Insert a model under its descriptor name. Replaces any previous entry.
    pub fn insert(&mut self, descriptor: Arc<ModelDescriptor>) {
        self.models.insert(descriptor.name.clone(), descriptor);
    }

    /// Get a model by name.
    pub fn get(&self, name: &str) -> Option<&Arc<ModelDescriptor>> {
        self.models.get(name)
    }

    /// Check if a model is present.
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Number of models in the set.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Model names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.keys().cloned().collect();
        names.sort();
        names
    }
}
