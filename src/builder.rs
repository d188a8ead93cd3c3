// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for ModelDescriptor.

use crate::descriptor::{FieldKind, FieldSpec, ModelDescriptor, PrimitiveKind};
use crate::error::{Result, SchemaError};
use crate::value::Value;
use std::sync::Arc;

impl ModelDescriptor {
    /// Synthesize a model from a name and field specifications.
    ///
    /// Field order is preserved. The specifications are moved in; the
    /// returned descriptor shares nothing with caller-owned data.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateField`] when two specifications
    /// carry the same name.
    pub fn synthesize(name: impl Into<String>, fields: Vec<FieldSpec>) -> Result<Self> {
        let name = name.into();
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    model: name,
                    field: field.name.clone(),
                });
            }
        }
        Ok(Self { name, fields })
    }
}

/// Builder for creating ModelDescriptor instances.
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl ModelBuilder {
    /// Create a new builder for a model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec::new(name, kind));
        self
    }

    /// Add an optional field with a default value.
    pub fn optional_field(
        mut self,
        name: impl Into<String>,
        kind: FieldKind,
        default: Value,
    ) -> Self {
        self.fields.push(FieldSpec::new(name, kind).with_default(default));
        self
    }

    /// Add a fully specified field.
    pub fn field_spec(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// Add a required text field.
    pub fn text_field(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Primitive(PrimitiveKind::Text))
    }

    /// Add a required integer field.
    pub fn int_field(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Primitive(PrimitiveKind::Int))
    }

    /// Add a required float field.
    pub fn float_field(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Primitive(PrimitiveKind::Float))
    }

    /// Add a required bool field.
    pub fn bool_field(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::Primitive(PrimitiveKind::Bool))
    }

    /// Add a required sequence field.
    pub fn sequence_field(self, name: impl Into<String>, element: FieldKind) -> Self {
        self.field(name, FieldKind::Sequence(Box::new(element)))
    }

    /// Add a required nested-model field.
    pub fn nested_field(self, name: impl Into<String>, nested: Arc<ModelDescriptor>) -> Self {
        self.field(name, FieldKind::Object(nested))
    }

    /// Build the ModelDescriptor.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateField`] when two fields share a name.
    pub fn build(self) -> Result<ModelDescriptor> {
        ModelDescriptor::synthesize(self.name, self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_builder() {
        let desc = ModelBuilder::new("Point3D")
            .float_field("x")
            .float_field("y")
            .float_field("z")
            .build()
            .expect("build");

        assert_eq!(desc.name, "Point3D");
        assert_eq!(desc.fields.len(), 3);
        assert!(desc.field("x").is_some());
    }

    #[test]
    fn test_field_order_preserved() {
        let desc = ModelBuilder::new("Row")
            .text_field("zeta")
            .int_field("alpha")
            .bool_field("mid")
            .build()
            .expect("build");

        let names: Vec<&str> = desc.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = ModelBuilder::new("Point")
            .float_field("x")
            .float_field("x")
            .build()
            .expect_err("duplicate");

        match err {
            SchemaError::DuplicateField { model, field } => {
                assert_eq!(model, "Point");
                assert_eq!(field, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_field_default() {
        let desc = ModelBuilder::new("Config")
            .text_field("host")
            .optional_field(
                "port",
                FieldKind::Primitive(PrimitiveKind::Int),
                Value::Int(8080),
            )
            .build()
            .expect("build");

        let port = desc.field("port").expect("field");
        assert!(!port.is_required());
        assert_eq!(port.default, Some(Value::Int(8080)));
        assert!(desc.field("host").expect("field").is_required());
    }

    #[test]
    fn test_nested_builder() {
        let point = Arc::new(
            ModelBuilder::new("Point")
                .float_field("x")
                .float_field("y")
                .build()
                .expect("build"),
        );

        let rect = ModelBuilder::new("Rectangle")
            .nested_field("top_left", point.clone())
            .nested_field("bottom_right", point)
            .build()
            .expect("build");

        assert_eq!(rect.fields.len(), 2);
        match &rect.field("top_left").expect("field").kind {
            FieldKind::Object(desc) => assert_eq!(desc.name, "Point"),
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_sequence_builder_field() {
        let desc = ModelBuilder::new("Batch")
            .sequence_field("ids", FieldKind::Primitive(PrimitiveKind::Int))
            .build()
            .expect("build");

        match &desc.field("ids").expect("field").kind {
            FieldKind::Sequence(inner) => {
                assert_eq!(**inner, FieldKind::Primitive(PrimitiveKind::Int));
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }
}
