// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Record container enforcing a model descriptor's contract.

use crate::descriptor::{FieldKind, ModelDescriptor};
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Errors for Record operations.
#[derive(Debug)]
pub enum RecordError {
    FieldNotFound(String),
    MissingField { model: String, field: String },
    UnknownField { model: String, field: String },
    TypeMismatch { field: String, expected: String, got: String },
    InvalidDocument(String),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotFound(name) => write!(f, "Field not found: {}", name),
            Self::MissingField { model, field } => {
                write!(f, "Missing required field '{}' for model '{}'", field, model)
            }
            Self::UnknownField { model, field } => {
                write!(f, "Unknown field '{}' for model '{}'", field, model)
            }
            Self::TypeMismatch { field, expected, got } => {
                write!(f, "Type mismatch for '{}': expected {}, got {}", field, expected, got)
            }
            Self::InvalidDocument(msg) => write!(f, "Invalid document: {}", msg),
        }
    }
}

impl std::error::Error for RecordError {}

/// A validated instance of a model.
///
/// Construction checks the descriptor's contract: required fields must be
/// supplied, unknown fields are rejected, and every value must match its
/// declared kind. Optional fields absent from the input take their declared
/// default verbatim.
#[derive(Debug, Clone)]
pub struct Record {
    /// Model descriptor.
    descriptor: Arc<ModelDescriptor>,
    /// Field values, keyed by field name.
    values: HashMap<String, Value>,
}

impl Record {
    /// Create a record from field values, validating against the descriptor.
    pub fn new(
        descriptor: &Arc<ModelDescriptor>,
        values: HashMap<String, Value>,
    ) -> Result<Self, RecordError> {
        let values = validate_fields(descriptor, values)?;
        Ok(Self {
            descriptor: descriptor.clone(),
            values,
        })
    }

    /// Get the model descriptor.
    pub fn descriptor(&self) -> &Arc<ModelDescriptor> {
        &self.descriptor
    }

    /// Get the model name.
    pub fn model_name(&self) -> &str {
        &self.descriptor.name
    }

    /// Get a field value by name.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, RecordError> {
        T::from_value(self.get_value(name)?).map_err(|e| match e {
            RecordError::TypeMismatch { field, expected, got } if field.is_empty() => {
                RecordError::TypeMismatch {
                    field: name.to_string(),
                    expected,
                    got,
                }
            }
            other => other,
        })
    }

    /// Set a field value by name, validating against the field's kind.
    pub fn set<T: IntoValue>(&mut self, name: &str, value: T) -> Result<(), RecordError> {
        let field = self
            .descriptor
            .field(name)
            .ok_or_else(|| RecordError::FieldNotFound(name.to_string()))?;
        let value = coerce_value(name, &field.kind, value.into_value())?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Get raw field value by name.
    pub fn get_value(&self, name: &str) -> Result<&Value, RecordError> {
        if self.descriptor.field(name).is_none() {
            return Err(RecordError::FieldNotFound(name.to_string()));
        }
        self.values
            .get(name)
            .ok_or_else(|| RecordError::FieldNotFound(name.to_string()))
    }

    /// Iterate fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.descriptor
            .fields
            .iter()
            .filter_map(|f| self.values.get(&f.name).map(|v| (f.name.as_str(), v)))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name == other.descriptor.name && self.values == other.values
    }
}

/// Validate a value map against a descriptor, filling optional defaults.
fn validate_fields(
    descriptor: &ModelDescriptor,
    mut values: HashMap<String, Value>,
) -> Result<HashMap<String, Value>, RecordError> {
    if let Some(name) = values.keys().find(|k| descriptor.field(k).is_none()) {
        return Err(RecordError::UnknownField {
            model: descriptor.name.clone(),
            field: name.clone(),
        });
    }

    let mut checked = HashMap::with_capacity(descriptor.fields.len());
    for field in &descriptor.fields {
        match values.remove(&field.name) {
            Some(value) => {
                let value = coerce_value(&field.name, &field.kind, value)?;
                checked.insert(field.name.clone(), value);
            }
            None => match &field.default {
                // Defaults are taken verbatim, never re-validated.
                Some(default) => {
                    checked.insert(field.name.clone(), default.clone());
                }
                None => {
                    return Err(RecordError::MissingField {
                        model: descriptor.name.clone(),
                        field: field.name.clone(),
                    });
                }
            },
        }
    }
    Ok(checked)
}

/// Check a value against a field kind, canonicalizing where needed.
///
/// Integers widen to floats for float fields. Nested objects are validated
/// against their own descriptor, including defaults for absent optionals.
fn coerce_value(path: &str, kind: &FieldKind, value: Value) -> Result<Value, RecordError> {
    use crate::descriptor::PrimitiveKind;

    let mismatch = |got: &Value| RecordError::TypeMismatch {
        field: path.to_string(),
        expected: kind.type_name(),
        got: value_kind_name(got).to_string(),
    };

    match kind {
        FieldKind::Any => Ok(value),
        FieldKind::Primitive(p) => match (p, value) {
            (PrimitiveKind::Text, v @ Value::Text(_)) => Ok(v),
            (PrimitiveKind::Int, v @ Value::Int(_)) => Ok(v),
            // Integral floats narrow only when they fit: i64 covers the
            // half-open [-2^63, 2^63), and both bounds are exact in f64.
            // Fractional, out-of-range, and non-finite floats mismatch.
            (PrimitiveKind::Int, Value::Float(fl))
                if fl.fract() == 0.0
                    && fl >= -9_223_372_036_854_775_808.0
                    && fl < 9_223_372_036_854_775_808.0 =>
            {
                Ok(Value::Int(fl as i64))
            }
            (PrimitiveKind::Float, v @ Value::Float(_)) => Ok(v),
            (PrimitiveKind::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
            (PrimitiveKind::Bool, v @ Value::Bool(_)) => Ok(v),
            (_, other) => Err(mismatch(&other)),
        },
        FieldKind::Map => match value {
            v @ Value::Map(_) => Ok(v),
            other => Err(mismatch(&other)),
        },
        FieldKind::Sequence(element) => match value {
            Value::Sequence(items) => {
                let mut checked = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    checked.push(coerce_value(&item_path, element, item)?);
                }
                Ok(Value::Sequence(checked))
            }
            other => Err(mismatch(&other)),
        },
        FieldKind::Object(nested) => match value {
            Value::Map(entries) => {
                let checked =
                    validate_fields(nested, entries).map_err(|e| prefix_path(path, e))?;
                Ok(Value::Map(checked))
            }
            other => Err(mismatch(&other)),
        },
    }
}

/// Re-anchor nested validation errors at the enclosing field path.
fn prefix_path(path: &str, err: RecordError) -> RecordError {
    match err {
        RecordError::TypeMismatch { field, expected, got } => RecordError::TypeMismatch {
            field: format!("{}.{}", path, field),
            expected,
            got,
        },
        RecordError::MissingField { model, field } => RecordError::MissingField {
            model,
            field: format!("{}.{}", path, field),
        },
        RecordError::UnknownField { model, field } => RecordError::UnknownField {
            model,
            field: format!("{}.{}", path, field),
        },
        other => other,
    }
}

fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Int(_) => "integer",
        Value::Float(_) => "number",
        Value::Text(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Map(_) => "map",
    }
}

/// Trait for converting from a field value.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, RecordError>;
}

/// Trait for converting into a field value.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

// Implement FromValue for primitives
macro_rules! impl_from_value {
    ($ty:ty, $variant:ident, $name:expr) => {
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, RecordError> {
                match value {
                    Value::$variant(v) => Ok(*v),
                    other => Err(RecordError::TypeMismatch {
                        field: String::new(),
                        expected: $name.to_string(),
                        got: value_kind_name(other).to_string(),
                    }),
                }
            }
        }
    };
}

impl_from_value!(bool, Bool, "boolean");
impl_from_value!(i64, Int, "integer");

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, RecordError> {
        value.as_float().ok_or_else(|| RecordError::TypeMismatch {
            field: String::new(),
            expected: "number".to_string(),
            got: value_kind_name(value).to_string(),
        })
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, RecordError> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            other => Err(RecordError::TypeMismatch {
                field: String::new(),
                expected: "string".to_string(),
                got: value_kind_name(other).to_string(),
            }),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, RecordError> {
        Ok(value.clone())
    }
}

// Implement IntoValue for primitives
macro_rules! impl_into_value {
    ($ty:ty, $variant:ident) => {
        impl IntoValue for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    };
}

impl_into_value!(bool, Bool);
impl_into_value!(i64, Int);
impl_into_value!(f64, Float);
impl_into_value!(String, Text);

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Text(self.to_string())
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ModelBuilder;
    use crate::descriptor::PrimitiveKind;

    fn person_descriptor() -> Arc<ModelDescriptor> {
        Arc::new(
            ModelBuilder::new("Person")
                .text_field("name")
                .optional_field(
                    "age",
                    FieldKind::Primitive(PrimitiveKind::Int),
                    Value::Null,
                )
                .build()
                .expect("build"),
        )
    }

    #[test]
    fn test_record_construction() {
        let desc = person_descriptor();
        let record = Record::new(
            &desc,
            HashMap::from([("name".to_string(), Value::from("Ada"))]),
        )
        .expect("record");

        assert_eq!(record.model_name(), "Person");
        assert_eq!(record.get::<String>("name").expect("name"), "Ada");
        // Absent optional field takes its declared default.
        assert_eq!(record.get_value("age").expect("age"), &Value::Null);
    }

    #[test]
    fn test_missing_required_field() {
        let desc = person_descriptor();
        let err = Record::new(&desc, HashMap::new()).expect_err("missing");
        match err {
            RecordError::MissingField { model, field } => {
                assert_eq!(model, "Person");
                assert_eq!(field, "name");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let desc = person_descriptor();
        let err = Record::new(
            &desc,
            HashMap::from([
                ("name".to_string(), Value::from("Ada")),
                ("email".to_string(), Value::from("ada@example.com")),
            ]),
        )
        .expect_err("unknown");
        assert!(matches!(err, RecordError::UnknownField { field, .. } if field == "email"));
    }

    #[test]
    fn test_type_mismatch() {
        let desc = person_descriptor();
        let err = Record::new(
            &desc,
            HashMap::from([("name".to_string(), Value::Int(7))]),
        )
        .expect_err("mismatch");
        match err {
            RecordError::TypeMismatch { field, expected, got } => {
                assert_eq!(field, "name");
                assert_eq!(expected, "string");
                assert_eq!(got, "integer");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fractional_rejected_for_int_field() {
        let desc = Arc::new(
            ModelBuilder::new("Count")
                .int_field("n")
                .build()
                .expect("build"),
        );

        let ok = Record::new(&desc, HashMap::from([("n".to_string(), Value::Float(3.0))]))
            .expect("integral float");
        assert_eq!(ok.get::<i64>("n").expect("n"), 3);

        let err = Record::new(&desc, HashMap::from([("n".to_string(), Value::Float(3.5))]))
            .expect_err("fractional");
        assert!(matches!(err, RecordError::TypeMismatch { .. }));
    }

    #[test]
    fn test_float_narrowing_respects_int_range() {
        let desc = Arc::new(
            ModelBuilder::new("Count")
                .int_field("n")
                .build()
                .expect("build"),
        );

        let ok = Record::new(
            &desc,
            HashMap::from([("n".to_string(), Value::Float(-9_223_372_036_854_775_808.0))]),
        )
        .expect("min fits");
        assert_eq!(ok.get::<i64>("n").expect("n"), i64::MIN);

        for out_of_range in [9_223_372_036_854_775_808.0, 1e300, f64::INFINITY] {
            let err = Record::new(
                &desc,
                HashMap::from([("n".to_string(), Value::Float(out_of_range))]),
            )
            .expect_err("unrepresentable");
            assert!(matches!(err, RecordError::TypeMismatch { .. }));
        }
    }

    #[test]
    fn test_int_widens_for_float_field() {
        let desc = Arc::new(
            ModelBuilder::new("Reading")
                .float_field("celsius")
                .build()
                .expect("build"),
        );
        let record = Record::new(
            &desc,
            HashMap::from([("celsius".to_string(), Value::Int(21))]),
        )
        .expect("record");
        assert_eq!(record.get::<f64>("celsius").expect("celsius"), 21.0);
    }

    #[test]
    fn test_set_validates_kind() {
        let desc = person_descriptor();
        let mut record = Record::new(
            &desc,
            HashMap::from([("name".to_string(), Value::from("Ada"))]),
        )
        .expect("record");

        record.set("age", 36i64).expect("set age");
        assert_eq!(record.get::<i64>("age").expect("age"), 36);

        assert!(record.set("age", "old").is_err());
        assert!(record.set("height", 1.7f64).is_err());
    }

    #[test]
    fn test_nested_object_validation() {
        let address = Arc::new(
            ModelBuilder::new("Address")
                .text_field("city")
                .build()
                .expect("build"),
        );
        let desc = Arc::new(
            ModelBuilder::new("Person")
                .text_field("name")
                .nested_field("address", address)
                .build()
                .expect("build"),
        );

        let err = Record::new(
            &desc,
            HashMap::from([
                ("name".to_string(), Value::from("Ada")),
                (
                    "address".to_string(),
                    Value::Map(HashMap::from([("city".to_string(), Value::Int(3))])),
                ),
            ]),
        )
        .expect_err("mismatch");
        assert!(
            matches!(err, RecordError::TypeMismatch { ref field, .. } if field == "address.city"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_sequence_element_validation() {
        let desc = Arc::new(
            ModelBuilder::new("Batch")
                .sequence_field("ids", FieldKind::Primitive(PrimitiveKind::Int))
                .build()
                .expect("build"),
        );

        let ok = Record::new(
            &desc,
            HashMap::from([("ids".to_string(), Value::from(vec![1i64, 2, 3]))]),
        );
        assert!(ok.is_ok());

        let err = Record::new(
            &desc,
            HashMap::from([(
                "ids".to_string(),
                Value::Sequence(vec![Value::Int(1), Value::from("two")]),
            )]),
        )
        .expect_err("mismatch");
        assert!(matches!(err, RecordError::TypeMismatch { ref field, .. } if field == "ids[1]"));
    }

    #[test]
    fn test_fields_iterate_in_declaration_order() {
        let desc = Arc::new(
            ModelBuilder::new("Row")
                .text_field("b")
                .int_field("a")
                .build()
                .expect("build"),
        );
        let record = Record::new(
            &desc,
            HashMap::from([
                ("b".to_string(), Value::from("x")),
                ("a".to_string(), Value::Int(1)),
            ]),
        )
        .expect("record");

        let names: Vec<&str> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
