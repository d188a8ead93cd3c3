// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compiler from declarative schema documents to model descriptors.
//!
//! Interprets a constrained subset of the JSON-Schema vocabulary:
//! `properties`, `required`, `definitions`, `items`, `type`, and
//! `description`. Everything else in a document is ignored.
//!
//! ## Type mapping
//!
//! | document type tag            | field kind               |
//! |------------------------------|--------------------------|
//! | `string`                     | text primitive           |
//! | `number`                     | float primitive          |
//! | `integer`                    | integer primitive        |
//! | `boolean`                    | bool primitive           |
//! | `object` with `properties`   | nested model             |
//! | `object` without `properties`| open map                 |
//! | `array` with `items`         | sequence of mapped item  |
//! | `array` without `items`      | sequence of any          |
//! | anything else / absent       | any                      |

use crate::descriptor::{FieldKind, FieldSpec, ModelDescriptor, ModelSet, PrimitiveKind};
use crate::error::{Result, SchemaError};
use crate::value::Value;
use serde_json::Value as Json;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Compile a schema document into a set of model descriptors.
///
/// A document with a root `properties` key yields a root model named
/// `root_name`; each root-level property that is itself an object with
/// `properties` is additionally registered as a sibling model under the
/// property name, sharing its descriptor with the inlined field. Every
/// `definitions` entry is compiled under its key. A document with neither
/// key yields an empty set.
///
/// # Errors
///
/// Returns [`SchemaError::Document`] for structurally invalid documents
/// and [`SchemaError::DuplicateField`] if synthesis rejects a model.
pub fn compile(document: &Json, root_name: &str) -> Result<ModelSet> {
    compile_at(document, root_name, root_name)
}

/// Compile with an explicit origin used in error messages.
///
/// The registry threads the schema file path through here so document
/// errors name the file rather than the schema.
pub(crate) fn compile_at(document: &Json, root_name: &str, origin: &str) -> Result<ModelSet> {
    let root = as_object(document, origin, "schema document")?;
    let mut models = ModelSet::new();

    if root.contains_key("properties") {
        let root_model = compile_model(root_name, root, origin)?;
        models.insert(root_model.clone());
        // Root-level object properties double as named sibling models,
        // sharing the descriptor compiled for the inlined field.
        for field in &root_model.fields {
            if let FieldKind::Object(nested) = &field.kind {
                models.insert(nested.clone());
            }
        }
    }

    if let Some(defs) = root.get("definitions") {
        let defs = as_object(defs, origin, "definitions")?;
        for (def_name, def_schema) in defs {
            let def_schema = as_object(def_schema, origin, &format!("definition '{def_name}'"))?;
            models.insert(compile_model(def_name, def_schema, origin)?);
        }
    }

    log::debug!(
        "[compiler] compiled {} model(s) from '{}': {:?}",
        models.len(),
        origin,
        models.names()
    );
    Ok(models)
}

// ---------------------------------------------------------------------------
// Model and field conversion
// ---------------------------------------------------------------------------

/// Compile one object schema into a model descriptor.
///
/// Fields keep their document order. Names listed under `required` get no
/// default; every other declared field is optional with a null default.
fn compile_model(
    name: &str,
    schema: &serde_json::Map<String, Json>,
    origin: &str,
) -> Result<Arc<ModelDescriptor>> {
    let mut fields = Vec::new();

    if let Some(props) = schema.get("properties") {
        let props = as_object(props, origin, &format!("properties of '{name}'"))?;
        let required = required_names(schema, name, origin)?;

        for (prop_name, prop_schema) in props {
            let prop_schema =
                as_object(prop_schema, origin, &format!("property '{prop_name}'"))?;
            let kind = field_kind(prop_name, prop_schema, origin)?;

            let mut spec = FieldSpec::new(prop_name, kind);
            if !required.iter().any(|r| r == prop_name) {
                spec = spec.with_default(Value::Null);
            }
            if let Some(description) = prop_schema.get("description").and_then(Json::as_str) {
                if !description.is_empty() {
                    spec = spec.describe(description);
                }
            }
            fields.push(spec);
        }
    }

    Ok(Arc::new(ModelDescriptor::synthesize(name, fields)?))
}

/// Map one property schema to a field kind.
fn field_kind(
    prop_name: &str,
    schema: &serde_json::Map<String, Json>,
    origin: &str,
) -> Result<FieldKind> {
    let kind = match schema.get("type").and_then(Json::as_str) {
        Some("string") => FieldKind::Primitive(PrimitiveKind::Text),
        Some("number") => FieldKind::Primitive(PrimitiveKind::Float),
        Some("integer") => FieldKind::Primitive(PrimitiveKind::Int),
        Some("boolean") => FieldKind::Primitive(PrimitiveKind::Bool),
        Some("object") => {
            if schema.contains_key("properties") {
                FieldKind::Object(compile_model(prop_name, schema, origin)?)
            } else {
                FieldKind::Map
            }
        }
        Some("array") => match schema.get("items") {
            Some(items) => {
                let items = as_object(items, origin, &format!("items of '{prop_name}'"))?;
                FieldKind::Sequence(Box::new(field_kind(prop_name, items, origin)?))
            }
            None => FieldKind::Sequence(Box::new(FieldKind::Any)),
        },
        // Unrecognized and missing tags are unconstrained, not errors.
        _ => FieldKind::Any,
    };
    Ok(kind)
}

/// Read the `required` name list for an object schema.
fn required_names(
    schema: &serde_json::Map<String, Json>,
    model: &str,
    origin: &str,
) -> Result<Vec<String>> {
    let Some(required) = schema.get("required") else {
        return Ok(Vec::new());
    };
    let entries = required.as_array().ok_or_else(|| SchemaError::Document {
        path: origin.to_string(),
        detail: format!("required of '{model}' must be an array"),
    })?;
    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| SchemaError::Document {
                    path: origin.to_string(),
                    detail: format!("required of '{model}' must contain only strings"),
                })
        })
        .collect()
}

fn as_object<'a>(
    value: &'a Json,
    origin: &str,
    what: &str,
) -> Result<&'a serde_json::Map<String, Json>> {
    value.as_object().ok_or_else(|| SchemaError::Document {
        path: origin.to_string(),
        detail: format!("{what} must be an object"),
    })
}
