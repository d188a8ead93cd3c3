// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Export model descriptors back to schema documents.

use crate::descriptor::{FieldKind, ModelDescriptor};
use serde_json::Value as Json;

/// Emit the schema document for a model descriptor.
///
/// The output uses the same constrained vocabulary the compiler reads
/// (`type`, `properties`, `required`, `description`, `items`, `default`),
/// so descriptors produced from documents survive an export/compile
/// round trip field-for-field.
pub fn model_json_schema(descriptor: &ModelDescriptor) -> Json {
    Json::Object(object_schema(descriptor))
}

fn object_schema(descriptor: &ModelDescriptor) -> serde_json::Map<String, Json> {
    let mut schema = serde_json::Map::new();
    schema.insert("type".to_string(), Json::from("object"));

    let mut properties = serde_json::Map::new();
    let mut required = Vec::new();
    for field in &descriptor.fields {
        let mut prop = kind_schema(&field.kind);
        if let Some(description) = &field.description {
            prop.insert("description".to_string(), Json::from(description.clone()));
        }
        match &field.default {
            Some(default) => {
                prop.insert("default".to_string(), default.to_json());
            }
            None => required.push(Json::from(field.name.clone())),
        }
        properties.insert(field.name.clone(), Json::Object(prop));
    }

    schema.insert("properties".to_string(), Json::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Json::Array(required));
    }
    schema
}

fn kind_schema(kind: &FieldKind) -> serde_json::Map<String, Json> {
    match kind {
        FieldKind::Primitive(p) => {
            let mut schema = serde_json::Map::new();
            schema.insert("type".to_string(), Json::from(p.json_name()));
            schema
        }
        FieldKind::Object(nested) => object_schema(nested),
        FieldKind::Map => {
            let mut schema = serde_json::Map::new();
            schema.insert("type".to_string(), Json::from("object"));
            schema
        }
        FieldKind::Sequence(element) => {
            let mut schema = serde_json::Map::new();
            schema.insert("type".to_string(), Json::from("array"));
            if **element != FieldKind::Any {
                schema.insert("items".to_string(), Json::Object(kind_schema(element)));
            }
            schema
        }
        FieldKind::Any => serde_json::Map::new(),
    }
}
