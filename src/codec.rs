// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven JSON encode/decode for records.

use crate::descriptor::ModelDescriptor;
use crate::record::{Record, RecordError};
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Decode a JSON object into a validated record.
///
/// The document must be a JSON object; its entries are checked against the
/// descriptor exactly as [`Record::new`] checks them (required fields,
/// unknown fields, kind compatibility, defaults for absent optionals).
pub fn decode_record(
    descriptor: &Arc<ModelDescriptor>,
    document: &serde_json::Value,
) -> Result<Record, RecordError> {
    let entries = document.as_object().ok_or_else(|| {
        RecordError::InvalidDocument(format!(
            "expected object for model '{}'",
            descriptor.name
        ))
    })?;

    let values: HashMap<String, Value> = entries
        .iter()
        .map(|(k, v)| (k.clone(), Value::from_json(v)))
        .collect();
    Record::new(descriptor, values)
}

/// Decode a JSON text into a validated record.
pub fn decode_record_str(
    descriptor: &Arc<ModelDescriptor>,
    text: &str,
) -> Result<Record, RecordError> {
    let document: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| RecordError::InvalidDocument(e.to_string()))?;
    decode_record(descriptor, &document)
}

/// Encode a record as a JSON object.
///
/// Every declared field is present in the output, defaults included.
pub fn encode_record(record: &Record) -> serde_json::Value {
    let entries: serde_json::Map<String, serde_json::Value> = record
        .fields()
        .map(|(name, value)| (name.to_string(), value.to_json()))
        .collect();
    serde_json::Value::Object(entries)
}
