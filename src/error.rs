// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema loading, compilation, and lookup.

/// Errors reported by the schema compiler and registry.
///
/// # Example
///
/// ```rust
/// use dynschema::{SchemaError, SchemaRegistry};
///
/// let registry = SchemaRegistry::new();
///
/// match registry.get_model("weather", "Forecast") {
///     Err(SchemaError::SchemaNotFound(name)) => println!("no schema: {}", name),
///     Err(e) => println!("other error: {}", e),
///     Ok(_) => println!("found"),
/// }
/// ```
#[derive(Debug)]
pub enum SchemaError {
    // ========================================================================
    // Load Errors
    // ========================================================================
    /// Schema file or registry entry not found.
    SchemaNotFound(String),
    /// File extension maps to no known schema format.
    UnsupportedFormat(String),
    /// Schema document is unreadable, unparsable, or structurally invalid.
    Document { path: String, detail: String },
    /// Native schema module missing or its registration hook failed.
    ModuleLoad { module: String, detail: String },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    /// Model name not present in a loaded schema.
    ModelNotFound { schema: String, model: String },

    // ========================================================================
    // Synthesis Errors
    // ========================================================================
    /// Field name declared twice in one model.
    DuplicateField { model: String, field: String },
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Load
            SchemaError::SchemaNotFound(name) => write!(f, "Schema not found: {}", name),
            SchemaError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported schema format: {}", ext)
            }
            SchemaError::Document { path, detail } => {
                write!(f, "Invalid schema document {}: {}", path, detail)
            }
            SchemaError::ModuleLoad { module, detail } => {
                write!(f, "Failed to load schema module {}: {}", module, detail)
            }
            // Lookup
            SchemaError::ModelNotFound { schema, model } => {
                write!(f, "Model '{}' not found in schema '{}'", model, schema)
            }
            // Synthesis
            SchemaError::DuplicateField { model, field } => {
                write!(f, "Duplicate field '{}' in model '{}'", field, model)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Convenient alias for API results using the public `SchemaError` type.
pub type Result<T> = core::result::Result<T, SchemaError>;
