// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::compiler;
use crate::descriptor::{ModelDescriptor, ModelSet};
use crate::error::{Result, SchemaError};
use crate::native::{self, ModuleCatalog, SchemaModule};

// ---------------------------------------------------------------------------
// SchemaFormat
// ---------------------------------------------------------------------------

/// Format of a schema source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaFormat {
    /// JSON schema document.
    Json,
    /// YAML schema document.
    Yaml,
    /// Native module backed by an installed registration hook.
    Native,
}

impl SchemaFormat {
    /// Detect format from file extension. Matching is ASCII
    /// case-insensitive, so `person.JSON` loads like `person.json`.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(SchemaFormat::Json),
            "yaml" | "yml" => Some(SchemaFormat::Yaml),
            "rs" => Some(SchemaFormat::Native),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Lock recovery
// ---------------------------------------------------------------------------

#[inline]
fn recover_write<'a, T>(lock: &'a RwLock<T>, context: &str) -> RwLockWriteGuard<'a, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::debug!("[registry] WARNING: {} poisoned, recovering", context);
            poisoned.into_inner()
        }
    }
}

#[inline]
fn recover_read<'a, T>(lock: &'a RwLock<T>, context: &str) -> RwLockReadGuard<'a, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::debug!("[registry] WARNING: {} poisoned, recovering", context);
            poisoned.into_inner()
        }
    }
}

// ---------------------------------------------------------------------------
// SchemaRegistry
// ---------------------------------------------------------------------------

/// Thread-safe store of loaded schemas keyed by schema name.
///
/// Namespaces and the native module catalog sit behind `RwLock`s so lookups
/// never block each other while loads stay serialized. A load stages all
/// parsing, compilation, and hook execution before touching the namespace
/// map, so a failed load leaves the registry exactly as it was.
pub struct SchemaRegistry {
    /// Map from schema name to the model set its last load produced.
    namespaces: RwLock<HashMap<String, ModelSet>>,
    /// Native modules keyed by schema file stem.
    modules: RwLock<ModuleCatalog>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        SchemaRegistry {
            namespaces: RwLock::new(HashMap::new()),
            modules: RwLock::new(ModuleCatalog::new()),
        }
    }

    /// Install a native schema module under a file stem.
    ///
    /// Loading a source-file schema whose stem matches runs this module's
    /// registration hook. Installing again under the same stem replaces
    /// the previous module.
    pub fn install_module(&self, stem: impl Into<String>, module: Arc<dyn SchemaModule>) {
        let stem = stem.into();
        log::debug!("[registry] installing module stem='{}'", stem);
        let mut modules = recover_write(&self.modules, "SchemaRegistry::modules.write()");
        modules.install(stem, module);
    }

    /// Load a schema from a file and store its models under `name`.
    ///
    /// Relative paths resolve against `base_path` when given. The file must
    /// exist; its extension selects the format (`.json`, `.yaml`/`.yml`, or
    /// `.rs` for an installed native module). A successful load replaces
    /// any models previously stored under `name` and returns the new set.
    ///
    /// # Errors
    ///
    /// * [`SchemaError::SchemaNotFound`] if the file does not exist.
    /// * [`SchemaError::UnsupportedFormat`] for unrecognized extensions.
    /// * [`SchemaError::Document`] for unreadable or invalid documents.
    /// * [`SchemaError::ModuleLoad`] when no module is installed for a
    ///   source file's stem, or its hook fails.
    pub fn load_schema(
        &self,
        name: &str,
        file_path: impl AsRef<Path>,
        base_path: Option<&Path>,
    ) -> Result<ModelSet> {
        let path = resolve_path(file_path.as_ref(), base_path);
        let shown = path.display().to_string();

        if !path.exists() {
            return Err(SchemaError::SchemaNotFound(shown));
        }

        let format = SchemaFormat::from_extension(&path).ok_or_else(|| {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_string)
                .unwrap_or_else(|| shown.clone());
            SchemaError::UnsupportedFormat(ext)
        })?;

        let models = match format {
            SchemaFormat::Json => {
                let document = parse_json(&path, &shown)?;
                compiler::compile_at(&document, name, &shown)?
            }
            SchemaFormat::Yaml => {
                let document = parse_yaml(&path, &shown)?;
                compiler::compile_at(&document, name, &shown)?
            }
            SchemaFormat::Native => {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| SchemaError::ModuleLoad {
                        module: shown.clone(),
                        detail: "file has no usable stem".to_string(),
                    })?;
                let module = {
                    let modules = recover_read(&self.modules, "SchemaRegistry::modules.read()");
                    modules.get(stem)
                }
                .ok_or_else(|| SchemaError::ModuleLoad {
                    module: stem.to_string(),
                    detail: "no schema module installed for this stem".to_string(),
                })?;
                native::run_module(stem, module.as_ref())?
            }
        };

        log::debug!(
            "[registry] loaded schema '{}' from '{}' ({:?}, {} models)",
            name,
            shown,
            format,
            models.len()
        );

        let mut namespaces = recover_write(&self.namespaces, "SchemaRegistry::namespaces.write()");
        namespaces.insert(name.to_string(), models.clone());
        Ok(models)
    }

    /// Get a model from a loaded schema.
    ///
    /// # Errors
    ///
    /// * [`SchemaError::SchemaNotFound`] if no schema is loaded under
    ///   `schema_name`. A missing schema is never loaded implicitly.
    /// * [`SchemaError::ModelNotFound`] if the schema holds no model named
    ///   `model_name`.
    pub fn get_model(&self, schema_name: &str, model_name: &str) -> Result<Arc<ModelDescriptor>> {
        let namespaces = recover_read(&self.namespaces, "SchemaRegistry::namespaces.read()");
        let models = namespaces
            .get(schema_name)
            .ok_or_else(|| SchemaError::SchemaNotFound(schema_name.to_string()))?;
        models
            .get(model_name)
            .cloned()
            .ok_or_else(|| SchemaError::ModelNotFound {
                schema: schema_name.to_string(),
                model: model_name.to_string(),
            })
    }

    /// Get the full model set of a loaded schema.
    pub fn schema_models(&self, schema_name: &str) -> Result<ModelSet> {
        let namespaces = recover_read(&self.namespaces, "SchemaRegistry::namespaces.read()");
        namespaces
            .get(schema_name)
            .cloned()
            .ok_or_else(|| SchemaError::SchemaNotFound(schema_name.to_string()))
    }

    /// Check if a schema is loaded.
    pub fn contains_schema(&self, schema_name: &str) -> bool {
        let namespaces = recover_read(&self.namespaces, "SchemaRegistry::namespaces.read()");
        namespaces.contains_key(schema_name)
    }

    /// List all loaded schema names (sorted for determinism).
    pub fn list_schemas(&self) -> Vec<String> {
        let namespaces = recover_read(&self.namespaces, "SchemaRegistry::namespaces.read()");
        let mut names: Vec<String> = namespaces.keys().cloned().collect();
        names.sort();
        names
    }

    /// List the model names of a loaded schema (sorted for determinism).
    pub fn list_models(&self, schema_name: &str) -> Result<Vec<String>> {
        let namespaces = recover_read(&self.namespaces, "SchemaRegistry::namespaces.read()");
        namespaces
            .get(schema_name)
            .map(ModelSet::names)
            .ok_or_else(|| SchemaError::SchemaNotFound(schema_name.to_string()))
    }

    /// Total number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        let namespaces = recover_read(&self.namespaces, "SchemaRegistry::namespaces.read()");
        namespaces.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

fn resolve_path(file_path: &Path, base_path: Option<&Path>) -> PathBuf {
    match base_path {
        // join() discards the base when file_path is absolute.
        Some(base) => base.join(file_path),
        None => file_path.to_path_buf(),
    }
}

fn read_document(path: &Path, shown: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SchemaError::SchemaNotFound(shown.to_string())
        } else {
            SchemaError::Document {
                path: shown.to_string(),
                detail: e.to_string(),
            }
        }
    })
}

fn parse_json(path: &Path, shown: &str) -> Result<serde_json::Value> {
    let text = read_document(path, shown)?;
    serde_json::from_str(&text).map_err(|e| SchemaError::Document {
        path: shown.to_string(),
        detail: e.to_string(),
    })
}

fn parse_yaml(path: &Path, shown: &str) -> Result<serde_json::Value> {
    let text = read_document(path, shown)?;
    serde_yaml::from_str(&text).map_err(|e| SchemaError::Document {
        path: shown.to_string(),
        detail: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
