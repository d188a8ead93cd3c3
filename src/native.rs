// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Native schema modules: models contributed by code instead of documents.
//!
//! A schema file with a source extension is not parsed. Loading it runs the
//! [`SchemaModule`] installed under the file's stem, and that module
//! registers its models into a fresh set. Installation is explicit; nothing
//! is scanned or discovered. Executing a module hook is a trust boundary:
//! only install modules you would call directly.

use crate::descriptor::ModelSet;
use crate::error::{Result, SchemaError};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// SchemaModule trait
// ---------------------------------------------------------------------------

/// Hook through which native code contributes models to a schema load.
///
/// The hook is re-run on every load of its schema file, each time into a
/// fresh [`ModelSet`], so it must be safe to execute repeatedly.
///
/// Any `Fn(&mut ModelSet) -> Result<()>` closure qualifies:
///
/// ```rust
/// use dynschema::{ModelBuilder, ModelSet, Result, SchemaModule};
/// use std::sync::Arc;
///
/// let module: Arc<dyn SchemaModule> = Arc::new(|models: &mut ModelSet| -> Result<()> {
///     let point = ModelBuilder::new("Point")
///         .float_field("x")
///         .float_field("y")
///         .build()?;
///     models.insert(Arc::new(point));
///     Ok(())
/// });
/// ```
pub trait SchemaModule: Send + Sync {
    /// Register every model this module exposes into the set.
    fn register(&self, models: &mut ModelSet) -> Result<()>;
}

impl<F> SchemaModule for F
where
    F: Fn(&mut ModelSet) -> Result<()> + Send + Sync,
{
    fn register(&self, models: &mut ModelSet) -> Result<()> {
        self(models)
    }
}

/// Execute a module's registration hook into a fresh model set.
pub(crate) fn run_module(stem: &str, module: &dyn SchemaModule) -> Result<ModelSet> {
    let mut models = ModelSet::new();
    module
        .register(&mut models)
        .map_err(|e| SchemaError::ModuleLoad {
            module: stem.to_string(),
            detail: e.to_string(),
        })?;
    log::debug!(
        "[native] module '{}' registered {} model(s): {:?}",
        stem,
        models.len(),
        models.names()
    );
    Ok(models)
}

// ---------------------------------------------------------------------------
// ModuleCatalog
// ---------------------------------------------------------------------------

/// HashMap-backed catalog of installed schema modules, keyed by file stem.
#[derive(Default)]
pub struct ModuleCatalog {
    modules: HashMap<String, Arc<dyn SchemaModule>>,
}

impl ModuleCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a module under a file stem. Replaces any previous entry.
    pub fn install(&mut self, stem: impl Into<String>, module: Arc<dyn SchemaModule>) {
        self.modules.insert(stem.into(), module);
    }

    /// Look up a module by file stem.
    pub fn get(&self, stem: &str) -> Option<Arc<dyn SchemaModule>> {
        self.modules.get(stem).cloned()
    }

    /// Check if a module is installed.
    pub fn contains(&self, stem: &str) -> bool {
        self.modules.contains_key(stem)
    }

    /// Number of installed modules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if no modules are installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Installed stems in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for ModuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleCatalog")
            .field("modules", &self.names())
            .finish()
    }
}
