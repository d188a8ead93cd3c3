// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic schema compiler and model registry.
//!
//! Turns externally supplied schema descriptions into runtime model
//! descriptors that downstream code uses to validate and construct
//! structured records whose shape is only known once configuration is
//! loaded. Schemas come from declarative JSON/YAML documents (a
//! constrained JSON-Schema subset) or from native modules that register
//! their models through an explicit hook.
//!
//! # Features
//!
//! - **Model synthesis**: Build record type descriptors at runtime from
//!   ordered field specifications, fluently or from raw specs
//! - **Schema compilation**: Compile JSON/YAML schema documents (properties,
//!   required, definitions, items, descriptions) into shared descriptors
//! - **Native modules**: Source-file schemas resolved through explicitly
//!   installed registration hooks instead of reflective scanning
//! - **Validated records**: Construct record instances checked against
//!   their descriptor, with schema-driven JSON decode/encode
//! - **Schema export**: Emit the schema document for any descriptor
//!
//! # Architecture
//!
//! ```text
//!   .json/.yaml documents     .rs native modules
//!            |                        |
//!            v                        v
//!        compiler                SchemaModule hook
//!            \                       /
//!             v                     v
//!          SchemaRegistry (name -> ModelSet)
//!                      |
//!                      v
//!        ModelDescriptor (shared, immutable)
//!                      |
//!                      v
//!        Record construction / JSON codec
//! ```
//!
//! # Example
//!
//! ```rust
//! use dynschema::SchemaRegistry;
//! # use std::io::Write;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let dir = tempfile::tempdir()?;
//! # let path = dir.path().join("person.json");
//! # let mut f = std::fs::File::create(&path)?;
//! # f.write_all(br#"{"properties": {"name": {"type": "string"}}, "required": ["name"]}"#)?;
//! let registry = SchemaRegistry::new();
//! registry.load_schema("person", &path, None)?;
//!
//! let model = registry.get_model("person", "person")?;
//! assert!(model.field("name").is_some());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod codec;
pub mod compiler;
pub mod descriptor;
pub mod error;
pub mod export;
pub mod native;
pub mod record;
pub mod registry;
pub mod value;

pub use builder::ModelBuilder;
pub use codec::{decode_record, decode_record_str, encode_record};
pub use compiler::compile;
pub use descriptor::{FieldKind, FieldSpec, ModelDescriptor, ModelSet, PrimitiveKind};
pub use error::{Result, SchemaError};
pub use export::model_json_schema;
pub use native::{ModuleCatalog, SchemaModule};
pub use record::{FromValue, IntoValue, Record, RecordError};
pub use registry::{SchemaFormat, SchemaRegistry};
pub use value::Value;
