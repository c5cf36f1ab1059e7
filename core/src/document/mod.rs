#![deny(missing_docs)]

//! # API Document
//!
//! The aggregated, validated documentation and its wire formats.
//!
//! - **emit**: Swagger 2.0 JSON/YAML output.
//! - **parse**: Swagger 2.0 fragments back into path groups.
//! - **json_schema**: standalone JSON Schema for one definition.

pub mod emit;
pub mod json_schema;
pub mod parse;

use crate::dsl::{Info, Path};
use crate::error::ValidationError;
use crate::schema::{DefinitionLookup, SchemaDefinition};
use indexmap::IndexMap;
use serde_json::Value;

/// A complete API description produced by [`crate::aggregate::aggregate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiDocument {
    /// Global API metadata.
    pub info: Info,
    /// Definitions keyed by unique name, in first-declaration order.
    pub definitions: IndexMap<String, SchemaDefinition>,
    /// Paths in group order, then in-group order.
    pub paths: Vec<Path>,
}

impl ApiDocument {
    /// Returns the definition called `name`.
    pub fn definition(&self, name: &str) -> Option<&SchemaDefinition> {
        self.definitions.get(name)
    }

    /// Standalone JSON Schema for the definition called `name`.
    ///
    /// Returns `Ok(None)` when the document has no such definition.
    pub fn json_schema(
        &self,
        name: &str,
        dialect: Option<&str>,
    ) -> Result<Option<Value>, ValidationError> {
        match self.definitions.get(name) {
            Some(def) => json_schema::generate_json_schema(def, self, dialect).map(Some),
            None => Ok(None),
        }
    }
}

impl DefinitionLookup for ApiDocument {
    fn definition(&self, name: &str) -> Option<&SchemaDefinition> {
        self.definitions.get(name)
    }
}
