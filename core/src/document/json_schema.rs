#![deny(missing_docs)]

//! # JSON Schema Generation
//!
//! Renders a single definition as a self-contained JSON Schema document. Every
//! definition it reaches is embedded under `definitions`, so the `$ref` pointers
//! written by the Swagger emitter resolve inside the generated document.

use crate::document::emit::definition_value;
use crate::error::ValidationError;
use crate::schema::{DefinitionLookup, SchemaDefinition};
use serde_json::{json, Map, Value};
use tracing::debug;

/// The draft Swagger 2.0 schemas are written against.
pub const DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// Builds the JSON Schema for `def`, resolving references through `lookup`.
///
/// `$schema` is only written when `dialect` is given.
///
/// Fails with [`ValidationError::CyclicSchema`] when `def` reaches a loop.
/// References that `lookup` cannot resolve are left dangling.
pub fn generate_json_schema<L>(
    def: &SchemaDefinition,
    lookup: &L,
    dialect: Option<&str>,
) -> Result<Value, ValidationError>
where
    L: DefinitionLookup + ?Sized,
{
    let related = def.related_definitions(lookup)?;

    let mut schema = Map::new();
    if let Some(uri) = dialect {
        schema.insert("$schema".to_string(), json!(uri));
    }
    schema.insert("title".to_string(), json!(def.name));

    if let Value::Object(body) = definition_value(def) {
        schema.extend(body);
    }

    if !related.is_empty() {
        let mut definitions = Map::new();
        for other in &related {
            definitions.insert(other.name.clone(), definition_value(other));
        }
        schema.insert("definitions".to_string(), Value::Object(definitions));
    }

    debug!(
        name = %def.name,
        related = related.len(),
        "Generated JSON Schema."
    );
    Ok(Value::Object(schema))
}
