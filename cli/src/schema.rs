#![deny(missing_docs)]

//! # Schema Command
//!
//! Aggregates group files and emits the standalone JSON Schema of one definition.

use crate::files::{load_groups, write_output};
use apidoc_core::document::json_schema::DRAFT_04;
use apidoc_core::{aggregate, AppError, AppResult, Info};
use std::path::PathBuf;

/// Arguments for the schema command.
#[derive(clap::Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Name of the definition to emit.
    #[clap(long)]
    pub name: String,

    /// JSON Schema Dialect URI to include in $schema.
    #[clap(long, default_value = DRAFT_04)]
    pub dialect: String,

    /// Output path for the schema file.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Swagger fragments, one per path group.
    #[clap(required = true)]
    pub groups: Vec<PathBuf>,
}

/// Executes the schema generation.
pub fn execute(args: &SchemaArgs) -> AppResult<()> {
    let groups = load_groups(&args.groups)?;
    // Only definitions matter here; info is never emitted.
    let document = aggregate(Info::new(&args.name, "0"), &groups)?;

    let schema_json = document
        .json_schema(&args.name, Some(&args.dialect))
        .map_err(|e| AppError::from(vec![e]))?
        .ok_or_else(|| AppError::General(format!("Definition '{}' not found", args.name)))?;

    let ext = args
        .output
        .as_ref()
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .unwrap_or("json");
    let output_str = match ext {
        "yaml" | "yml" => serde_yaml::to_string(&schema_json)
            .map_err(|e| AppError::General(format!("YAML serialization failed: {}", e)))?,
        _ => serde_json::to_string_pretty(&schema_json)
            .map_err(|e| AppError::General(format!("JSON serialization failed: {}", e)))?,
    };

    write_output(args.output.as_deref(), &output_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const STORE: &str = r#"
definitions:
  Pet:
    description: A pet
    type: object
    required: [name]
    properties:
      name: {type: string}
      tag: {$ref: '#/definitions/Tag'}
  Tag:
    type: string
    enum: [cat, dog]
"#;

    fn write_store(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("store.yaml");
        fs::write(&path, STORE).unwrap();
        path
    }

    #[test]
    fn test_schema_to_json() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("pet.json");
        let args = SchemaArgs {
            name: "Pet".to_string(),
            dialect: DRAFT_04.to_string(),
            output: Some(out.clone()),
            groups: vec![write_store(dir.path())],
        };

        execute(&args).unwrap();

        let schema: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(schema["$schema"], DRAFT_04);
        assert_eq!(schema["title"], "Pet");
        assert_eq!(schema["description"], "A pet");
        assert_eq!(schema["definitions"]["Tag"]["enum"][1], "dog");
    }

    #[test]
    fn test_schema_to_yaml() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("tag.yml");
        let args = SchemaArgs {
            name: "Tag".to_string(),
            dialect: "https://json-schema.org/draft/2020-12/schema".to_string(),
            output: Some(out.clone()),
            groups: vec![write_store(dir.path())],
        };

        execute(&args).unwrap();

        let yaml_content = fs::read_to_string(&out).unwrap();
        assert!(yaml_content.contains("title: Tag"));
        assert!(yaml_content.contains("enum:"));
    }

    #[test]
    fn test_schema_not_found() {
        let dir = tempdir().unwrap();
        let args = SchemaArgs {
            name: "NonExistent".to_string(),
            dialect: DRAFT_04.to_string(),
            output: None,
            groups: vec![write_store(dir.path())],
        };

        match execute(&args) {
            Err(AppError::General(msg)) => {
                assert!(msg.contains("Definition 'NonExistent' not found"))
            }
            other => panic!("Wrong result: {:?}", other),
        }
    }
}
