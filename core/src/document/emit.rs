#![deny(missing_docs)]

//! # Swagger Emission
//!
//! Serializes an `ApiDocument` into a Swagger 2.0 JSON object.
//!
//! - `Ref` nodes become `{"$ref": "#/definitions/<name>"}`.
//! - `Composite` definitions become `allOf` lists of member refs.
//! - `Enum` definitions become `{"type": "string", "enum": [...]}`.
//! - Paths sharing a template are merged into one Path Item.

use crate::document::ApiDocument;
use crate::dsl::{Info, Operation, Parameter, ParameterLocation, Path};
use crate::error::{AppError, AppResult};
use crate::schema::refs::definition_ref;
use crate::schema::{SchemaDefinition, SchemaKind, SchemaNode};
use serde_json::{json, Map, Value};

/// Swagger specification version written to the `swagger` key.
pub const SWAGGER_VERSION: &str = "2.0";

impl ApiDocument {
    /// Builds the Swagger 2.0 JSON object.
    pub fn to_swagger(&self) -> Value {
        let mut definitions = Map::new();
        for (name, def) in &self.definitions {
            definitions.insert(name.clone(), definition_value(def));
        }

        let mut doc = Map::new();
        doc.insert("swagger".to_string(), json!(SWAGGER_VERSION));
        doc.insert("info".to_string(), info_value(&self.info));
        doc.insert("paths".to_string(), paths_value(&self.paths));
        doc.insert("definitions".to_string(), Value::Object(definitions));
        Value::Object(doc)
    }

    /// Pretty-printed Swagger JSON.
    pub fn to_json_string(&self) -> AppResult<String> {
        serde_json::to_string_pretty(&self.to_swagger())
            .map_err(|e| AppError::General(format!("JSON serialization failed: {}", e)))
    }

    /// Swagger YAML.
    pub fn to_yaml_string(&self) -> AppResult<String> {
        serde_yaml::to_string(&self.to_swagger())
            .map_err(|e| AppError::General(format!("YAML serialization failed: {}", e)))
    }
}

/// JSON value for a schema node.
pub fn node_value(node: &SchemaNode) -> Value {
    match node {
        SchemaNode::Primitive { ty, format } => {
            let mut obj = Map::new();
            obj.insert("type".to_string(), json!(ty.as_str()));
            if let Some(fmt) = format {
                obj.insert("format".to_string(), json!(fmt));
            }
            Value::Object(obj)
        }
        SchemaNode::ArrayOf(items) => json!({
            "type": "array",
            "items": node_value(items),
        }),
        SchemaNode::Ref(r) => json!({ "$ref": definition_ref(&r.name) }),
        SchemaNode::Inline(def) => {
            let mut value = definition_value(def);
            // Keeps a property-less inline object distinct from a bare `object` primitive.
            if let (SchemaKind::Object { properties }, Value::Object(map)) = (&def.kind, &mut value) {
                if properties.is_empty() {
                    map.insert("properties".to_string(), json!({}));
                }
            }
            value
        }
    }
}

/// JSON value for a definition body (no name or title).
pub fn definition_value(def: &SchemaDefinition) -> Value {
    let mut obj = Map::new();

    match &def.kind {
        SchemaKind::Object { properties } => {
            obj.insert("type".to_string(), json!("object"));
            if let Some(desc) = &def.description {
                obj.insert("description".to_string(), json!(desc));
            }

            let required: Vec<&str> = properties
                .iter()
                .filter(|p| p.required)
                .map(|p| p.name.as_str())
                .collect();
            if !required.is_empty() {
                obj.insert("required".to_string(), json!(required));
            }

            if !properties.is_empty() {
                let mut props = Map::new();
                for prop in properties {
                    let mut value = node_value(&prop.schema);
                    if let (Some(desc), Value::Object(map)) = (&prop.description, &mut value) {
                        map.insert("description".to_string(), json!(desc));
                    }
                    props.insert(prop.name.clone(), value);
                }
                obj.insert("properties".to_string(), Value::Object(props));
            }
        }
        SchemaKind::Enum { values } => {
            obj.insert("type".to_string(), json!("string"));
            if let Some(desc) = &def.description {
                obj.insert("description".to_string(), json!(desc));
            }
            obj.insert("enum".to_string(), json!(values));
        }
        SchemaKind::Composite { members } => {
            if let Some(desc) = &def.description {
                obj.insert("description".to_string(), json!(desc));
            }
            let all_of: Vec<Value> = members
                .iter()
                .map(|m| json!({ "$ref": definition_ref(&m.name) }))
                .collect();
            obj.insert("allOf".to_string(), Value::Array(all_of));
        }
    }

    Value::Object(obj)
}

fn info_value(info: &Info) -> Value {
    let mut info_obj = Map::new();
    info_obj.insert("title".to_string(), json!(info.title));
    info_obj.insert("version".to_string(), json!(info.version));
    if let Some(desc) = &info.description {
        info_obj.insert("description".to_string(), json!(desc));
    }
    if let Some(terms) = &info.terms_of_service {
        info_obj.insert("termsOfService".to_string(), json!(terms));
    }
    if let Some(contact) = &info.contact {
        let mut contact_obj = Map::new();
        if let Some(name) = &contact.name {
            contact_obj.insert("name".to_string(), json!(name));
        }
        if let Some(url) = &contact.url {
            contact_obj.insert("url".to_string(), json!(url));
        }
        if let Some(email) = &contact.email {
            contact_obj.insert("email".to_string(), json!(email));
        }
        if !contact_obj.is_empty() {
            info_obj.insert("contact".to_string(), Value::Object(contact_obj));
        }
    }
    if let Some(license) = &info.license {
        let mut license_obj = Map::new();
        license_obj.insert("name".to_string(), json!(license.name));
        if let Some(url) = &license.url {
            license_obj.insert("url".to_string(), json!(url));
        }
        info_obj.insert("license".to_string(), Value::Object(license_obj));
    }
    Value::Object(info_obj)
}

fn paths_value(paths: &[Path]) -> Value {
    let mut paths_obj = Map::new();
    for path in paths {
        let entry = paths_obj
            .entry(path.template.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(item) = entry {
            for (method, op) in &path.operations {
                item.insert(method.as_key().to_string(), operation_value(op));
            }
        }
    }
    Value::Object(paths_obj)
}

fn operation_value(op: &Operation) -> Value {
    let mut obj = Map::new();
    if !op.tags.is_empty() {
        obj.insert("tags".to_string(), json!(op.tags));
    }
    if let Some(summary) = &op.summary {
        obj.insert("summary".to_string(), json!(summary));
    }
    if let Some(desc) = &op.description {
        obj.insert("description".to_string(), json!(desc));
    }
    if let Some(id) = &op.operation_id {
        obj.insert("operationId".to_string(), json!(id));
    }
    if !op.parameters.is_empty() {
        let params: Vec<Value> = op.parameters.iter().map(parameter_value).collect();
        obj.insert("parameters".to_string(), Value::Array(params));
    }

    let mut responses = Map::new();
    for (key, response) in &op.responses {
        let mut entry = Map::new();
        entry.insert("description".to_string(), json!(response.description));
        if let Some(schema) = &response.schema {
            entry.insert("schema".to_string(), node_value(schema));
        }
        // Later duplicates overwrite; aggregation rejects them before emission.
        responses.insert(key.to_string(), Value::Object(entry));
    }
    obj.insert("responses".to_string(), Value::Object(responses));

    if op.deprecated {
        obj.insert("deprecated".to_string(), json!(true));
    }
    Value::Object(obj)
}

fn parameter_value(param: &Parameter) -> Value {
    let mut obj = Map::new();
    obj.insert("name".to_string(), json!(param.name));
    obj.insert("in".to_string(), json!(param.location.as_str()));
    if let Some(desc) = &param.description {
        obj.insert("description".to_string(), json!(desc));
    }
    obj.insert("required".to_string(), json!(param.required()));

    if param.location == ParameterLocation::Body {
        let schema = param
            .schema
            .as_ref()
            .map(node_value)
            .unwrap_or_else(|| json!({ "type": "object" }));
        obj.insert("schema".to_string(), schema);
        return Value::Object(obj);
    }

    let mut scalar = Map::new();
    scalar.insert("type".to_string(), json!(param.param_type.as_str()));
    if let Some(fmt) = &param.format {
        scalar.insert("format".to_string(), json!(fmt));
    }

    if param.collection {
        obj.insert("type".to_string(), json!("array"));
        obj.insert("items".to_string(), Value::Object(scalar));
    } else {
        obj.extend(scalar);
    }
    Value::Object(obj)
}
