#![deny(missing_docs)]

//! # Swagger Fragment Parsing
//!
//! Reads a Swagger 2.0 document (or any fragment carrying `definitions` and
//! `paths`) into a `PathGroup`. Everything else in the document is ignored.
//!
//! Path-level `parameters` are merged into every operation of the Path Item
//! unless the operation overrides the same `(name, in)` pair.

use crate::dsl::{
    HttpMethod, Operation, Parameter, ParameterLocation, Path, Response, ResponseKey,
};
use crate::error::{AppError, AppResult};
use crate::group::PathGroup;
use crate::schema::refs::extract_definition_name;
use crate::schema::{PrimitiveType, Property, SchemaDefinition, SchemaNode, SchemaRef};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs;
use std::path::Path as FsPath;
use tracing::debug;

/// Intermediate Deserialization Layer for the document root.
#[derive(Deserialize)]
struct ShimFragment {
    #[serde(default)]
    definitions: Map<String, Value>,
    #[serde(default)]
    paths: Map<String, Value>,
}

#[derive(Deserialize)]
struct ShimOperation {
    summary: Option<String>,
    description: Option<String>,
    #[serde(rename = "operationId")]
    operation_id: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    parameters: Vec<ShimParameter>,
    #[serde(default)]
    responses: Map<String, Value>,
}

#[derive(Deserialize, Clone)]
struct ShimParameter {
    name: String,
    #[serde(rename = "in")]
    location: String,
    description: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(rename = "type")]
    param_type: Option<String>,
    format: Option<String>,
    items: Option<ShimItems>,
    schema: Option<Value>,
}

#[derive(Deserialize, Clone)]
struct ShimItems {
    #[serde(rename = "type")]
    item_type: String,
    format: Option<String>,
}

#[derive(Deserialize)]
struct ShimResponse {
    #[serde(default)]
    description: String,
    schema: Option<Value>,
}

/// Parses a Swagger fragment held as JSON into a group called `name`.
pub fn parse_group_json(name: &str, raw: &Value) -> AppResult<PathGroup> {
    let fragment: ShimFragment = serde_json::from_value(raw.clone())
        .map_err(|e| AppError::Parse(format!("Invalid Swagger fragment '{}': {}", name, e)))?;

    let mut definitions = Vec::new();
    for (def_name, value) in &fragment.definitions {
        definitions.push(parse_definition(def_name, value)?);
    }

    let mut paths = Vec::new();
    for (template, item) in &fragment.paths {
        paths.push(parse_path_item(template, item)?);
    }

    debug!(
        group = name,
        definitions = definitions.len(),
        paths = paths.len(),
        "Parsed path group."
    );
    Ok(PathGroup::new(name)
        .with_definitions(definitions)
        .with_paths(paths))
}

/// Parses a Swagger fragment written in YAML (or JSON, which YAML accepts).
pub fn parse_group_yaml(name: &str, yaml: &str) -> AppResult<PathGroup> {
    let raw: Value = serde_yaml::from_str(yaml)
        .map_err(|e| AppError::Parse(format!("Failed to parse YAML for '{}': {}", name, e)))?;
    parse_group_json(name, &raw)
}

/// Reads a group file; the group is named after the file stem.
///
/// `.json` files are read as JSON, everything else as YAML.
pub fn parse_group_file(path: &FsPath) -> AppResult<PathGroup> {
    let content = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("group")
        .to_string();

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            let raw: Value = serde_json::from_str(&content).map_err(|e| {
                AppError::Parse(format!("Failed to parse JSON {:?}: {}", path, e))
            })?;
            parse_group_json(&name, &raw)
        }
        _ => parse_group_yaml(&name, &content),
    }
}

/// Parses a named entry of the `definitions` object.
pub fn parse_definition(name: &str, value: &Value) -> AppResult<SchemaDefinition> {
    let obj = value
        .as_object()
        .ok_or_else(|| AppError::Parse(format!("Definition '{}' must be an object", name)))?;
    let description = string_field(obj, "description");

    let def = if let Some(all_of) = obj.get("allOf") {
        let items = all_of
            .as_array()
            .ok_or_else(|| AppError::Parse(format!("'{}'.allOf must be an array", name)))?;
        let mut members = Vec::new();
        for item in items {
            match parse_node(item, name)? {
                SchemaNode::Ref(r) => members.push(r),
                _ => {
                    return Err(AppError::Parse(format!(
                        "'{}'.allOf entries must be $ref pointers",
                        name
                    )))
                }
            }
        }
        SchemaDefinition::composite(name, members)
    } else if let Some(values) = obj.get("enum") {
        let literals = values
            .as_array()
            .ok_or_else(|| AppError::Parse(format!("'{}'.enum must be an array", name)))?
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                other => Err(AppError::Parse(format!(
                    "'{}'.enum supports string literals only, found {}",
                    name, other
                ))),
            })
            .collect::<AppResult<Vec<String>>>()?;
        SchemaDefinition::enumeration(name, literals)
    } else if is_object_shape(obj) {
        SchemaDefinition::object(name, parse_properties(name, obj)?)
    } else {
        return Err(AppError::Parse(format!(
            "Definition '{}' must be an object, enum, or allOf composite",
            name
        )));
    };

    Ok(SchemaDefinition { description, ..def })
}

/// Parses a schema node; `context` labels parse errors.
///
/// `{"type": "object"}` without `properties` is a free-form object primitive;
/// inline object definitions always carry a `properties` key.
pub fn parse_node(value: &Value, context: &str) -> AppResult<SchemaNode> {
    let obj = value
        .as_object()
        .ok_or_else(|| AppError::Parse(format!("Schema at '{}' must be an object", context)))?;

    if let Some(reference) = obj.get("$ref") {
        let pointer = reference
            .as_str()
            .ok_or_else(|| AppError::Parse(format!("$ref at '{}' must be a string", context)))?;
        let target = extract_definition_name(pointer).ok_or_else(|| {
            AppError::Parse(format!(
                "Unsupported $ref '{}' at '{}': only #/definitions/<name> is allowed",
                pointer, context
            ))
        })?;
        return Ok(SchemaNode::Ref(SchemaRef::new(target)));
    }

    if obj.contains_key("allOf") || obj.contains_key("enum") || obj.contains_key("properties") {
        return parse_definition("", value).map(SchemaNode::inline);
    }

    match obj.get("type").and_then(Value::as_str) {
        Some("array") => {
            let items = obj.get("items").ok_or_else(|| {
                AppError::Parse(format!("Array schema at '{}' is missing items", context))
            })?;
            Ok(SchemaNode::array(parse_node(items, &format!("{}[]", context))?))
        }
        Some(keyword) => {
            let ty = PrimitiveType::from_keyword(keyword).ok_or_else(|| {
                AppError::Parse(format!("Unknown type '{}' at '{}'", keyword, context))
            })?;
            Ok(SchemaNode::Primitive {
                ty,
                format: string_field(obj, "format"),
            })
        }
        None => Ok(SchemaNode::primitive(PrimitiveType::Object)),
    }
}

fn is_object_shape(obj: &Map<String, Value>) -> bool {
    obj.contains_key("properties") || obj.get("type").and_then(Value::as_str) == Some("object")
}

fn parse_properties(owner: &str, obj: &Map<String, Value>) -> AppResult<Vec<Property>> {
    let required: HashSet<&str> = obj
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(props) = obj.get("properties") else {
        return Ok(Vec::new());
    };
    let props = props
        .as_object()
        .ok_or_else(|| AppError::Parse(format!("'{}'.properties must be an object", owner)))?;

    let mut out = Vec::new();
    for (field, schema) in props {
        let context = format!("{}.{}", owner, field);
        let description = schema
            .as_object()
            .and_then(|o| string_field(o, "description"));
        out.push(Property {
            name: field.clone(),
            schema: parse_node(schema, &context)?,
            required: required.contains(field.as_str()),
            description,
        });
    }
    Ok(out)
}

fn parse_path_item(template: &str, item: &Value) -> AppResult<Path> {
    let obj = item
        .as_object()
        .ok_or_else(|| AppError::Parse(format!("Path item '{}' must be an object", template)))?;

    let common: Vec<ShimParameter> = match obj.get("parameters") {
        Some(raw) => serde_json::from_value(raw.clone()).map_err(|e| {
            AppError::Parse(format!("Invalid parameters on '{}': {}", template, e))
        })?,
        None => Vec::new(),
    };

    let mut path = Path::new(template);
    for (key, raw) in obj {
        let Some(method) = HttpMethod::from_key(key) else {
            if key != "parameters" {
                debug!(path = template, key = %key, "Ignoring path item key.");
            }
            continue;
        };

        let shim: ShimOperation = serde_json::from_value(raw.clone()).map_err(|e| {
            AppError::Parse(format!("Invalid operation {} {}: {}", method, template, e))
        })?;
        let context = format!("{} {}", method, template);
        path = path.with_operation(method, build_operation(shim, &common, &context)?);
    }
    Ok(path)
}

fn build_operation(
    shim: ShimOperation,
    common: &[ShimParameter],
    context: &str,
) -> AppResult<Operation> {
    let mut seen = HashSet::new();
    let mut params = Vec::new();

    // Priority to operation params
    for p in &shim.parameters {
        seen.insert((p.name.clone(), p.location.clone()));
        params.push(build_parameter(p, context)?);
    }
    for p in common {
        if !seen.contains(&(p.name.clone(), p.location.clone())) {
            params.push(build_parameter(p, context)?);
        }
    }

    let mut responses = Vec::new();
    for (code, raw) in &shim.responses {
        let key = if code == "default" {
            ResponseKey::Default
        } else {
            let status = code.parse::<u16>().map_err(|_| {
                AppError::Parse(format!("Invalid status code '{}' on {}", code, context))
            })?;
            ResponseKey::Code(status)
        };
        let entry: ShimResponse = serde_json::from_value(raw.clone()).map_err(|e| {
            AppError::Parse(format!("Invalid response {} on {}: {}", code, context, e))
        })?;
        let schema = match &entry.schema {
            Some(s) => Some(parse_node(s, &format!("{} response {}", context, code))?),
            None => None,
        };
        responses.push((
            key,
            Response {
                description: entry.description,
                schema,
            },
        ));
    }

    let mut op = Operation::new().with_tags(shim.tags).with_params(params);
    op.summary = shim.summary;
    op.description = shim.description;
    op.operation_id = shim.operation_id;
    op.deprecated = shim.deprecated;
    op.responses = responses;
    Ok(op)
}

fn build_parameter(p: &ShimParameter, context: &str) -> AppResult<Parameter> {
    let location = ParameterLocation::from_keyword(&p.location).ok_or_else(|| {
        AppError::Parse(format!(
            "Unsupported parameter location '{}' for '{}' on {}",
            p.location, p.name, context
        ))
    })?;

    let mut param = match location {
        ParameterLocation::Path => Parameter::path(&p.name),
        ParameterLocation::Query => Parameter::query(&p.name),
        ParameterLocation::Header => Parameter::header(&p.name),
        ParameterLocation::Body => {
            let raw = p.schema.as_ref().ok_or_else(|| {
                AppError::Parse(format!("Body parameter '{}' on {} has no schema", p.name, context))
            })?;
            let schema = parse_node(raw, &format!("{} parameter {}", context, p.name))?;
            Parameter::body(&p.name, schema)
        }
    }
    .with_required(p.required);

    if let Some(desc) = &p.description {
        param = param.with_description(desc);
    }

    if location != ParameterLocation::Body {
        let (keyword, format) = match (p.param_type.as_deref(), &p.items) {
            (Some("array"), Some(items)) => {
                param = param.as_collection();
                (items.item_type.as_str(), items.format.clone())
            }
            (Some(keyword), _) => (keyword, p.format.clone()),
            (None, _) => ("string", p.format.clone()),
        };
        let ty = PrimitiveType::from_keyword(keyword).ok_or_else(|| {
            AppError::Parse(format!(
                "Unsupported type '{}' for parameter '{}' on {}",
                keyword, p.name, context
            ))
        })?;
        param = param.with_type(ty);
        if let Some(fmt) = format {
            param = param.with_format(fmt);
        }
    }

    Ok(param)
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;

    #[test]
    fn test_parse_group_yaml_basic() {
        let yaml = r#"
swagger: "2.0"
info: {title: T, version: "1"}
definitions:
  Pet:
    type: object
    required: [id]
    properties:
      id: {type: integer, format: int64}
      tags:
        type: array
        items: {$ref: '#/definitions/Tag'}
paths:
  /pets/{id}:
    parameters:
      - {name: id, in: path, required: true, type: string}
    get:
      operationId: getPet
      tags: [pets]
      responses:
        '200':
          description: OK
          schema: {$ref: '#/definitions/Pet'}
        default:
          description: Error
"#;
        let group = parse_group_yaml("pets", yaml).unwrap();
        assert_eq!(group.name(), "pets");

        let pet = &group.definitions()[0];
        let SchemaKind::Object { properties } = &pet.kind else {
            panic!("expected object");
        };
        assert!(properties[0].required);
        assert!(!properties[1].required);
        assert_eq!(
            properties[1].schema,
            SchemaNode::array(SchemaNode::reference("Tag"))
        );

        let get = group.paths()[0].operation(HttpMethod::Get).unwrap();
        assert_eq!(get.operation_id.as_deref(), Some("getPet"));
        assert_eq!(get.parameters.len(), 1);
        assert_eq!(get.parameters[0].location, ParameterLocation::Path);
        assert_eq!(
            get.response(ResponseKey::Code(200)).unwrap().schema,
            Some(SchemaNode::reference("Pet"))
        );
        assert!(get.response(ResponseKey::Default).is_some());
    }

    #[test]
    fn test_operation_params_override_common() {
        let yaml = r#"
paths:
  /items:
    parameters:
      - {name: limit, in: query, type: integer}
      - {name: tenant, in: header}
    get:
      parameters:
        - {name: limit, in: query, type: integer, format: int64, required: true}
      responses:
        '200': {description: OK}
"#;
        let group = parse_group_yaml("items", yaml).unwrap();
        let op = group.paths()[0].operation(HttpMethod::Get).unwrap();
        let names: Vec<&str> = op.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["limit", "tenant"]);
        assert_eq!(op.parameters[0].format.as_deref(), Some("int64"));
        assert!(op.parameters[0].required());
    }

    #[test]
    fn test_sum_and_enum_definitions() {
        let raw = serde_json::json!({
            "definitions": {
                "Animal": {"allOf": [{"$ref": "#/definitions/Cat"}, {"$ref": "#/definitions/Dog"}]},
                "Status": {"type": "string", "enum": ["a", "b"], "description": "state"}
            }
        });
        let group = parse_group_json("zoo", &raw).unwrap();
        assert_eq!(
            group.definitions()[0].kind,
            SchemaKind::Composite {
                members: vec![SchemaRef::new("Cat"), SchemaRef::new("Dog")]
            }
        );
        assert_eq!(group.definitions()[1].description.as_deref(), Some("state"));
    }

    #[test]
    fn test_rejects_foreign_refs() {
        let raw = serde_json::json!({
            "definitions": {
                "Pet": {"properties": {"owner": {"$ref": "people.yaml#/definitions/Owner"}}}
            }
        });
        let err = parse_group_json("pets", &raw).unwrap_err();
        match err {
            AppError::Parse(msg) => assert!(msg.contains("Unsupported $ref")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rejects_bad_status_code() {
        let yaml = r#"
paths:
  /x:
    get:
      responses:
        2XX: {description: ok}
"#;
        assert!(matches!(
            parse_group_yaml("x", yaml),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_group_file_uses_stem_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("billing.json");
        fs::write(
            &json_path,
            r#"{"definitions": {"Invoice": {"type": "object"}}, "x-owner": "ops"}"#,
        )
        .unwrap();

        let group = parse_group_file(&json_path).unwrap();
        assert_eq!(group.name(), "billing");
        assert_eq!(group.definitions()[0].name, "Invoice");

        let yaml_path = dir.path().join("broken.yml");
        fs::write(&yaml_path, "definitions: [not, a, map]\n").unwrap();
        assert!(matches!(
            parse_group_file(&yaml_path),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_inline_object_round_trip() {
        let inline = SchemaNode::inline(SchemaDefinition::object("", vec![]));
        let value = crate::document::emit::node_value(&inline);
        assert_eq!(parse_node(&value, "body").unwrap(), inline);

        let free_form = serde_json::json!({"type": "object"});
        assert_eq!(
            parse_node(&free_form, "body").unwrap(),
            SchemaNode::primitive(PrimitiveType::Object)
        );
    }
}
