#![deny(missing_docs)]

//! # Operations
//!
//! Swagger 2.0 Operation, Parameter, and Response values.

use crate::schema::{PrimitiveType, SchemaNode};
use std::collections::BTreeSet;
use std::fmt::Display;

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    /// Path segment (e.g. `/users/{id}`).
    Path,
    /// Query string (e.g. `/users?page=1`).
    Query,
    /// Request header.
    Header,
    /// Request body.
    Body,
}

impl ParameterLocation {
    /// The Swagger `in` keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
        }
    }

    /// Parses the Swagger `in` keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "body" => Some(ParameterLocation::Body),
            _ => None,
        }
    }
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Where the parameter is carried.
    pub location: ParameterLocation,
    /// Optional description.
    pub description: Option<String>,
    /// Value type for non-body parameters.
    pub param_type: PrimitiveType,
    /// Optional format for non-body parameters.
    pub format: Option<String>,
    /// Non-body parameter is an array of `param_type` values.
    pub collection: bool,
    /// Body schema, for `body` parameters.
    pub schema: Option<SchemaNode>,
    required: bool,
}

impl Parameter {
    fn located(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            param_type: PrimitiveType::String,
            format: None,
            collection: false,
            schema: None,
            required: false,
        }
    }

    /// A path parameter. Always required.
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::located(name, ParameterLocation::Path)
        }
    }

    /// A query parameter, optional unless marked otherwise.
    pub fn query(name: impl Into<String>) -> Self {
        Self::located(name, ParameterLocation::Query)
    }

    /// A header parameter, optional unless marked otherwise.
    pub fn header(name: impl Into<String>) -> Self {
        Self::located(name, ParameterLocation::Header)
    }

    /// A required body parameter described by `schema`.
    pub fn body(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            schema: Some(schema),
            required: true,
            ..Self::located(name, ParameterLocation::Body)
        }
    }

    /// Whether the parameter must be supplied. Path parameters always are.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Marks the parameter required or optional (ignored for path parameters).
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required || self.location == ParameterLocation::Path;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the value type of a non-body parameter.
    pub fn with_type(mut self, param_type: PrimitiveType) -> Self {
        self.param_type = param_type;
        self
    }

    /// Sets the format of a non-body parameter.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Declares a non-body parameter as an array of its value type.
    pub fn as_collection(mut self) -> Self {
        self.collection = true;
        self
    }
}

/// A response description with an optional body schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Human readable description (required by Swagger).
    pub description: String,
    /// Optional response body schema.
    pub schema: Option<SchemaNode>,
}

impl Response {
    /// A response without a body.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            schema: None,
        }
    }

    /// A response whose body follows `schema`.
    pub fn with_schema(description: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            description: description.into(),
            schema: Some(schema),
        }
    }
}

/// Key of an entry in the responses mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResponseKey {
    /// An explicit HTTP status code.
    Code(u16),
    /// The catch-all `default` response.
    Default,
}

impl Display for ResponseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseKey::Code(code) => write!(f, "{}", code),
            ResponseKey::Default => write!(f, "default"),
        }
    }
}

/// A Swagger operation bound to a path and verb.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operation {
    /// Short summary.
    pub summary: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Unique operation identifier.
    pub operation_id: Option<String>,
    /// Tags used to group operations.
    pub tags: BTreeSet<String>,
    /// Whether the operation is deprecated.
    pub deprecated: bool,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Response entries in declaration order.
    ///
    /// Keys are expected to be unique; repeats are reported at aggregation.
    pub responses: Vec<(ResponseKey, Response)>,
}

impl Operation {
    /// An empty operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the operation id.
    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Replaces the tag set.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the operation deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Replaces the parameter list (last write wins, no merge).
    pub fn with_params(mut self, params: Vec<Parameter>) -> Self {
        self.parameters = params;
        self
    }

    /// Replaces the responses with `entries` followed by a `default` entry.
    ///
    /// Repeated status codes are kept as given; aggregation reports them.
    pub fn responding<I>(mut self, default: Response, entries: I) -> Self
    where
        I: IntoIterator<Item = (u16, Response)>,
    {
        self.responses = entries
            .into_iter()
            .map(|(code, response)| (ResponseKey::Code(code), response))
            .collect();
        self.responses.push((ResponseKey::Default, default));
        self
    }

    /// Looks up a response entry (first match).
    pub fn response(&self, key: ResponseKey) -> Option<&Response> {
        self.responses
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, r)| r)
    }

    /// Status codes declared more than once, each listed once in first-repeat order.
    pub fn duplicate_status_codes(&self) -> Vec<u16> {
        let mut seen = BTreeSet::new();
        let mut duplicates = Vec::new();
        for (key, _) in &self.responses {
            if let ResponseKey::Code(code) = key {
                if !seen.insert(*code) && !duplicates.contains(code) {
                    duplicates.push(*code);
                }
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params_always_required() {
        let p = Parameter::path("id").with_required(false);
        assert!(p.required());
        assert!(!Parameter::query("page").required());
        assert!(Parameter::query("page").with_required(true).required());
        assert!(Parameter::body("pet", SchemaNode::reference("Pet")).required());
    }

    #[test]
    fn test_with_params_replaces() {
        let op = Operation::new()
            .with_params(vec![Parameter::query("a"), Parameter::query("b")])
            .with_params(vec![Parameter::header("c")]);
        assert_eq!(op.parameters.len(), 1);
        assert_eq!(op.parameters[0].name, "c");
    }

    #[test]
    fn test_responding_appends_default() {
        let op = Operation::new().responding(
            Response::new("Unexpected error"),
            [
                (200, Response::with_schema("OK", SchemaNode::reference("Pet"))),
                (404, Response::new("Not found")),
            ],
        );

        let keys: Vec<ResponseKey> = op.responses.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                ResponseKey::Code(200),
                ResponseKey::Code(404),
                ResponseKey::Default
            ]
        );
        assert_eq!(
            op.response(ResponseKey::Default).unwrap().description,
            "Unexpected error"
        );
        assert!(op.duplicate_status_codes().is_empty());
    }

    #[test]
    fn test_duplicate_status_codes_construct_fine() {
        let op = Operation::new().responding(
            Response::new("err"),
            [
                (200, Response::new("a")),
                (200, Response::new("b")),
                (200, Response::new("c")),
                (201, Response::new("d")),
            ],
        );
        assert_eq!(op.responses.len(), 5);
        assert_eq!(op.duplicate_status_codes(), vec![200]);
    }

    #[test]
    fn test_tags_are_a_set() {
        let op = Operation::new().with_tags(["pets", "animals", "pets"]);
        let tags: Vec<&str> = op.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["animals", "pets"]);
    }
}
