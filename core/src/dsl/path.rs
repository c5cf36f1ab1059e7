#![deny(missing_docs)]

//! # Paths
//!
//! A path template with operations bound per HTTP verb.

use crate::dsl::operation::{Operation, ParameterLocation};
use indexmap::IndexMap;
use regex::Regex;
use std::fmt::Display;
use std::sync::OnceLock;

const TEMPLATE_PARAM_PATTERN: &str = r"\{([^}/]+)}";

/// HTTP verbs Swagger 2.0 can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// PATCH
    Patch,
}

impl HttpMethod {
    /// All verbs in Swagger Path Item order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    /// The lowercase key used in the Swagger Path Item object.
    pub fn as_key(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }

    /// Parses a Path Item key (case-insensitive).
    pub fn from_key(key: &str) -> Option<Self> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_key().eq_ignore_ascii_case(key))
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_key().to_ascii_uppercase())
    }
}

/// A path template and its operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Template, e.g. `/pets/{id}`.
    pub template: String,
    /// Operations keyed by verb, in binding order.
    pub operations: IndexMap<HttpMethod, Operation>,
}

impl Path {
    /// A path with no operations bound yet.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            operations: IndexMap::new(),
        }
    }

    /// Binds `operation` to `method`, overwriting a previous binding.
    pub fn with_operation(mut self, method: HttpMethod, operation: Operation) -> Self {
        self.operations.insert(method, operation);
        self
    }

    /// Binds a GET operation.
    pub fn get(self, operation: Operation) -> Self {
        self.with_operation(HttpMethod::Get, operation)
    }

    /// Binds a PUT operation.
    pub fn put(self, operation: Operation) -> Self {
        self.with_operation(HttpMethod::Put, operation)
    }

    /// Binds a POST operation.
    pub fn post(self, operation: Operation) -> Self {
        self.with_operation(HttpMethod::Post, operation)
    }

    /// Binds a DELETE operation.
    pub fn delete(self, operation: Operation) -> Self {
        self.with_operation(HttpMethod::Delete, operation)
    }

    /// Binds an OPTIONS operation.
    pub fn options(self, operation: Operation) -> Self {
        self.with_operation(HttpMethod::Options, operation)
    }

    /// Binds a HEAD operation.
    pub fn head(self, operation: Operation) -> Self {
        self.with_operation(HttpMethod::Head, operation)
    }

    /// Binds a PATCH operation.
    pub fn patch(self, operation: Operation) -> Self {
        self.with_operation(HttpMethod::Patch, operation)
    }

    /// The operation bound to `method`.
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        self.operations.get(&method)
    }

    /// Placeholder names in the template, in order of appearance.
    pub fn template_parameters(&self) -> Vec<String> {
        static TEMPLATE_PARAM_RE: OnceLock<Regex> = OnceLock::new();
        let re = TEMPLATE_PARAM_RE
            .get_or_init(|| Regex::new(TEMPLATE_PARAM_PATTERN).expect("Invalid regex constant"));
        re.captures_iter(&self.template)
            .map(|cap| cap[1].to_string())
            .collect()
    }

    /// Template placeholders that `method`'s operation does not declare as path parameters.
    pub fn undeclared_parameters(&self, method: HttpMethod) -> Vec<String> {
        let Some(op) = self.operations.get(&method) else {
            return Vec::new();
        };
        self.template_parameters()
            .into_iter()
            .filter(|name| {
                !op.parameters
                    .iter()
                    .any(|p| p.location == ParameterLocation::Path && &p.name == name)
            })
            .collect()
    }
}
