#![deny(missing_docs)]

//! # Schema Model
//!
//! Immutable value types describing JSON-Schema-like definitions.
//!
//! - **SchemaDefinition**: a named object, enum, or `allOf` composite.
//! - **SchemaNode**: primitives, arrays, by-name references, and inline definitions.
//! - **refs**: `#/definitions/...` pointer encoding.
//!
//! References are resolved lazily through a [`DefinitionLookup`]; nothing in this
//! module follows a `Ref` until asked to.

pub mod refs;

use crate::error::ValidationError;
use indexmap::{IndexMap, IndexSet};
use std::fmt::Display;

/// Primitive JSON types a schema node may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// A string type.
    String,
    /// An integer type.
    Integer,
    /// A floating point number.
    Number,
    /// A boolean type.
    Boolean,
    /// A free-form object.
    Object,
    /// A file upload (Swagger 2.0 form/body parameters).
    File,
}

impl PrimitiveType {
    /// Parses the wire keyword (`"string"`, `"integer"`, ...).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "string" => Some(PrimitiveType::String),
            "integer" => Some(PrimitiveType::Integer),
            "number" => Some(PrimitiveType::Number),
            "boolean" => Some(PrimitiveType::Boolean),
            "object" => Some(PrimitiveType::Object),
            "file" => Some(PrimitiveType::File),
            _ => None,
        }
    }

    /// The wire keyword for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Number => "number",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Object => "object",
            PrimitiveType::File => "file",
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A polymorphic schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// A primitive value with an optional format (e.g. `uuid`, `int64`).
    Primitive {
        /// The JSON type.
        ty: PrimitiveType,
        /// Optional format specifier.
        format: Option<String>,
    },
    /// An array whose items follow the inner node.
    ArrayOf(Box<SchemaNode>),
    /// A by-name pointer to a definition, resolved only at aggregation.
    Ref(SchemaRef),
    /// An anonymous definition embedded in place.
    Inline(Box<SchemaDefinition>),
}

impl SchemaNode {
    /// A primitive node without format.
    pub fn primitive(ty: PrimitiveType) -> Self {
        SchemaNode::Primitive { ty, format: None }
    }

    /// A primitive node with a format.
    pub fn formatted(ty: PrimitiveType, format: impl Into<String>) -> Self {
        SchemaNode::Primitive {
            ty,
            format: Some(format.into()),
        }
    }

    /// `{"type": "string"}`.
    pub fn string() -> Self {
        Self::primitive(PrimitiveType::String)
    }

    /// `{"type": "integer"}`.
    pub fn integer() -> Self {
        Self::primitive(PrimitiveType::Integer)
    }

    /// `{"type": "number"}`.
    pub fn number() -> Self {
        Self::primitive(PrimitiveType::Number)
    }

    /// `{"type": "boolean"}`.
    pub fn boolean() -> Self {
        Self::primitive(PrimitiveType::Boolean)
    }

    /// An array of `items`.
    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::ArrayOf(Box::new(items))
    }

    /// A reference to the definition called `name`.
    pub fn reference(name: impl Into<String>) -> Self {
        SchemaNode::Ref(SchemaRef::new(name))
    }

    /// Embeds `definition` in place.
    pub fn inline(definition: SchemaDefinition) -> Self {
        SchemaNode::Inline(Box::new(definition))
    }

    /// Collects every reference reachable inside this node without resolving it.
    ///
    /// Each hit is reported as `(location, name)`, where `location` extends `base`
    /// with `[]` for array items and `.field` for inline properties.
    pub fn references(&self, base: &str) -> Vec<(String, &SchemaRef)> {
        let mut out = Vec::new();
        collect_node_refs(self, base.to_string(), &mut out);
        out
    }
}

/// A named pointer to a `SchemaDefinition`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaRef {
    /// Target definition name.
    pub name: String,
}

impl SchemaRef {
    /// Creates a reference to `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A field of an object definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// The JSON field name.
    pub name: String,
    /// The field schema.
    pub schema: SchemaNode,
    /// Whether the field must be present.
    pub required: bool,
    /// Optional human readable description.
    pub description: Option<String>,
}

impl Property {
    /// A required property.
    pub fn required(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            name: name.into(),
            schema,
            required: true,
            description: None,
        }
    }

    /// An optional property.
    pub fn optional(name: impl Into<String>, schema: SchemaNode) -> Self {
        Self {
            required: false,
            ..Self::required(name, schema)
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The shape of a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaKind {
    /// An object with ordered properties.
    Object {
        /// Properties in declaration order.
        properties: Vec<Property>,
    },
    /// A closed set of string literals.
    Enum {
        /// Literal values in declaration order.
        values: Vec<String>,
    },
    /// An `allOf` union of member definitions.
    Composite {
        /// Member references in declaration order.
        members: Vec<SchemaRef>,
    },
}

/// A named, reusable schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDefinition {
    /// Unique name within an aggregated document.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Object, enum, or composite shape.
    pub kind: SchemaKind,
}

impl SchemaDefinition {
    /// An object definition.
    pub fn object(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: SchemaKind::Object { properties },
        }
    }

    /// An enum definition over string literals.
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            kind: SchemaKind::Enum {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// A composite (`allOf`) definition over the named members.
    pub fn composite(name: impl Into<String>, members: Vec<SchemaRef>) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind: SchemaKind::Composite { members },
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// A `Ref` node pointing at this definition.
    pub fn to_ref(&self) -> SchemaNode {
        SchemaNode::reference(self.name.clone())
    }

    /// Direct references held by this definition, with their location inside it.
    ///
    /// Inline definitions are walked; references are not followed.
    pub fn references(&self) -> Vec<(String, &SchemaRef)> {
        let mut out = Vec::new();
        collect_definition_refs(self, "", &mut out);
        out
    }

    /// Every named definition transitively reachable through `Ref` nodes.
    ///
    /// The result excludes `self`, holds each definition once, and is ordered by
    /// first visit of a depth-first walk. Names that `lookup` cannot resolve are
    /// skipped. A reference loop fails with [`ValidationError::CyclicSchema`].
    pub fn related_definitions<'a, L>(
        &'a self,
        lookup: &'a L,
    ) -> Result<Vec<&'a SchemaDefinition>, ValidationError>
    where
        L: DefinitionLookup + ?Sized,
    {
        let mut visited: IndexSet<&str> = IndexSet::new();
        let mut stack: Vec<&str> = vec![self.name.as_str()];
        let mut related = Vec::new();
        walk_related(self, lookup, &mut stack, &mut visited, &mut related)?;
        Ok(related)
    }
}

fn walk_related<'a, L>(
    def: &'a SchemaDefinition,
    lookup: &'a L,
    stack: &mut Vec<&'a str>,
    visited: &mut IndexSet<&'a str>,
    related: &mut Vec<&'a SchemaDefinition>,
) -> Result<(), ValidationError>
where
    L: DefinitionLookup + ?Sized,
{
    for (_, reference) in def.references() {
        let name = reference.name.as_str();

        if let Some(pos) = stack.iter().position(|n| *n == name) {
            let mut cycle: Vec<String> = stack[pos..].iter().map(|n| n.to_string()).collect();
            cycle.push(name.to_string());
            return Err(ValidationError::CyclicSchema { cycle });
        }
        if visited.contains(name) {
            continue;
        }
        let Some(target) = lookup.definition(name) else {
            continue;
        };

        visited.insert(name);
        related.push(target);
        stack.push(name);
        walk_related(target, lookup, stack, visited, related)?;
        stack.pop();
    }
    Ok(())
}

fn collect_definition_refs<'a>(
    def: &'a SchemaDefinition,
    prefix: &str,
    out: &mut Vec<(String, &'a SchemaRef)>,
) {
    match &def.kind {
        SchemaKind::Object { properties } => {
            for prop in properties {
                let location = join_location(prefix, &prop.name);
                collect_node_refs(&prop.schema, location, out);
            }
        }
        SchemaKind::Composite { members } => {
            for (idx, member) in members.iter().enumerate() {
                out.push((join_location(prefix, &format!("allOf[{}]", idx)), member));
            }
        }
        SchemaKind::Enum { .. } => {}
    }
}

fn collect_node_refs<'a>(
    node: &'a SchemaNode,
    location: String,
    out: &mut Vec<(String, &'a SchemaRef)>,
) {
    match node {
        SchemaNode::Primitive { .. } => {}
        SchemaNode::ArrayOf(items) => collect_node_refs(items, format!("{}[]", location), out),
        SchemaNode::Ref(r) => out.push((location, r)),
        SchemaNode::Inline(def) => collect_definition_refs(def, &location, out),
    }
}

fn join_location(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Resolves definition names to definitions.
pub trait DefinitionLookup {
    /// Returns the definition called `name`, if known.
    fn definition(&self, name: &str) -> Option<&SchemaDefinition>;
}

impl DefinitionLookup for IndexMap<String, SchemaDefinition> {
    fn definition(&self, name: &str) -> Option<&SchemaDefinition> {
        self.get(name)
    }
}

impl DefinitionLookup for [SchemaDefinition] {
    fn definition(&self, name: &str) -> Option<&SchemaDefinition> {
        self.iter().find(|d| d.name == name)
    }
}

impl DefinitionLookup for Vec<SchemaDefinition> {
    fn definition(&self, name: &str) -> Option<&SchemaDefinition> {
        self.as_slice().definition(name)
    }
}
