#![deny(missing_docs)]

//! # Schema Derivation
//!
//! Turns explicit type descriptors into `SchemaDefinition`s.
//!
//! - Records become `Object` definitions; field optionality follows `Option<T>`.
//! - Sum types become `Composite` (`allOf`) definitions whose members reference each
//!   variant's own definition. Swagger 2.0 has no discriminated unions, so the
//!   encoding does not carry exhaustiveness.
//! - String literal sets become `Enum` definitions.
//!
//! Derivation never fails: a field type the mapper cannot read degrades to a
//! free-form `object` node and a warning is logged.

pub mod registry;

use crate::schema::{PrimitiveType, Property, SchemaDefinition, SchemaNode, SchemaRef};
use crate::type_mapping::{RustTypeMapper, TypeMapper};
use tracing::warn;

pub use registry::SchemaRegistry;

/// A field of a record descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// JSON field name.
    pub name: String,
    /// How the field type is described.
    pub ty: FieldType,
    /// Optional field documentation.
    pub description: Option<String>,
}

/// The type of a descriptor field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A Rust type expression, e.g. `Option<Vec<Uuid>>`.
    Rust(String),
    /// A schema node supplied directly.
    Node {
        /// The field schema.
        schema: SchemaNode,
        /// Whether the field must be present.
        required: bool,
    },
}

impl FieldDescriptor {
    /// A field typed by a Rust type expression.
    pub fn new(name: impl Into<String>, rust_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: FieldType::Rust(rust_type.into()),
            description: None,
        }
    }

    /// A field typed by an explicit schema node.
    pub fn with_node(name: impl Into<String>, schema: SchemaNode, required: bool) -> Self {
        Self {
            name: name.into(),
            ty: FieldType::Node { schema, required },
            description: None,
        }
    }

    /// Sets the field documentation.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Structural description of a type to document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// A record with named fields.
    Record {
        /// Definition name.
        name: String,
        /// Type documentation.
        description: Option<String>,
        /// Fields in declaration order.
        fields: Vec<FieldDescriptor>,
    },
    /// A closed set of record subtypes.
    Sum {
        /// Definition name.
        name: String,
        /// Type documentation.
        description: Option<String>,
        /// Variant descriptors, each registered as its own definition.
        variants: Vec<TypeDescriptor>,
    },
    /// A closed set of string literals.
    Enum {
        /// Definition name.
        name: String,
        /// Type documentation.
        description: Option<String>,
        /// Literal values in declaration order.
        values: Vec<String>,
    },
}

impl TypeDescriptor {
    /// A record descriptor.
    pub fn record(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        TypeDescriptor::Record {
            name: name.into(),
            description: None,
            fields,
        }
    }

    /// A sum-type descriptor.
    pub fn sum(name: impl Into<String>, variants: Vec<TypeDescriptor>) -> Self {
        TypeDescriptor::Sum {
            name: name.into(),
            description: None,
            variants,
        }
    }

    /// A string-enum descriptor.
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeDescriptor::Enum {
            name: name.into(),
            description: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Sets the type documentation.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            TypeDescriptor::Record { description, .. }
            | TypeDescriptor::Sum { description, .. }
            | TypeDescriptor::Enum { description, .. } => *description = Some(text.into()),
        }
        self
    }

    /// The definition name this descriptor derives.
    pub fn name(&self) -> &str {
        match self {
            TypeDescriptor::Record { name, .. }
            | TypeDescriptor::Sum { name, .. }
            | TypeDescriptor::Enum { name, .. } => name,
        }
    }
}

/// Produces schema definitions from structural descriptors.
pub trait SchemaDeriver {
    /// Derives the definition for `descriptor` itself.
    ///
    /// For sum types this is the composite only; see [`SchemaDeriver::derive_all`].
    fn derive_schema(&self, descriptor: &TypeDescriptor) -> SchemaDefinition;

    /// Derives an `Enum` definition over `values`.
    fn derive_enum(&self, name: &str, values: &[String]) -> SchemaDefinition {
        SchemaDefinition::enumeration(name, values.iter().cloned())
    }

    /// Derives `descriptor` and every variant definition it depends on.
    ///
    /// The descriptor's own definition comes first, followed by variants depth-first.
    fn derive_all(&self, descriptor: &TypeDescriptor) -> Vec<SchemaDefinition> {
        let mut out = vec![self.derive_schema(descriptor)];
        if let TypeDescriptor::Sum { variants, .. } = descriptor {
            for variant in variants {
                out.extend(self.derive_all(variant));
            }
        }
        out
    }
}

/// The descriptor-driven deriver, parameterized by the type mapper it uses.
#[derive(Debug, Clone)]
pub struct DescriptorDeriver<M = RustTypeMapper> {
    mapper: M,
}

impl DescriptorDeriver {
    /// Creates a deriver backed by [`RustTypeMapper`].
    pub fn new() -> Self {
        Self {
            mapper: RustTypeMapper,
        }
    }
}

impl Default for DescriptorDeriver {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: TypeMapper> DescriptorDeriver<M> {
    /// Creates a deriver over a custom mapper.
    pub fn with_mapper(mapper: M) -> Self {
        Self { mapper }
    }

    fn derive_field(&self, owner: &str, field: &FieldDescriptor) -> Property {
        let (schema, required) = match &field.ty {
            FieldType::Node { schema, required } => (schema.clone(), *required),
            FieldType::Rust(rust_type) => match self.mapper.map(rust_type) {
                Ok(mapped) => (mapped.node, !mapped.optional),
                Err(err) => {
                    warn!(
                        definition = owner,
                        field = %field.name,
                        rust_type = %rust_type,
                        error = %err,
                        "Unmappable field type, documenting as free-form object."
                    );
                    (SchemaNode::primitive(PrimitiveType::Object), true)
                }
            },
        };

        Property {
            name: field.name.clone(),
            schema,
            required,
            description: field.description.clone(),
        }
    }
}

impl<M: TypeMapper> SchemaDeriver for DescriptorDeriver<M> {
    fn derive_schema(&self, descriptor: &TypeDescriptor) -> SchemaDefinition {
        let definition = match descriptor {
            TypeDescriptor::Record { name, fields, .. } => SchemaDefinition::object(
                name.clone(),
                fields.iter().map(|f| self.derive_field(name, f)).collect(),
            ),
            TypeDescriptor::Sum { name, variants, .. } => SchemaDefinition::composite(
                name.clone(),
                variants.iter().map(|v| SchemaRef::new(v.name())).collect(),
            ),
            TypeDescriptor::Enum { name, values, .. } => self.derive_enum(name, values),
        };

        let description = match descriptor {
            TypeDescriptor::Record { description, .. }
            | TypeDescriptor::Sum { description, .. }
            | TypeDescriptor::Enum { description, .. } => description.clone(),
        };

        SchemaDefinition {
            description,
            ..definition
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;

    fn pet_descriptor() -> TypeDescriptor {
        TypeDescriptor::record(
            "Pet",
            vec![
                FieldDescriptor::new("id", "Uuid"),
                FieldDescriptor::new("name", "String").with_description("Display name"),
                FieldDescriptor::new("tags", "Option<Vec<String>>"),
                FieldDescriptor::new("owner", "Owner"),
            ],
        )
        .with_description("A pet")
    }

    #[test]
    fn test_record_derivation() {
        let def = DescriptorDeriver::new().derive_schema(&pet_descriptor());
        assert_eq!(def.name, "Pet");
        assert_eq!(def.description.as_deref(), Some("A pet"));

        let SchemaKind::Object { properties } = def.kind else {
            panic!("expected object");
        };
        assert_eq!(properties.len(), 4);
        assert_eq!(
            properties[0].schema,
            SchemaNode::formatted(PrimitiveType::String, "uuid")
        );
        assert!(properties[0].required);
        assert_eq!(properties[1].description.as_deref(), Some("Display name"));
        assert!(!properties[2].required);
        assert_eq!(properties[2].schema, SchemaNode::array(SchemaNode::string()));
        assert_eq!(properties[3].schema, SchemaNode::reference("Owner"));
    }

    #[test]
    fn test_sum_type_is_composite_of_refs() {
        let animal = TypeDescriptor::sum(
            "Animal",
            vec![
                TypeDescriptor::record("Cat", vec![FieldDescriptor::new("lives", "u8")]),
                TypeDescriptor::record("Dog", vec![FieldDescriptor::new("good", "bool")]),
            ],
        );

        let deriver = DescriptorDeriver::new();
        let def = deriver.derive_schema(&animal);
        assert_eq!(
            def.kind,
            SchemaKind::Composite {
                members: vec![SchemaRef::new("Cat"), SchemaRef::new("Dog")]
            }
        );

        let all: Vec<String> = deriver
            .derive_all(&animal)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(all, vec!["Animal", "Cat", "Dog"]);
    }

    #[test]
    fn test_enum_derivation() {
        let def = DescriptorDeriver::new()
            .derive_schema(&TypeDescriptor::enumeration("Status", ["available", "sold"]));
        assert_eq!(
            def.kind,
            SchemaKind::Enum {
                values: vec!["available".into(), "sold".into()]
            }
        );
    }

    #[test]
    fn test_unmappable_field_degrades() {
        let desc = TypeDescriptor::record("Odd", vec![FieldDescriptor::new("pair", "(i32, i32)")]);
        let def = DescriptorDeriver::new().derive_schema(&desc);
        let SchemaKind::Object { properties } = def.kind else {
            panic!("expected object");
        };
        assert_eq!(
            properties[0].schema,
            SchemaNode::primitive(PrimitiveType::Object)
        );
    }

    #[test]
    fn test_explicit_node_field() {
        let desc = TypeDescriptor::record(
            "Page",
            vec![FieldDescriptor::with_node(
                "cursor",
                SchemaNode::formatted(PrimitiveType::String, "byte"),
                false,
            )],
        );
        let def = DescriptorDeriver::new().derive_schema(&desc);
        let SchemaKind::Object { properties } = def.kind else {
            panic!("expected object");
        };
        assert!(!properties[0].required);
    }
}
