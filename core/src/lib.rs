#![deny(missing_docs)]

//! # Apidoc Core
//!
//! Builds Swagger 2.0 documentation from independently authored path groups and
//! validates the merged result in one pass.

/// Shared error types.
pub mod error;

/// Schema model and definition graph traversal.
pub mod schema;

/// Type mapping logic (Rust -> schema nodes).
pub mod type_mapping;

/// Schema derivation from type descriptors.
pub mod derive;

/// Operation, parameter, response and path builders.
pub mod dsl;

/// Path groups.
pub mod group;

/// Cross-group aggregation and validation.
pub mod aggregate;

/// The aggregated document and its wire formats.
pub mod document;

pub use aggregate::aggregate;
pub use derive::{
    DescriptorDeriver, FieldDescriptor, FieldType, SchemaDeriver, SchemaRegistry, TypeDescriptor,
};
pub use document::json_schema::generate_json_schema;
pub use document::parse::{parse_group_file, parse_group_json, parse_group_yaml};
pub use document::ApiDocument;
pub use dsl::{
    Contact, HttpMethod, Info, License, Operation, Parameter, ParameterLocation, Path, Response,
    ResponseKey,
};
pub use error::{AppError, AppResult, ReferenceSite, ValidationError, ValidationErrors};
pub use group::PathGroup;
pub use schema::{
    DefinitionLookup, PrimitiveType, Property, SchemaDefinition, SchemaKind, SchemaNode, SchemaRef,
};
pub use type_mapping::{MappedType, RustTypeMapper, TypeMapper};
