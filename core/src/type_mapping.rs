#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts Rust type expressions (as written in a type descriptor) into schema nodes.
//! Handles primitives, well-known formats, collections (Vec), and optionality (Option).

use crate::error::{AppError, AppResult};
use crate::schema::{PrimitiveType, SchemaNode};
// Import HasGenericArgs to access .generic_arg_list() on PathSegments
use ra_ap_edition::Edition;
use ra_ap_syntax::ast::{self, HasGenericArgs};
use ra_ap_syntax::{AstNode, SourceFile};

/// The schema a Rust type expression maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// The schema node for the value.
    pub node: SchemaNode,
    /// Whether the value was wrapped in `Option<T>`.
    pub optional: bool,
}

/// Trait for converting Rust type strings to schema nodes.
pub trait TypeMapper {
    /// Maps a Rust type string (e.g., `Option<i32>`) to a schema node.
    fn map(&self, rust_type: &str) -> AppResult<MappedType>;
}

/// A standard implementation of `TypeMapper`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

impl TypeMapper for RustTypeMapper {
    fn map(&self, rust_type: &str) -> AppResult<MappedType> {
        // Wrap implementation to parse valid Rust syntax using a type alias
        let code = format!("type _Wrapper = {};", rust_type);
        let parse = SourceFile::parse(&code, Edition::Edition2021);
        let file = parse.tree();

        let type_alias = file
            .syntax()
            .descendants()
            .find_map(ast::TypeAlias::cast)
            .ok_or_else(|| {
                AppError::General(format!("Failed to parse type string: {}", rust_type))
            })?;

        let root_type = type_alias
            .ty()
            .ok_or_else(|| AppError::General(format!("Invalid type syntax: {}", rust_type)))?;

        map_ast_type(&root_type)
    }
}

/// Recursively maps an AST Type node.
fn map_ast_type(ty: &ast::Type) -> AppResult<MappedType> {
    match ty {
        ast::Type::PathType(path_type) => {
            let path = path_type
                .path()
                .ok_or_else(|| AppError::General("Empty path".into()))?;
            let segment = path
                .segment()
                .ok_or_else(|| AppError::General("Empty segment".into()))?;
            let name_ref = segment
                .name_ref()
                .ok_or_else(|| AppError::General("No type name".into()))?;
            let name = name_ref.text();

            match name.as_str() {
                "String" | "str" | "char" => Ok(required(SchemaNode::string())),
                "bool" => Ok(required(SchemaNode::boolean())),
                "i64" | "u64" | "i128" | "u128" | "isize" | "usize" => {
                    Ok(required(SchemaNode::formatted(PrimitiveType::Integer, "int64")))
                }
                "i8" | "i16" | "i32" | "u8" | "u16" | "u32" => {
                    Ok(required(SchemaNode::formatted(PrimitiveType::Integer, "int32")))
                }
                "f32" => Ok(required(SchemaNode::formatted(PrimitiveType::Number, "float"))),
                "f64" => Ok(required(SchemaNode::formatted(PrimitiveType::Number, "double"))),

                "Uuid" => Ok(required(SchemaNode::formatted(PrimitiveType::String, "uuid"))),
                "NaiveDateTime" | "DateTime" => Ok(required(SchemaNode::formatted(
                    PrimitiveType::String,
                    "date-time",
                ))),
                "NaiveDate" => Ok(required(SchemaNode::formatted(PrimitiveType::String, "date"))),
                "Value" | "HashMap" | "BTreeMap" | "IndexMap" => {
                    Ok(required(SchemaNode::primitive(PrimitiveType::Object)))
                }

                "Option" => handle_generic_wrapper(segment, |inner| MappedType {
                    node: inner.node,
                    optional: true,
                }),
                "Vec" | "HashSet" | "BTreeSet" => handle_generic_wrapper(segment, |inner| {
                    required(SchemaNode::array(inner.node))
                }),
                "Box" => handle_generic_wrapper(segment, |inner| inner),

                // User defined structs or unknown types become references
                other => Ok(required(SchemaNode::reference(other))),
            }
        }
        ast::Type::RefType(ref_type) => {
            let inner = ref_type
                .ty()
                .ok_or_else(|| AppError::General("Invalid reference".into()))?;
            map_ast_type(&inner)
        }
        ast::Type::SliceType(slice) => {
            let inner = slice
                .ty()
                .ok_or_else(|| AppError::General("Invalid slice".into()))?;
            Ok(required(SchemaNode::array(map_ast_type(&inner)?.node)))
        }
        _ => Err(AppError::General(format!(
            "Unsupported type structure: {:?}",
            ty
        ))),
    }
}

/// Helper to handle types like `Option<T>` or `Vec<T>`.
fn handle_generic_wrapper<F>(segment: ast::PathSegment, wrap: F) -> AppResult<MappedType>
where
    F: FnOnce(MappedType) -> MappedType,
{
    let generic_args = segment
        .generic_arg_list()
        .ok_or_else(|| AppError::General("Missing generic arguments for container type".into()))?;

    // We assume the first argument is the type T.
    let first_arg = generic_args
        .generic_args()
        .next()
        .ok_or_else(|| AppError::General("Generic list empty".into()))?;

    match first_arg {
        ast::GenericArg::TypeArg(type_arg) => {
            let inner_ty = type_arg
                .ty()
                .ok_or_else(|| AppError::General("Invalid generic type".into()))?;
            let inner = map_ast_type(&inner_ty)?;
            Ok(wrap(inner))
        }
        _ => Err(AppError::General(
            "Unsupported generic argument type".into(),
        )),
    }
}

fn required(node: SchemaNode) -> MappedType {
    MappedType {
        node,
        optional: false,
    }
}
