//! Success response from a function's return type.

use indexmap::IndexMap;
use thrift_openapi_ast::{StructLike, Thrift, Type, TypeKind};

use crate::error::Warnings;
use crate::types::{MediaType, Response, Schema};

/// The only status code modeled.
pub const SUCCESS_STATUS: &str = "200";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Build the `200` response for a return type.
///
/// A return type that is not a known struct still gets a response, with an empty schema.
pub fn build_response(return_type: &Type, ast: &Thrift, warnings: &mut Warnings) -> Response {
    let schema = match return_type.kind() {
        TypeKind::Named(name) => match ast.find_struct(name) {
            Some(s) => struct_schema(s),
            None => {
                warnings.push(format!(
                    "Return type `{name}` is not a known struct, response schema left empty"
                ));
                Schema::default()
            }
        },
        _ => Schema::default(),
    };

    Response {
        description: "OK".to_string(),
        content: IndexMap::from([(JSON_CONTENT_TYPE.to_string(), MediaType { schema })]),
    }
}

/// Flatten a struct into an object schema, one level deep.
///
/// Field types are copied by name, so a nested struct shows up as its struct name rather
/// than as a nested object.
pub fn struct_schema(s: &StructLike) -> Schema {
    let properties = s
        .fields
        .iter()
        .map(|field| (field.name.clone(), Schema::typed(&field.name, &field.ty.name)))
        .collect();

    Schema {
        title: Some(s.name.clone()),
        ty: Some("object".to_string()),
        description: s.docs().map(str::to_string),
        properties,
        default: None,
    }
}
