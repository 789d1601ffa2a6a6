//! Query parameters from a request struct.

use thrift_openapi_ast::{ConstValue, Field, TypeKind};

use crate::error::Warnings;
use crate::types::{DefaultValue, Parameter, Schema};

/// One query parameter per field, in declaration order.
pub fn build_query_params(fields: &[Field], warnings: &mut Warnings) -> Vec<Parameter> {
    fields
        .iter()
        .map(|field| {
            Parameter::query(&field.name, field.is_required())
                .with_description(field.docs())
                .with_schema(field_schema(field, warnings))
        })
        .collect()
}

fn field_schema(field: &Field, warnings: &mut Warnings) -> Schema {
    let mut schema = Schema::default();

    if let Some(value) = &field.default {
        schema.default = default_value(field.ty.kind(), value);
        if schema.default.is_none() {
            warnings.push(format!(
                "Default value of field `{}` ({}) is not supported and was dropped",
                field.name, field.ty.name
            ));
        }
    }

    schema
}

/// Map a field default onto a schema default.
///
/// Only `bool` defaults are mapped; a bare `true` identifier is true and any other
/// identifier is false.
pub fn default_value(kind: TypeKind<'_>, value: &ConstValue) -> Option<DefaultValue> {
    match kind {
        TypeKind::Bool => value
            .as_identifier()
            .map(|ident| DefaultValue::Boolean(ident == "true")),
        _ => None,
    }
}
