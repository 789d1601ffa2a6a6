//! Parsed Thrift IDL model for thrift-gen-openapi.
//!
//! The types mirror the AST a thriftgo plugin receives, so a JSON dump of a plugin
//! request deserializes straight into [`Thrift`]. Field names on the wire are PascalCase
//! and Go's `null` slices are accepted as empty.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors raised while loading an AST.
#[derive(Debug, Error)]
pub enum AstError {
    /// Requiredness outside the 0..=2 range thriftgo emits.
    #[error("unknown field requiredness {0}")]
    UnknownRequiredness(i32),

    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Go marshals nil slices as `null`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Treat an empty comment block as no docs at all.
fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// A parsed Thrift file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Thrift {
    /// Source file name
    pub filename: String,
    #[serde(deserialize_with = "null_as_default")]
    pub namespaces: Vec<Namespace>,
    #[serde(deserialize_with = "null_as_default")]
    pub structs: Vec<StructLike>,
    #[serde(deserialize_with = "null_as_default")]
    pub unions: Vec<StructLike>,
    #[serde(deserialize_with = "null_as_default")]
    pub exceptions: Vec<StructLike>,
    #[serde(deserialize_with = "null_as_default")]
    pub services: Vec<Service>,
}

impl Thrift {
    /// Decode an AST from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, AstError> {
        Ok(serde_json::from_str(json)?)
    }

    /// First namespace declared for `language` (e.g. `go`).
    pub fn namespace_for(&self, language: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.language == language)
    }

    /// Look up a struct-like definition by name.
    ///
    /// Structs are searched first, then unions, then exceptions.
    pub fn find_struct(&self, name: &str) -> Option<&StructLike> {
        self.structs
            .iter()
            .chain(&self.unions)
            .chain(&self.exceptions)
            .find(|s| s.name == name)
    }

    /// Add a namespace declaration.
    pub fn with_namespace(mut self, language: impl Into<String>, name: impl Into<String>) -> Self {
        self.namespaces.push(Namespace {
            language: language.into(),
            name: name.into(),
        });
        self
    }

    /// Add a struct.
    pub fn with_struct(mut self, s: StructLike) -> Self {
        self.structs.push(s);
        self
    }

    /// Add a service.
    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }
}

/// `namespace <language> <name>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Namespace {
    pub language: String,
    pub name: String,
}

/// A struct, union or exception definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StructLike {
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
    #[serde(rename = "ReservedComments")]
    pub comments: String,
}

impl StructLike {
    /// Create an empty struct.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.comments = docs.into();
        self
    }

    /// Doc comment, if any
    pub fn docs(&self) -> Option<&str> {
        non_empty(&self.comments)
    }
}

/// Field requiredness as encoded by thriftgo (`0`, `1`, `2`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Requiredness {
    #[default]
    Default,
    Required,
    Optional,
}

impl TryFrom<i32> for Requiredness {
    type Error = AstError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Requiredness::Default),
            1 => Ok(Requiredness::Required),
            2 => Ok(Requiredness::Optional),
            other => Err(AstError::UnknownRequiredness(other)),
        }
    }
}

impl From<Requiredness> for i32 {
    fn from(value: Requiredness) -> Self {
        match value {
            Requiredness::Default => 0,
            Requiredness::Required => 1,
            Requiredness::Optional => 2,
        }
    }
}

/// A struct field or function argument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Field {
    #[serde(rename = "ID")]
    pub id: i32,
    pub name: String,
    pub requiredness: Requiredness,
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub ty: Type,
    pub default: Option<ConstValue>,
    #[serde(rename = "ReservedComments")]
    pub comments: String,
}

impl Field {
    /// Create a field with default requiredness.
    pub fn new(id: i32, name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ty: Type::named(ty),
            ..Default::default()
        }
    }

    /// Mark the field `required`.
    pub fn required(mut self) -> Self {
        self.requiredness = Requiredness::Required;
        self
    }

    /// Mark the field `optional`.
    pub fn optional(mut self) -> Self {
        self.requiredness = Requiredness::Optional;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, value: ConstValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.comments = docs.into();
        self
    }

    /// Doc comment, if any
    pub fn docs(&self) -> Option<&str> {
        non_empty(&self.comments)
    }

    /// True only for explicitly `required` fields.
    pub fn is_required(&self) -> bool {
        self.requiredness == Requiredness::Required
    }
}

/// A type reference.
///
/// Container types carry their element types in `key_type`/`value_type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Type {
    pub name: String,
    pub key_type: Option<Box<Type>>,
    pub value_type: Option<Box<Type>>,
}

impl Type {
    /// A plain type reference by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn kind(&self) -> TypeKind<'_> {
        TypeKind::of(&self.name)
    }
}

/// Classification of a type name: one of the Thrift base types, a container, or a
/// reference to a user-defined type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind<'a> {
    Void,
    Bool,
    Byte,
    I8,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
    List,
    Set,
    Map,
    /// A struct, union, exception, enum or typedef name
    Named(&'a str),
}

impl<'a> TypeKind<'a> {
    pub fn of(name: &'a str) -> Self {
        match name {
            "" | "void" => TypeKind::Void,
            "bool" => TypeKind::Bool,
            "byte" => TypeKind::Byte,
            "i8" => TypeKind::I8,
            "i16" => TypeKind::I16,
            "i32" => TypeKind::I32,
            "i64" => TypeKind::I64,
            "double" => TypeKind::Double,
            "string" => TypeKind::String,
            "binary" => TypeKind::Binary,
            "list" => TypeKind::List,
            "set" => TypeKind::Set,
            "map" => TypeKind::Map,
            other => TypeKind::Named(other),
        }
    }

    /// The referenced name, for user-defined types.
    pub fn named(&self) -> Option<&'a str> {
        match self {
            TypeKind::Named(name) => Some(name),
            _ => None,
        }
    }
}

/// A key with one or more values, e.g. `(api.get = "/hello")`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Annotation {
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub values: Vec<String>,
}

/// A service definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Service {
    pub name: String,
    /// Parent service, if any
    pub extends: String,
    #[serde(deserialize_with = "null_as_default")]
    pub functions: Vec<Function>,
    #[serde(rename = "ReservedComments")]
    pub comments: String,
}

impl Service {
    /// Create a service without functions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a function.
    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.comments = docs.into();
        self
    }

    /// Doc comment, if any
    pub fn docs(&self) -> Option<&str> {
        non_empty(&self.comments)
    }
}

/// A service function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Function {
    pub name: String,
    pub oneway: bool,
    pub void: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub function_type: Type,
    #[serde(deserialize_with = "null_as_default")]
    pub arguments: Vec<Field>,
    #[serde(deserialize_with = "null_as_default")]
    pub throws: Vec<Field>,
    #[serde(deserialize_with = "null_as_default")]
    pub annotations: Vec<Annotation>,
    #[serde(rename = "ReservedComments")]
    pub comments: String,
}

impl Function {
    /// Create a function; a `void` return type sets `void`.
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        let function_type = Type::named(return_type);
        Self {
            name: name.into(),
            void: function_type.kind() == TypeKind::Void,
            function_type,
            ..Default::default()
        }
    }

    /// Add an argument.
    pub fn with_argument(mut self, argument: Field) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Add an annotation with its values.
    pub fn with_annotation<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.annotations.push(Annotation {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.comments = docs.into();
        self
    }

    /// Doc comment, if any
    pub fn docs(&self) -> Option<&str> {
        non_empty(&self.comments)
    }
}

/// A constant value, as used for field defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConstValue {
    pub typed_value: Option<ConstTypedValue>,
}

/// Exactly one member is set, depending on how the literal was written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConstTypedValue {
    pub int: Option<i64>,
    pub double: Option<f64>,
    pub literal: Option<String>,
    /// Bare identifiers, including `true` and `false`
    pub identifier: Option<String>,
    pub list: Option<Vec<ConstValue>>,
    pub map: Option<Vec<MapConstValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct MapConstValue {
    pub key: Option<ConstValue>,
    pub value: Option<ConstValue>,
}

impl ConstValue {
    fn typed(value: ConstTypedValue) -> Self {
        Self {
            typed_value: Some(value),
        }
    }

    /// A bare identifier, such as `true`.
    pub fn identifier(ident: impl Into<String>) -> Self {
        Self::typed(ConstTypedValue {
            identifier: Some(ident.into()),
            ..Default::default()
        })
    }

    /// An integer literal.
    pub fn int(value: i64) -> Self {
        Self::typed(ConstTypedValue {
            int: Some(value),
            ..Default::default()
        })
    }

    pub fn as_identifier(&self) -> Option<&str> {
        self.typed_value.as_ref()?.identifier.as_deref()
    }
}
