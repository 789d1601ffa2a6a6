//! Typed OpenAPI structures.
//!
//! These types represent the subset of OpenAPI 3.0 the generator emits. Collections that
//! the document sorts by name (paths, schemas) are insertion-ordered maps, so their order
//! is exactly the order the builder leaves them in.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

/// HTTP verbs a path item has a slot for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    /// Every verb, in slot order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// The method an HTTP binding asks for: one verb, or every verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodSpec {
    One(HttpMethod),
    Any,
}

impl MethodSpec {
    /// Upper-case method name. Bindings are ordered by this.
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodSpec::One(method) => method.as_str(),
            MethodSpec::Any => "ANY",
        }
    }

    /// The slots this method occupies on a path item.
    pub fn methods(&self) -> &'static [HttpMethod] {
        match self {
            MethodSpec::One(HttpMethod::Get) => &[HttpMethod::Get],
            MethodSpec::One(HttpMethod::Post) => &[HttpMethod::Post],
            MethodSpec::One(HttpMethod::Put) => &[HttpMethod::Put],
            MethodSpec::One(HttpMethod::Delete) => &[HttpMethod::Delete],
            MethodSpec::One(HttpMethod::Options) => &[HttpMethod::Options],
            MethodSpec::One(HttpMethod::Head) => &[HttpMethod::Head],
            MethodSpec::One(HttpMethod::Patch) => &[HttpMethod::Patch],
            MethodSpec::Any => &HttpMethod::ALL,
        }
    }
}

/// An OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// OpenAPI version (e.g. "3.0.3").
    pub openapi: String,
    /// Info object.
    pub info: Info,
    /// Path items, one per path template.
    pub paths: Paths,
    /// Reusable components.
    pub components: Components,
    /// Tags, one per service.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Document {
    /// Sort tags, paths and schemas by name.
    ///
    /// Sorting is stable; nothing below the top-level collections is reordered.
    pub fn sort(&mut self) {
        self.tags.sort_by(|a, b| a.name.cmp(&b.name));
        self.paths.items.sort_keys();
        self.components.schemas.items.sort_keys();
    }

    /// Find the path item for a template.
    pub fn path(&self, name: &str) -> Option<&PathItem> {
        self.paths.items.get(name)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub version: String,
}

/// Path items keyed by path template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Paths {
    pub items: IndexMap<String, PathItem>,
}

/// A path template with its item, before it is added to [`Paths`].
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPathItem {
    /// The path template (e.g. "/users/{id}").
    pub name: String,
    pub value: PathItem,
}

/// Operations available on one path, one slot per verb.
///
/// Slots may share one operation (see [`MethodSpec::Any`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Arc<Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Arc<Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Arc<Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Arc<Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Arc<Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Arc<Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Arc<Operation>>,
}

impl PathItem {
    /// The operation in a verb's slot.
    pub fn operation(&self, method: HttpMethod) -> Option<&Arc<Operation>> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Arc<Operation>> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Patch => &mut self.patch,
        }
    }

    /// Verbs with an operation.
    pub fn methods(&self) -> Vec<HttpMethod> {
        HttpMethod::ALL
            .into_iter()
            .filter(|m| self.operation(*m).is_some())
            .collect()
    }
}

/// An OpenAPI operation (endpoint).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Tags for grouping, the service name.
    pub tags: Vec<String>,
    /// Short summary, from the function's doc comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub description: String,
    /// Unique operation identifier, `{service}_{function}`.
    pub operation_id: String,
    /// Operation parameters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Response definitions keyed by status code.
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    /// Create an operation with an ID.
    pub fn new(operation_id: impl Into<String>) -> Self {
        Self {
            operation_id: operation_id.into(),
            ..Default::default()
        }
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Set the summary, if any.
    pub fn with_summary(mut self, summary: Option<impl Into<String>>) -> Self {
        self.summary = summary.map(Into::into);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the parameters.
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Add a response.
    pub fn with_response(mut self, status: impl Into<String>, response: Response) -> Self {
        self.responses.insert(status.into(), response);
        self
    }
}

/// An OpenAPI parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Location: only "query" is produced.
    #[serde(rename = "in")]
    pub location: String,
    /// Parameter description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter is required.
    pub required: bool,
    /// Parameter schema.
    pub schema: Schema,
}

impl Parameter {
    /// Create a query parameter.
    pub fn query(name: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            location: "query".to_string(),
            description: None,
            required,
            schema: Schema::default(),
        }
    }

    /// Set the description, if any.
    pub fn with_description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = description.map(Into::into);
        self
    }

    /// Set the schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }
}

/// A response definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    /// Media types keyed by content type.
    pub content: IndexMap<String, MediaType>,
}

/// The body of a response for one content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Schema,
}

/// An OpenAPI schema.
///
/// An all-empty schema serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The type name. For struct fields this is the raw IDL type name.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl Schema {
    /// A titled schema of the given type.
    pub fn typed(title: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ty: Some(ty.into()),
            ..Default::default()
        }
    }

    /// True for the `{}` schema.
    pub fn is_empty(&self) -> bool {
        self == &Schema::default()
    }
}

/// A schema default value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Boolean(bool),
}

/// Reusable document components.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Components {
    pub schemas: Schemas,
}

/// Schemas keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schemas {
    pub items: IndexMap<String, Schema>,
}

/// A tag used to group operations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
