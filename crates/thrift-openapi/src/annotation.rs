//! HTTP binding discovery from function annotations.
//!
//! A function is exposed over HTTP by annotating it with one of the hertz route keys:
//!
//! ```thrift
//! HelloReply SayHello(1: HelloReq req) (api.get = "/hello")
//! ```

use thrift_openapi_ast::Function;

use crate::types::{HttpMethod, MethodSpec};

/// Annotation keys that bind a function to an HTTP method.
pub const HTTP_METHOD_ANNOTATIONS: [(&str, MethodSpec); 8] = [
    ("api.get", MethodSpec::One(HttpMethod::Get)),
    ("api.post", MethodSpec::One(HttpMethod::Post)),
    ("api.put", MethodSpec::One(HttpMethod::Put)),
    ("api.patch", MethodSpec::One(HttpMethod::Patch)),
    ("api.delete", MethodSpec::One(HttpMethod::Delete)),
    ("api.options", MethodSpec::One(HttpMethod::Options)),
    ("api.head", MethodSpec::One(HttpMethod::Head)),
    ("api.any", MethodSpec::Any),
];

/// The method and path template a function is served on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBinding {
    pub method: MethodSpec,
    pub path: String,
}

/// Collect every `(method, paths)` pair declared on a function, ordered by method name.
pub fn http_annotations(function: &Function) -> Vec<(MethodSpec, &[String])> {
    let mut pairs: Vec<(MethodSpec, &[String])> = HTTP_METHOD_ANNOTATIONS
        .iter()
        .filter_map(|(key, method)| {
            function
                .annotations
                .iter()
                .find(|a| a.key.eq_ignore_ascii_case(key))
                .map(|a| (*method, a.values.as_slice()))
        })
        .collect();

    pairs.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));
    pairs
}

/// Pick the HTTP binding for a function.
///
/// When several route annotations are present, the one whose method name sorts first
/// wins (`ANY` before `DELETE` before `GET` ...), and the first of its paths is used.
pub fn resolve(function: &Function) -> Option<HttpBinding> {
    let (method, paths) = http_annotations(function).into_iter().next()?;
    let path = paths.first()?;

    Some(HttpBinding {
        method,
        path: path.clone(),
    })
}
