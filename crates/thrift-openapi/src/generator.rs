//! Plugin entry point: request in, generated file and diagnostics out.

use serde::{Deserialize, Serialize};
use thrift_openapi_ast::Thrift;

use crate::Result;
use crate::builder::build_document;
use crate::config::Config;
use crate::types::Document;

pub const TOOL_NAME: &str = "thrift-gen-openapi";
pub const INFO_URL: &str = "https://github.com/nicognaw";

/// A plugin request, as dumped to JSON by the IDL compiler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PluginRequest {
    /// Version of the IDL compiler that sent the request
    pub version: String,
    pub language: String,
    pub output_path: String,
    #[serde(rename = "AST")]
    pub ast: Thrift,
}

impl PluginRequest {
    /// A request carrying only an AST.
    pub fn new(ast: Thrift) -> Self {
        Self {
            ast,
            ..Default::default()
        }
    }

    /// Decode a request from the compiler's JSON dump.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode the request as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The plugin's answer.
///
/// `error` is set only when the document could not be produced; `contents` is then empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PluginResponse {
    pub error: Option<String>,
    pub contents: Vec<Generated>,
    pub warnings: Vec<String>,
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Generated {
    pub name: String,
    pub content: String,
}

/// Runs the whole translation for one request.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: Config,
}

impl Generator {
    /// Create a generator with the given settings.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Translate one request. Warnings never stop the run; only a rendering failure sets `error`.
    pub fn run(&self, request: &PluginRequest) -> PluginResponse {
        let (document, warnings) = build_document(&self.config, &request.ast);
        let mut response = PluginResponse {
            warnings: warnings.into_vec(),
            ..Default::default()
        };

        match render_yaml(&document, &signature()) {
            Ok(content) => response.contents.push(Generated {
                name: self.config.output_filename.clone(),
                content,
            }),
            Err(err) => {
                let message = format!("Failed to build OpenAPIv3 document: {err}");
                tracing::error!("{message}");
                response.error = Some(message);
            }
        }

        response
    }
}

/// The comment placed at the top of every generated document.
pub fn signature() -> String {
    format!("Generated with {TOOL_NAME}\n{INFO_URL}")
}

/// Render a document as YAML, with `comment` as a leading `#` block.
pub fn render_yaml(document: &Document, comment: &str) -> Result<String> {
    let body = serde_yaml::to_string(document)?;

    let mut out = String::with_capacity(body.len() + comment.len() + 8);
    for line in comment.lines() {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&body);

    Ok(out)
}
