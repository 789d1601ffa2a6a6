//! Translate Thrift IDL services into OpenAPI v3 documents.
//!
//! Functions annotated with a hertz route (`api.get`, `api.post`, ..., `api.any`) become
//! operations; their single request struct becomes query parameters and their return struct
//! becomes a flattened `200` response schema.
//!
//! # Example
//!
//! ```ignore
//! use thrift_openapi::{Config, Generator, PluginRequest};
//!
//! let request = PluginRequest::from_json(&input)?;
//! let response = Generator::new(Config::default()).run(&request);
//! for warning in &response.warnings {
//!     eprintln!("{warning}");
//! }
//! ```

pub mod annotation;
mod builder;
mod config;
mod error;
mod generator;
pub mod params;
mod path;
pub mod response;
mod types;

pub use annotation::{HttpBinding, resolve};
pub use builder::{DocumentBuilder, build_document};
pub use config::Config;
pub use error::{OpenApiError, Warnings};
pub use generator::{
    Generated, Generator, INFO_URL, PluginRequest, PluginResponse, TOOL_NAME, render_yaml,
    signature,
};
pub use path::assemble;
pub use types::*;

/// Result type for OpenAPI operations.
pub type Result<T> = std::result::Result<T, OpenApiError>;
