//! Generator configuration.

use std::path::PathBuf;

use serde::Deserialize;

/// Settings for one generation run.
///
/// Every field has a default, so a partial TOML file is enough:
///
/// ```toml
/// output_filename = "api.yaml"
/// namespace_language = "go"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the generated file in the plugin response.
    pub output_filename: String,
    /// Namespace language whose name titles the document.
    pub namespace_language: String,
    /// Value of the document's `openapi` field.
    pub openapi_version: String,
    /// Value of `info.version`.
    pub api_version: String,
    /// Where to dump the received request as JSON, if anywhere.
    pub debug_dump: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_filename: "openapi.yaml".to_string(),
            namespace_language: "go".to_string(),
            openapi_version: "3.0.3".to_string(),
            api_version: "0.0.1".to_string(),
            debug_dump: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config =
            serde_json::from_value(serde_json::json!({"output_filename": "api.yaml"})).unwrap();

        assert_eq!(config.output_filename, "api.yaml");
        assert_eq!(config.namespace_language, "go");
        assert_eq!(config.openapi_version, "3.0.3");
        assert!(config.debug_dump.is_none());
    }
}
