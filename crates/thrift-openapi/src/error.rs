//! Error types for document generation.

use thiserror::Error;

/// Errors that abort a generation run.
///
/// Everything short of these is reported as a warning and the run continues.
#[derive(Debug, Error)]
pub enum OpenApiError {
    /// YAML rendering error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Non-fatal problems collected during a run.
///
/// Each warning is also emitted as a `tracing` event when recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings(Vec<String>);

impl Warnings {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{message}");
        self.0.push(message);
    }

    /// Number of warnings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Warnings in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Consume into the plain message list.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
