use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for reflection operations.
pub type Result<T> = std::result::Result<T, ReflectError>;

/// Error variants for loading a declaration tree and querying its mirrors.
///
/// Bad input inside a tree (unknown declaration shapes, dangling references) is not an
/// error: it degrades to the Unknown mirror and is recorded as a
/// [`Diagnostic`](crate::diagnostics::Diagnostic) instead.
#[derive(Debug, Error)]
pub enum ReflectError {
    /// Failed to read a declaration tree from disk.
    #[error("failed to read declaration tree '{path}': {error}")]
    Io {
        /// Path to the file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The document is not valid JSON.
    #[error("failed to parse declaration tree{}: {error}", path.as_ref().map(|p| format!(" '{}'", p.display())).unwrap_or_default())]
    Json {
        /// Source file, when the document was loaded from disk.
        path: Option<PathBuf>,
        /// Underlying parser error.
        #[source]
        error: serde_json::Error,
    },

    /// The document root is not a declaration container.
    #[error("invalid declaration tree root: {details}")]
    InvalidRoot {
        /// What was wrong with the root.
        details: String,
    },

    /// `describe_module` was asked for a name that no module carries.
    #[error("module not found: '{name}'")]
    ModuleNotFound {
        /// Requested module name.
        name: String,
    },

    /// Options could not be extracted from their sources.
    #[error("invalid reflector options: {message}")]
    Config {
        /// Human-readable extraction error.
        message: String,
    },

    /// The reserve/fill protocol of the resolution table was broken.
    ///
    /// This is an engine bug rather than bad input.
    #[error("resolution invariant violated: {details}")]
    InvariantViolation {
        /// Description of the broken invariant.
        details: String,
    },
}

impl ReflectError {
    /// Helper to create an invariant violation from any displayable message.
    pub fn invariant(details: impl Into<String>) -> Self {
        Self::InvariantViolation {
            details: details.into(),
        }
    }
}
