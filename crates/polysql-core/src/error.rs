//! Error types for statement building and query serialization.

/// Errors returned by dialect resolution, record mapping and the structured
/// query encoders.
///
/// Rendering a statement never fails; an under-specified builder renders
/// degenerate SQL instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend name does not match any known dialect.
    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),

    /// A record mapper was given a value that does not serialize as a struct.
    #[error("Expected a struct value, got {0}")]
    NotAStructType(String),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encoding or decoding failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// XML encoding failed.
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error (writing DDL scripts).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fallible polysql operations.
pub type Result<T> = std::result::Result<T, Error>;
