//! Builder configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;
use crate::error::Result;

/// Options selecting the backend a [`QueryBuilder`](crate::QueryBuilder) renders for.
///
/// ```rust
/// use polysql_core::{BuilderOptions, Dialect};
///
/// let options = BuilderOptions::from_json(r#"{"driver": "oracle", "schema": "hr"}"#).unwrap();
/// assert_eq!(options.dialect().unwrap(), Dialect::Oracle);
/// assert_eq!(options.schema.as_deref(), Some("hr"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderOptions {
    /// Backend identifier: `postgres`, `mysql`, `mariadb`, `sqlite`,
    /// `memory`, `oracle` or `sqlserver`.
    pub driver: String,
    /// Default schema for DML statements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

impl BuilderOptions {
    /// Creates options for `driver` with no default schema.
    #[must_use]
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            schema: None,
        }
    }

    /// Parses options from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`](crate::Error::Json) on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses options from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`](crate::Error::Yaml) on malformed input.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads options from a `.json`, `.yaml` or `.yml` file. Other
    /// extensions are read as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        tracing::debug!(path = %path.display(), yaml = is_yaml, "loading builder options");
        if is_yaml {
            Self::from_yaml(&raw)
        } else {
            Self::from_json(&raw)
        }
    }

    /// Resolves the configured driver to a dialect.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDialect`](crate::Error::UnsupportedDialect)
    /// for unknown drivers.
    pub fn dialect(&self) -> Result<Dialect> {
        Dialect::resolve(&self.driver)
    }
}
