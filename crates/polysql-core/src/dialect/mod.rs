//! SQL dialect catalog.
//!
//! Each supported backend is one variant of [`Dialect`]. Every method is a
//! pure function of its inputs, so builders can hold a dialect by value and
//! copy it freely.

mod types;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::placeholder::PlaceholderStyle;

pub use types::CanonicalType;

/// A target database vendor's SQL syntax rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL.
    Postgres,
    /// MySQL.
    #[serde(rename = "mysql")]
    MySql,
    /// MariaDB.
    #[serde(rename = "mariadb")]
    MariaDb,
    /// SQLite (also used for the in-memory backend).
    Sqlite,
    /// Oracle Database.
    Oracle,
    /// Microsoft SQL Server.
    #[serde(rename = "sqlserver")]
    SqlServer,
}

/// How a dialect expresses `LIMIT`/`OFFSET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `LIMIT n OFFSET m`.
    LimitOffset,
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`.
    OffsetFetch,
}

impl Dialect {
    /// All dialects, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::Postgres,
        Self::MySql,
        Self::MariaDb,
        Self::Sqlite,
        Self::Oracle,
        Self::SqlServer,
    ];

    /// Resolves a backend identifier to its dialect.
    ///
    /// Accepts `postgres`, `mysql`, `mariadb`, `sqlite`, `memory`, `oracle`
    /// and `sqlserver` (ASCII case-insensitive). `memory` is the in-memory
    /// SQLite backend and resolves to [`Dialect::Sqlite`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDialect`] for any other name.
    pub fn resolve(name: &str) -> Result<Self> {
        let name = name.trim();
        let dialect = match name.to_ascii_lowercase().as_str() {
            "postgres" => Self::Postgres,
            "mysql" => Self::MySql,
            "mariadb" => Self::MariaDb,
            "sqlite" | "memory" => Self::Sqlite,
            "oracle" => Self::Oracle,
            "sqlserver" => Self::SqlServer,
            _ => return Err(Error::UnsupportedDialect(name.to_string())),
        };
        Ok(dialect)
    }

    /// Returns the canonical backend name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::MySql => "mysql",
            Self::MariaDb => "mariadb",
            Self::Sqlite => "sqlite",
            Self::Oracle => "oracle",
            Self::SqlServer => "sqlserver",
        }
    }

    /// Quotes an identifier, doubling any embedded closing quote character.
    ///
    /// Oracle folds unquoted names to upper case, so the identifier is
    /// upper-cased before quoting to keep it addressable without quotes.
    #[must_use]
    pub fn quote_identifier(self, name: &str) -> String {
        let (open, close) = match self {
            Self::Postgres | Self::Sqlite | Self::Oracle => ('"', '"'),
            Self::MySql | Self::MariaDb => ('`', '`'),
            Self::SqlServer => ('[', ']'),
        };
        let name = if self == Self::Oracle {
            name.to_uppercase()
        } else {
            name.to_string()
        };

        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(open);
        for c in name.chars() {
            if c == close {
                quoted.push(close);
            }
            quoted.push(c);
        }
        quoted.push(close);
        quoted
    }

    /// Returns the autoincrement keyword.
    ///
    /// For PostgreSQL this is a column type (`SERIAL`) rather than a
    /// constraint; see [`Dialect::autoincrement_is_type`]. Oracle returns an
    /// empty string: identity there is provided by an external sequence.
    #[must_use]
    pub const fn autoincrement_keyword(self) -> &'static str {
        match self {
            Self::Postgres => "SERIAL",
            Self::MySql | Self::MariaDb => "AUTO_INCREMENT",
            Self::Sqlite => "AUTOINCREMENT",
            Self::Oracle => "",
            Self::SqlServer => "IDENTITY(1,1)",
        }
    }

    /// Whether the autoincrement keyword replaces the column type.
    #[must_use]
    pub const fn autoincrement_is_type(self) -> bool {
        matches!(self, Self::Postgres)
    }

    /// Returns the primary key constraint syntax.
    #[must_use]
    pub const fn primary_key_syntax(self) -> &'static str {
        "PRIMARY KEY"
    }

    /// Maps a canonical type name (`int`, `float64`, `bool`, `string`,
    /// `timestamp`) to the native column type.
    ///
    /// Names outside the canonical set are returned unchanged so callers can
    /// pass raw native types such as `varchar(64)`.
    #[must_use]
    pub fn map_type(self, canonical: &str) -> String {
        match canonical.parse::<CanonicalType>() {
            Ok(ty) => self.native_type(ty).to_string(),
            Err(()) => {
                tracing::trace!(dialect = self.name(), ty = canonical, "passing through native type");
                canonical.to_string()
            }
        }
    }

    /// Returns the native column type for a canonical type.
    #[must_use]
    pub const fn native_type(self, ty: CanonicalType) -> &'static str {
        types::native_type(self, ty)
    }

    /// Whether the backend has a native JSON column type.
    #[must_use]
    pub const fn supports_json(self) -> bool {
        matches!(
            self,
            Self::Postgres | Self::MySql | Self::MariaDb | Self::SqlServer
        )
    }

    /// Whether the backend supports enum column types.
    #[must_use]
    pub const fn supports_enum(self) -> bool {
        matches!(self, Self::Postgres | Self::MySql | Self::MariaDb)
    }

    /// Whether the backend enforces CHECK constraints.
    #[must_use]
    pub const fn supports_check_constraints(self) -> bool {
        matches!(
            self,
            Self::Postgres | Self::Sqlite | Self::Oracle | Self::SqlServer
        )
    }

    /// Whether the backend supports partial (filtered) indexes.
    #[must_use]
    pub const fn supports_partial_index(self) -> bool {
        matches!(self, Self::Postgres)
    }

    /// Returns the native bind parameter syntax.
    #[must_use]
    pub const fn placeholder_style(self) -> PlaceholderStyle {
        match self {
            Self::Postgres => PlaceholderStyle::Dollar,
            Self::Oracle => PlaceholderStyle::Colon,
            Self::MySql | Self::MariaDb | Self::Sqlite | Self::SqlServer => {
                PlaceholderStyle::Question
            }
        }
    }

    /// Returns the pagination syntax.
    #[must_use]
    pub const fn pagination(self) -> Pagination {
        match self {
            Self::Oracle | Self::SqlServer => Pagination::OffsetFetch,
            _ => Pagination::LimitOffset,
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
