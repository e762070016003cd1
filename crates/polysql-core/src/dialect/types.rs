//! Canonical column types and their per-dialect native names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Dialect;

/// The logical column types shared by every dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalType {
    /// 64-bit integer.
    Int,
    /// Double-precision float.
    Float64,
    /// Boolean.
    Bool,
    /// Variable-length text.
    String,
    /// Date and time.
    Timestamp,
}

impl CanonicalType {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Timestamp => "timestamp",
        }
    }
}

impl FromStr for CanonicalType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "float64" => Ok(Self::Float64),
            "bool" => Ok(Self::Bool),
            "string" => Ok(Self::String),
            "timestamp" => Ok(Self::Timestamp),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(super) const fn native_type(dialect: Dialect, ty: CanonicalType) -> &'static str {
    use CanonicalType as T;

    match dialect {
        Dialect::Postgres => match ty {
            T::Int => "INTEGER",
            T::Float64 => "DOUBLE PRECISION",
            T::Bool => "BOOLEAN",
            T::String => "VARCHAR",
            T::Timestamp => "TIMESTAMP",
        },
        Dialect::MySql | Dialect::MariaDb => match ty {
            T::Int => "INT",
            T::Float64 => "DOUBLE",
            T::Bool => "TINYINT(1)",
            T::String => "VARCHAR(255)",
            T::Timestamp => "DATETIME",
        },
        Dialect::Sqlite => match ty {
            T::Int => "INTEGER",
            T::Float64 => "REAL",
            T::Bool => "BOOLEAN",
            T::String | T::Timestamp => "TEXT",
        },
        Dialect::Oracle => match ty {
            T::Int => "NUMBER",
            T::Float64 => "FLOAT",
            T::Bool => "NUMBER(1)",
            T::String => "VARCHAR2(255)",
            T::Timestamp => "TIMESTAMP",
        },
        Dialect::SqlServer => match ty {
            T::Int => "INT",
            T::Float64 => "FLOAT",
            T::Bool => "BIT",
            T::String => "NVARCHAR(255)",
            T::Timestamp => "DATETIME2",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!("int".parse(), Ok(CanonicalType::Int));
        assert_eq!("float64".parse(), Ok(CanonicalType::Float64));
        assert_eq!("bool".parse(), Ok(CanonicalType::Bool));
        assert_eq!("string".parse(), Ok(CanonicalType::String));
        assert_eq!("timestamp".parse(), Ok(CanonicalType::Timestamp));
        assert_eq!("INT".parse::<CanonicalType>(), Err(()));
    }

    #[test]
    fn test_postgres_types() {
        let d = Dialect::Postgres;
        assert_eq!(d.native_type(CanonicalType::Int), "INTEGER");
        assert_eq!(d.native_type(CanonicalType::Float64), "DOUBLE PRECISION");
        assert_eq!(d.native_type(CanonicalType::Bool), "BOOLEAN");
        assert_eq!(d.native_type(CanonicalType::String), "VARCHAR");
        assert_eq!(d.native_type(CanonicalType::Timestamp), "TIMESTAMP");
    }

    #[test]
    fn test_mysql_family_types_match() {
        for ty in [
            CanonicalType::Int,
            CanonicalType::Float64,
            CanonicalType::Bool,
            CanonicalType::String,
            CanonicalType::Timestamp,
        ] {
            assert_eq!(
                Dialect::MySql.native_type(ty),
                Dialect::MariaDb.native_type(ty)
            );
        }
        assert_eq!(Dialect::MySql.map_type("bool"), "TINYINT(1)");
    }

    #[test]
    fn test_sqlite_stores_timestamps_as_text() {
        assert_eq!(Dialect::Sqlite.map_type("timestamp"), "TEXT");
        assert_eq!(Dialect::Sqlite.map_type("float64"), "REAL");
    }

    #[test]
    fn test_oracle_and_sqlserver_types() {
        assert_eq!(Dialect::Oracle.map_type("int"), "NUMBER");
        assert_eq!(Dialect::Oracle.map_type("string"), "VARCHAR2(255)");
        assert_eq!(Dialect::SqlServer.map_type("bool"), "BIT");
        assert_eq!(Dialect::SqlServer.map_type("timestamp"), "DATETIME2");
    }
}
