//! # polysql-core
//!
//! A dialect-aware SQL statement builder.
//!
//! This crate provides:
//! - A catalog of six SQL dialects (PostgreSQL, MySQL, MariaDB, SQLite,
//!   Oracle, SQL Server) covering quoting, type names and pagination
//! - Per-kind statement builders that keep bind arguments in step with the
//!   placeholders they render
//! - A serializable query representation with JSON, YAML and XML encoders
//! - Record-to-statement mapping, derived with `polysql-derive`
//! - A `CREATE TABLE` script builder with foreign keys and indexes
//!
//! ## Building Statements
//!
//! Builders write generic `?` markers. The dialect's own placeholder syntax
//! is applied once, when the statement is built:
//!
//! ```rust
//! use polysql_core::{Build, Dialect, QueryBuilder, SqlValue};
//!
//! let (sql, args) = QueryBuilder::new(Dialect::Oracle)
//!     .select("users", &["id", "name"])
//!     .where_clause("status = ?", "active")
//!     .order_by("name")
//!     .limit(10)
//!     .build();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT id, name FROM users WHERE status = :p1 ORDER BY name \
//!      OFFSET 0 ROWS FETCH NEXT 10 ROWS ONLY"
//! );
//! assert_eq!(args, vec![SqlValue::Text(String::from("active"))]);
//! ```
//!
//! ## Moving Queries Between Dialects
//!
//! ```rust
//! use polysql_core::{Build, Dialect, QueryBuilder};
//!
//! let exported = QueryBuilder::new(Dialect::Postgres)
//!     .delete_from("sessions")
//!     .where_clause("expires_at < ?", 1_700_000_000_i64)
//!     .export();
//!
//! let (sql, _) = QueryBuilder::new(Dialect::Sqlite).import(&exported).build();
//! assert_eq!(sql, "DELETE FROM sessions WHERE expires_at < ?");
//! ```

pub mod builder;
pub mod config;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod placeholder;
pub mod query;
pub mod record;
pub mod structured;

pub use builder::{
    Build, CreateTable, Delete, DropTable, Fragment, Insert, IntoArgs, Merge, Raw, Select,
    SqlValue, Statement, StatementKind, ToSqlValue, Update,
};
pub use config::BuilderOptions;
pub use ddl::{Column, ColumnBuilder, ColumnId, ForeignKey, ForeignKeyAction, Index, TableBuilder};
pub use dialect::{CanonicalType, Dialect, Pagination};
pub use error::{Error, Result};
pub use placeholder::PlaceholderStyle;
pub use query::{Query, QueryBuilder};
pub use record::Record;
pub use structured::StructuredQuery;
