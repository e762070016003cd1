//! The builder factory and imported queries.

use crate::builder::{
    Build, CreateTable, Delete, DropTable, Fragment, Insert, IntoArgs, Merge, Raw, Select,
    Statement, StatementKind, Update,
};
use crate::config::BuilderOptions;
use crate::ddl::TableBuilder;
use crate::dialect::Dialect;
use crate::error::Result;
use crate::structured::StructuredQuery;

/// Creates statement builders bound to one dialect and an optional default
/// schema.
///
/// Each statement kind is started by its own method, and the returned builder
/// only offers clauses that apply to that kind. Independent builders share no
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    dialect: Dialect,
    schema: Option<String>,
}

impl QueryBuilder {
    /// Creates a factory for `dialect`.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            schema: None,
        }
    }

    /// Creates a factory for a backend name such as `"postgres"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDialect`](crate::Error::UnsupportedDialect)
    /// for unknown names.
    pub fn for_driver(driver: &str) -> Result<Self> {
        Ok(Self::new(Dialect::resolve(driver)?))
    }

    /// Creates a factory from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDialect`](crate::Error::UnsupportedDialect)
    /// if the configured driver is unknown.
    pub fn from_options(options: &BuilderOptions) -> Result<Self> {
        let dialect = options.dialect()?;
        Ok(Self {
            dialect,
            schema: options.schema.clone().filter(|s| !s.is_empty()),
        })
    }

    /// Sets the default schema for DML statements.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Returns the bound dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Returns the default schema.
    #[must_use]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Starts `SELECT columns FROM table`. No columns selects `*`.
    pub fn select(&self, table: &str, columns: &[&str]) -> Select {
        Select::new(self.clone(), table, columns)
    }

    /// Starts `INSERT INTO table (columns)`.
    pub fn insert_into(&self, table: &str, columns: &[&str]) -> Insert {
        Insert::new(self.clone(), table, columns)
    }

    /// Starts `UPDATE table`.
    pub fn update(&self, table: &str) -> Update {
        Update::new(self.clone(), table)
    }

    /// Starts `DELETE FROM table`.
    pub fn delete_from(&self, table: &str) -> Delete {
        Delete::new(self.clone(), table)
    }

    /// Starts `CREATE TABLE table`.
    pub fn create_table(&self, table: &str) -> CreateTable {
        CreateTable::new(self.clone(), table)
    }

    /// Starts `DROP TABLE table`.
    pub fn drop_table(&self, table: &str) -> DropTable {
        DropTable::new(self.clone(), table)
    }

    /// Starts `MERGE INTO table`.
    pub fn merge_into(&self, table: &str) -> Merge {
        Merge::new(self.clone(), table)
    }

    /// Starts a statement from verbatim SQL.
    pub fn raw(&self, sql: &str, args: impl IntoArgs) -> Raw {
        Raw::new(self.clone(), sql, args)
    }

    /// Starts a DDL script for `table` (CREATE TABLE plus indexes).
    pub fn table(&self, table: &str) -> TableBuilder {
        TableBuilder::new(self.dialect, table)
    }

    /// Rebuilds a statement from its structured form, bound to this
    /// factory's dialect.
    ///
    /// Markers are read in the exported dialect's syntax, so a query exported
    /// for one dialect can be rendered for another.
    #[must_use]
    pub fn import(&self, query: &StructuredQuery) -> Query {
        Query {
            ctx: self.clone(),
            statement: query.to_statement(),
        }
    }
}

/// A statement rebuilt from a [`StructuredQuery`].
#[derive(Debug, Clone)]
#[must_use]
pub struct Query {
    ctx: QueryBuilder,
    statement: Statement,
}

impl Query {
    /// Returns the statement state.
    #[must_use]
    pub const fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Consumes the query, returning its statement.
    #[must_use]
    pub fn into_statement(self) -> Statement {
        self.statement
    }
}

impl Build for Query {
    fn context(&self) -> &QueryBuilder {
        &self.ctx
    }

    fn kind(&self) -> StatementKind {
        self.statement.kind()
    }

    fn to_statement(&self) -> Statement {
        self.statement.clone()
    }

    fn fragment(&self) -> Fragment {
        self.statement.to_fragment(self.ctx.dialect())
    }
}
