//! `CREATE TABLE` and `DROP TABLE` statement builders.
//!
//! These render a single statement inline with the rest of the builders. For
//! multi-statement DDL scripts with indexes, see [`crate::ddl::TableBuilder`].

use crate::ddl::Column;
use crate::query::QueryBuilder;

use super::statement::{CreateTableStatement, DropTableStatement};

/// A `CREATE TABLE` statement under construction.
#[derive(Debug, Clone)]
#[must_use]
pub struct CreateTable {
    pub(crate) ctx: QueryBuilder,
    pub(crate) stmt: CreateTableStatement,
}

impl CreateTable {
    pub(crate) fn new(ctx: QueryBuilder, table: &str) -> Self {
        let stmt = CreateTableStatement {
            table: String::from(table),
            ..Default::default()
        };
        Self { ctx, stmt }
    }

    /// Returns the statement state.
    #[must_use]
    pub const fn statement(&self) -> &CreateTableStatement {
        &self.stmt
    }

    /// Adds `IF NOT EXISTS`.
    pub fn if_not_exists(mut self) -> Self {
        self.stmt.if_not_exists = true;
        self
    }

    /// Appends a column definition.
    pub fn column(mut self, column: Column) -> Self {
        self.stmt.columns.push(column);
        self
    }
}

/// A `DROP TABLE` statement under construction.
#[derive(Debug, Clone)]
#[must_use]
pub struct DropTable {
    pub(crate) ctx: QueryBuilder,
    pub(crate) stmt: DropTableStatement,
}

impl DropTable {
    pub(crate) fn new(ctx: QueryBuilder, table: &str) -> Self {
        let stmt = DropTableStatement {
            table: String::from(table),
            if_exists: false,
        };
        Self { ctx, stmt }
    }

    /// Returns the statement state.
    #[must_use]
    pub const fn statement(&self) -> &DropTableStatement {
        &self.stmt
    }

    /// Adds `IF EXISTS`.
    pub fn if_exists(mut self) -> Self {
        self.stmt.if_exists = true;
        self
    }
}
