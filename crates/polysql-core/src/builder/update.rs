//! `UPDATE` statement builder.

use crate::query::QueryBuilder;

use super::fragment::Fragment;
use super::push_or;
use super::statement::UpdateStatement;
use super::value::{IntoArgs, ToSqlValue};

/// An `UPDATE` statement under construction.
#[derive(Debug, Clone)]
#[must_use]
pub struct Update {
    pub(crate) ctx: QueryBuilder,
    pub(crate) stmt: UpdateStatement,
}

impl Update {
    pub(crate) fn new(ctx: QueryBuilder, table: &str) -> Self {
        let stmt = UpdateStatement {
            schema: ctx.schema().map(String::from),
            table: String::from(table),
            ..Default::default()
        };
        Self { ctx, stmt }
    }

    /// Returns the statement state.
    #[must_use]
    pub const fn statement(&self) -> &UpdateStatement {
        &self.stmt
    }

    /// Qualifies the table with a schema.
    pub fn schema(mut self, schema: &str) -> Self {
        self.stmt.schema = Some(String::from(schema));
        self
    }

    /// Adds `column = ?` bound to `value`.
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.stmt.assignments.push(Fragment {
            sql: format!("{column} = ?"),
            args: vec![value.to_sql_value()],
        });
        self
    }

    /// Adds a verbatim assignment such as `count = count + ?`.
    pub fn set_raw(mut self, assignment: &str, args: impl IntoArgs) -> Self {
        self.stmt.assignments.push(Fragment::new(assignment, args));
        self
    }

    /// Adds a predicate, AND-ed with the previous ones.
    pub fn where_clause(mut self, condition: &str, args: impl IntoArgs) -> Self {
        self.stmt.predicates.push(Fragment::new(condition, args));
        self
    }

    /// Adds a predicate OR-ed with the most recent one.
    pub fn or_where(mut self, condition: &str, args: impl IntoArgs) -> Self {
        push_or(&mut self.stmt.predicates, Fragment::new(condition, args));
        self
    }
}
