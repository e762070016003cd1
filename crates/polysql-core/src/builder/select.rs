//! `SELECT` statement builder.

use crate::query::QueryBuilder;

use super::fragment::Fragment;
use super::statement::SelectStatement;
use super::value::IntoArgs;
use super::push_or;

/// A `SELECT` statement under construction.
///
/// Clauses may be added in any order; they always render as
/// `SELECT .. FROM .. JOIN .. WHERE .. GROUP BY .. HAVING .. ORDER BY ..`
/// followed by the dialect's pagination syntax.
#[derive(Debug, Clone)]
#[must_use]
pub struct Select {
    pub(crate) ctx: QueryBuilder,
    pub(crate) stmt: SelectStatement,
}

impl Select {
    pub(crate) fn new(ctx: QueryBuilder, table: &str, columns: &[&str]) -> Self {
        let stmt = SelectStatement {
            schema: ctx.schema().map(String::from),
            table: String::from(table),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            ..Default::default()
        };
        Self { ctx, stmt }
    }

    /// Returns the statement state.
    #[must_use]
    pub const fn statement(&self) -> &SelectStatement {
        &self.stmt
    }

    /// Adds `DISTINCT`.
    pub fn distinct(mut self) -> Self {
        self.stmt.distinct = true;
        self
    }

    /// Appends output columns.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.stmt
            .columns
            .extend(columns.iter().map(|c| String::from(*c)));
        self
    }

    /// Qualifies the table with a schema.
    pub fn schema(mut self, schema: &str) -> Self {
        self.stmt.schema = Some(String::from(schema));
        self
    }

    /// Sets the table alias.
    pub fn alias(mut self, alias: &str) -> Self {
        self.stmt.alias = Some(String::from(alias));
        self
    }

    fn push_join(mut self, keyword: &str, table: &str, on: &str, args: impl IntoArgs) -> Self {
        self.stmt
            .joins
            .push(Fragment::new(format!("{keyword} {table} ON {on}"), args));
        self
    }

    /// Adds an inner `JOIN table ON condition`.
    pub fn join(self, table: &str, on: &str, args: impl IntoArgs) -> Self {
        self.push_join("JOIN", table, on, args)
    }

    /// Adds a `LEFT JOIN table ON condition`.
    pub fn left_join(self, table: &str, on: &str, args: impl IntoArgs) -> Self {
        self.push_join("LEFT JOIN", table, on, args)
    }

    /// Adds a `RIGHT JOIN table ON condition`.
    pub fn right_join(self, table: &str, on: &str, args: impl IntoArgs) -> Self {
        self.push_join("RIGHT JOIN", table, on, args)
    }

    /// Adds a predicate, AND-ed with the previous ones.
    pub fn where_clause(mut self, condition: &str, args: impl IntoArgs) -> Self {
        self.stmt.predicates.push(Fragment::new(condition, args));
        self
    }

    /// Adds a predicate OR-ed with the most recent one: `((prev) OR (cond))`.
    pub fn or_where(mut self, condition: &str, args: impl IntoArgs) -> Self {
        push_or(&mut self.stmt.predicates, Fragment::new(condition, args));
        self
    }

    /// Adds a predicate from an already built fragment, such as
    /// `id IN (<subquery>)`.
    pub fn where_fragment(mut self, fragment: Fragment) -> Self {
        self.stmt.predicates.push(fragment);
        self
    }

    /// Appends `GROUP BY` columns.
    pub fn group_by(mut self, columns: &[&str]) -> Self {
        self.stmt
            .group_by
            .extend(columns.iter().map(|c| String::from(*c)));
        self
    }

    /// Adds a `HAVING` predicate, AND-ed with the previous ones.
    pub fn having(mut self, condition: &str, args: impl IntoArgs) -> Self {
        self.stmt.having.push(Fragment::new(condition, args));
        self
    }

    /// Appends an ascending `ORDER BY` term.
    pub fn order_by(mut self, column: &str) -> Self {
        self.stmt.order_by.push(String::from(column));
        self
    }

    /// Appends a descending `ORDER BY` term.
    pub fn order_by_desc(mut self, column: &str) -> Self {
        self.stmt.order_by.push(format!("{column} DESC"));
        self
    }

    /// Sets the row limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.stmt.limit = Some(limit);
        self
    }

    /// Sets the row offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.stmt.offset = Some(offset);
        self
    }
}
