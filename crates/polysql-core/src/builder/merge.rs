//! `MERGE` (upsert) statement builder.

use crate::query::QueryBuilder;

use super::fragment::Fragment;
use super::statement::MergeStatement;
use super::value::{IntoArgs, ToSqlValue};

/// A `MERGE` statement under construction.
///
/// Renders `MERGE INTO t [USING src] [ON cond] [WHEN MATCHED THEN UPDATE SET
/// ..] [WHEN NOT MATCHED THEN INSERT (..) VALUES (..)]`.
#[derive(Debug, Clone)]
#[must_use]
pub struct Merge {
    pub(crate) ctx: QueryBuilder,
    pub(crate) stmt: MergeStatement,
}

impl Merge {
    pub(crate) fn new(ctx: QueryBuilder, table: &str) -> Self {
        let stmt = MergeStatement {
            table: String::from(table),
            ..Default::default()
        };
        Self { ctx, stmt }
    }

    /// Returns the statement state.
    #[must_use]
    pub const fn statement(&self) -> &MergeStatement {
        &self.stmt
    }

    /// Sets the `USING` source (a table or parenthesized subquery text).
    pub fn using(mut self, source: &str) -> Self {
        self.stmt.using = Some(String::from(source));
        self
    }

    /// Sets the match condition.
    pub fn on(mut self, condition: &str, args: impl IntoArgs) -> Self {
        self.stmt.on = Some(Fragment::new(condition, args));
        self
    }

    /// Adds `column = ?` to the `WHEN MATCHED` update.
    pub fn when_matched_set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.stmt.matched_set.push(Fragment {
            sql: format!("{column} = ?"),
            args: vec![value.to_sql_value()],
        });
        self
    }

    /// Adds a verbatim assignment to the `WHEN MATCHED` update.
    pub fn when_matched_set_raw(mut self, assignment: &str, args: impl IntoArgs) -> Self {
        self.stmt
            .matched_set
            .push(Fragment::new(assignment, args));
        self
    }

    /// Sets the `WHEN NOT MATCHED` insert, one marker per value.
    pub fn when_not_matched_insert(mut self, columns: &[&str], values: impl IntoArgs) -> Self {
        let args = values.into_args();
        self.stmt.insert_columns = columns.iter().map(|c| String::from(*c)).collect();
        self.stmt.insert_values = Some(Fragment {
            sql: vec!["?"; args.len()].join(", "),
            args,
        });
        self
    }
}
