//! Verbatim SQL with bound arguments.

use crate::query::QueryBuilder;

use super::fragment::Fragment;
use super::statement::RawStatement;
use super::value::IntoArgs;

/// A statement assembled from verbatim clauses, joined by single spaces.
///
/// This covers constructs with no dedicated builder (CTEs, window functions,
/// set operations). Clauses may embed other builders' [`Fragment`]s; markers
/// stay generic until the whole statement is built.
///
/// ```rust
/// use polysql_core::{Build, Dialect, QueryBuilder};
///
/// let qb = QueryBuilder::new(Dialect::Postgres);
/// let recent = qb.select("orders", &["user_id"]).where_clause("total > ?", 100);
/// let (sql, _) = qb
///     .raw("WITH big AS", ())
///     .append_fragment(recent.fragment().parenthesized())
///     .append("SELECT * FROM users WHERE id IN (SELECT user_id FROM big) AND age > ?", 18)
///     .build();
///
/// assert_eq!(
///     sql,
///     "WITH big AS (SELECT user_id FROM orders WHERE total > $1) \
///      SELECT * FROM users WHERE id IN (SELECT user_id FROM big) AND age > $2"
/// );
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Raw {
    pub(crate) ctx: QueryBuilder,
    pub(crate) stmt: RawStatement,
}

impl Raw {
    pub(crate) fn new(ctx: QueryBuilder, sql: &str, args: impl IntoArgs) -> Self {
        Self::from_clauses(ctx, vec![Fragment::new(sql, args)])
    }

    pub(crate) const fn from_clauses(ctx: QueryBuilder, clauses: Vec<Fragment>) -> Self {
        Self {
            ctx,
            stmt: RawStatement { clauses },
        }
    }

    /// Returns the statement state.
    #[must_use]
    pub const fn statement(&self) -> &RawStatement {
        &self.stmt
    }

    /// Appends a clause.
    pub fn append(mut self, sql: &str, args: impl IntoArgs) -> Self {
        self.stmt.clauses.push(Fragment::new(sql, args));
        self
    }

    /// Appends a previously built fragment.
    pub fn append_fragment(mut self, fragment: Fragment) -> Self {
        self.stmt.clauses.push(fragment);
        self
    }
}
